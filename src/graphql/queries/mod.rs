pub mod actors;
pub mod movies;

pub use actors::ActorQueries;
pub use movies::MovieQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::MovieStore;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::ActorDirectory;
}
