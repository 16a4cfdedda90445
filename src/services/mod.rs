//! In-process services shared by the GraphQL layer

pub mod actors;
pub mod events;
pub mod logging;

pub use actors::{ActorDirectory, ActorRecord};
pub use events::{EventBus, MOVIE_ADDED, TopicStream};
pub use logging::init_tracing;
