//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! Resolvers get their collaborators from schema data: the movie store
//! (`Arc<dyn MovieStore>`), the actor directory, and the movie event bus.
//! Per-request data is the [`RequestContext`].

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod queries;
pub mod scalars;
mod schema;
mod subscriptions;
pub mod types;

pub use auth::{AuthExt, RequestContext, STUB_USER_ID};
pub use scalars::Date;
pub use schema::{CinegraphSchema, MovieEventBus, MutationRoot, QueryRoot, build_schema};
pub use subscriptions::SubscriptionRoot;
pub use types::{Actor, ActorInput, Movie, MovieInput, MovieStatus};
