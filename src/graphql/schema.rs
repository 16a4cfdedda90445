//! GraphQL schema definition with queries, mutations, and subscriptions

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{MergedObject, Schema};

use crate::db::MovieStore;
use crate::services::{ActorDirectory, EventBus};

use super::mutations::MovieMutations;
use super::queries::{ActorQueries, MovieQueries};
use super::subscriptions::SubscriptionRoot;
use super::types::Movie;

/// The GraphQL schema type
pub type CinegraphSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Event bus carrying movie snapshots
pub type MovieEventBus = EventBus<Movie>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries, ActorQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(MovieMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(
    store: Arc<dyn MovieStore>,
    actors: Arc<ActorDirectory>,
    events: Arc<MovieEventBus>,
) -> CinegraphSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), SubscriptionRoot)
        .extension(Tracing)
        .data(store)
        .data(actors)
        .data(events)
        .finish()
}
