//! Cinegraph - GraphQL movie catalog with live subscriptions
//!
//! Queries, mutations, and subscriptions are served over GraphQL at
//! `/graphql`. Movies live in a [`db::MovieStore`]; newly added movies are
//! pushed to `movieAdded` subscribers through the [`services::EventBus`].

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

use std::sync::Arc;

use crate::config::Config;
use crate::db::MovieStore;
use crate::graphql::{CinegraphSchema, MovieEventBus, build_schema};
use crate::services::ActorDirectory;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
    pub events: Arc<MovieEventBus>,
    pub schema: CinegraphSchema,
}

impl AppState {
    /// Wire the actor directory, event bus, and schema around a connected store
    pub fn new(config: Arc<Config>, store: Arc<dyn MovieStore>) -> Self {
        let actors = Arc::new(ActorDirectory::seeded());
        let events = Arc::new(MovieEventBus::new(config.event_bus_capacity));
        let schema = build_schema(store.clone(), actors, events.clone());

        Self {
            store,
            events,
            schema,
        }
    }
}
