//! Movie persistence
//!
//! Resolvers talk to storage only through the [`MovieStore`] trait. Two
//! implementations exist: [`InMemoryMovieStore`] for demo and test runs, and
//! [`SqliteMovieStore`] for durable storage. The connection string in
//! [`Config`] decides which one [`connect_store`] returns.

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod movies;
pub mod seed;
#[cfg(feature = "sqlite")]
pub mod sqlite_helpers;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};

use crate::config::{Config, StoreBackend};

pub use memory::InMemoryMovieStore;
#[cfg(feature = "sqlite")]
pub use movies::SqliteMovieStore;

/// Errors raised by a movie store.
///
/// An empty result is never reported through this type: callers can always
/// tell "no data" apart from "store unavailable".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("movie store unavailable: {0}")]
    Unavailable(String),

    #[error("movie store query failed: {0}")]
    Query(sqlx::Error),

    #[error("movie {id} already exists")]
    Duplicate { id: String },

    #[error("stored movie {id} is unreadable: {reason}")]
    Corrupt { id: String, reason: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Query(other),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Movie record as returned by every store.
///
/// Actor references are always normalized to a flat list of ids, whatever
/// shape the backing store keeps them in.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub release_date: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub status: Option<String>,
    pub actor_ids: Vec<String>,
}

/// Input for creating a movie
#[derive(Debug, Clone, Default)]
pub struct CreateMovie {
    /// Caller-chosen id. The store assigns one when absent.
    pub id: Option<String>,
    pub title: String,
    pub release_date: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub status: Option<String>,
    pub actor_ids: Vec<String>,
}

impl CreateMovie {
    /// Turn the input into a record, assigning a fresh id if none was given.
    ///
    /// Release dates are truncated to whole milliseconds, the precision every
    /// store persists.
    pub fn into_record(self) -> MovieRecord {
        MovieRecord {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: self.title,
            release_date: self.release_date.map(|ts| ts.trunc_subsecs(3)),
            rating: self.rating,
            status: self.status,
            actor_ids: self.actor_ids,
        }
    }
}

/// Asynchronous, fallible access to the movie collection.
///
/// Implementations must tolerate concurrent calls from many in-flight
/// operations.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Every persisted movie
    async fn find_all(&self) -> StoreResult<Vec<MovieRecord>>;

    /// A single movie, or `None` when no record has this id
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<MovieRecord>>;

    /// Persist a new movie and return it with its assigned id
    async fn create(&self, input: CreateMovie) -> StoreResult<MovieRecord>;

    /// Cheap connectivity probe used at startup and by `/readyz`
    async fn ping(&self) -> StoreResult<()>;
}

/// Open the store selected by the configuration and confirm it is reachable.
///
/// A failure here is a startup error: the listener must not start.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn MovieStore>> {
    let store: Arc<dyn MovieStore> = match config.store_backend()? {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory movie store");
            Arc::new(InMemoryMovieStore::with_demo_movies())
        }
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite(url) => {
            tracing::info!(url = %url, "Connecting to SQLite movie store");
            Arc::new(
                SqliteMovieStore::connect(&url, config.database_max_connections)
                    .await
                    .context("Failed to open SQLite movie store")?,
            )
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite(_) => {
            anyhow::bail!("SQLite support is disabled; rebuild with the `sqlite` feature")
        }
    };

    store
        .ping()
        .await
        .context("Movie store did not respond to health check")?;

    Ok(store)
}
