//! Process-local movie store
//!
//! Keeps records in insertion order behind a read/write lock. Selected with a
//! `memory://` connection string; nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CreateMovie, MovieRecord, MovieStore, StoreError, StoreResult, seed};

#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<Vec<MovieRecord>>,
}

impl InMemoryMovieStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the demo catalog
    pub fn with_demo_movies() -> Self {
        Self {
            movies: RwLock::new(seed::demo_movies()),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.read().is_empty()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn find_all(&self) -> StoreResult<Vec<MovieRecord>> {
        Ok(self.movies.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        Ok(self.movies.read().iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, input: CreateMovie) -> StoreResult<MovieRecord> {
        let record = input.into_record();
        let mut movies = self.movies.write();
        if movies.iter().any(|m| m.id == record.id) {
            return Err(StoreError::Duplicate { id: record.id });
        }
        movies.push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
