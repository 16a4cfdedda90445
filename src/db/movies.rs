//! SQLite-backed movie repository

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::sqlite_helpers::{
    datetime_to_millis, json_to_vec_opt, millis_to_datetime_opt, now_iso8601, vec_to_json,
};
use super::{CreateMovie, MovieRecord, MovieStore, StoreError, StoreResult};

const CREATE_MOVIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        release_date INTEGER,
        rating INTEGER,
        status TEXT,
        actor_ids TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
"#;

/// Raw row as stored in SQLite
#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: String,
    title: String,
    release_date: Option<i64>,
    rating: Option<i32>,
    status: Option<String>,
    actor_ids: Option<String>,
}

impl TryFrom<MovieRow> for MovieRecord {
    type Error = StoreError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::Corrupt {
            id: row.id.clone(),
            reason,
        };
        let release_date = millis_to_datetime_opt(row.release_date).map_err(corrupt)?;
        let actor_ids = json_to_vec_opt(row.actor_ids.as_deref()).map_err(corrupt)?;

        Ok(MovieRecord {
            id: row.id,
            title: row.title,
            release_date,
            rating: row.rating,
            status: row.status,
            actor_ids,
        })
    }
}

pub struct SqliteMovieStore {
    pool: SqlitePool,
}

impl SqliteMovieStore {
    /// Open a pool for `url`, creating the database file and table if needed
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and make sure the movies table exists
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(CREATE_MOVIES_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn find_all(&self) -> StoreResult<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date, rating, status, actor_ids
            FROM movies
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MovieRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date, rating, status, actor_ids
            FROM movies
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MovieRecord::try_from).transpose()
    }

    async fn create(&self, input: CreateMovie) -> StoreResult<MovieRecord> {
        let record = input.into_record();

        let result = sqlx::query(
            r#"
            INSERT INTO movies (id, title, release_date, rating, status, actor_ids, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(record.release_date.map(datetime_to_millis))
        .bind(record.rating)
        .bind(&record.status)
        .bind(vec_to_json(&record.actor_ids))
        .bind(now_iso8601())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate { id: record.id })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    async fn memory_store() -> SqliteMovieStore {
        // A single connection keeps the in-memory database alive for the whole test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteMovieStore::from_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let store = memory_store().await;
        let created = store
            .create(CreateMovie {
                title: "Dune".to_string(),
                release_date: millis_to_datetime_opt(Some(1974668800000)).unwrap(),
                rating: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();

        let found = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Dune");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order_and_actor_ids() {
        let store = memory_store().await;
        for (title, actors) in [
            ("Aladdin", vec!["williams"]),
            ("Hook", vec!["williams", "ghost", "williams"]),
        ] {
            store
                .create(CreateMovie {
                    title: title.to_string(),
                    status: Some("WATCHED".to_string()),
                    actor_ids: actors.into_iter().map(String::from).collect(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let movies = store.find_all().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Aladdin");
        assert_eq!(movies[1].actor_ids, vec!["williams", "ghost", "williams"]);
        assert_eq!(movies[1].status.as_deref(), Some("WATCHED"));
    }

    #[tokio::test]
    async fn test_created_record_matches_persisted_row() {
        let store = memory_store().await;
        let precise = chrono::DateTime::parse_from_rfc3339("1992-11-25T00:00:00.000500Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let created = store
            .create(CreateMovie {
                title: "Aladdin".to_string(),
                release_date: Some(precise),
                ..Default::default()
            })
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert!(all.contains(&created), "{created:?} not in {all:?}");
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let store = memory_store().await;
        assert_eq!(store.find_by_id("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let store = memory_store().await;
        let input = CreateMovie {
            id: Some("dup".to_string()),
            title: "Twice".to_string(),
            ..Default::default()
        };
        store.create(input.clone()).await.unwrap();
        let err = store.create(input).await.unwrap_err();
        assert_matches!(err, StoreError::Duplicate { id } if id == "dup");
    }

    #[tokio::test]
    async fn test_corrupt_actor_ids_surface_as_error() {
        let store = memory_store().await;
        sqlx::query(
            "INSERT INTO movies (id, title, actor_ids, created_at) VALUES ('bad', 'Broken', 'not json', '')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store.find_all().await.unwrap_err();
        assert_matches!(err, StoreError::Corrupt { id, .. } if id == "bad");
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let store = memory_store().await;
        store.pool().close().await;
        let err = store.find_all().await.unwrap_err();
        assert_matches!(err, StoreError::Unavailable(_));
    }
}
