//! Conversions between store records and GraphQL types, and error helpers

use async_graphql::{ErrorExtensions, ID};

use crate::db::{CreateMovie, MovieRecord, StoreError};
use crate::services::ActorRecord;

use super::scalars::Date;
use super::types::{Actor, Movie, MovieInput, MovieStatus};

/// Error code for store failures
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
/// Error code for a missing identity claim
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
/// Error code for invalid mutation input
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

/// Build an error carrying a `code` extension
pub fn coded_error(message: impl Into<String>, code: &'static str) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

/// Surface a store failure to the caller, never as empty data.
///
/// A reused movie id is the caller's mistake and is reported as bad input;
/// every other store error is an outage.
pub fn store_error(err: StoreError) -> async_graphql::Error {
    match err {
        StoreError::Duplicate { .. } => {
            tracing::warn!(error = %err, "Rejected movie with an existing id");
            coded_error(err.to_string(), BAD_USER_INPUT)
        }
        _ => {
            tracing::error!(error = %err, "Movie store operation failed");
            coded_error(err.to_string(), STORE_UNAVAILABLE)
        }
    }
}

pub fn movie_record_to_graphql(record: MovieRecord) -> Movie {
    Movie {
        id: ID::from(record.id),
        title: record.title,
        release_date: record.release_date.map(Date::from),
        rating: record.rating,
        status: record.status.as_deref().map(MovieStatus::from_stored),
        actor_ids: record.actor_ids,
    }
}

pub fn actor_record_to_graphql(record: ActorRecord) -> Actor {
    Actor {
        id: ID::from(record.id),
        name: record.name,
    }
}

/// Validate mutation input and turn it into a store create request.
///
/// A title is required and must not be blank. Actor inputs without an id are
/// dropped; order and duplicates of the rest are kept.
pub fn movie_input_to_create(input: MovieInput) -> async_graphql::Result<CreateMovie> {
    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| coded_error("Movie title is required", BAD_USER_INPUT))?;

    let actor_ids = input
        .actor
        .unwrap_or_default()
        .into_iter()
        .filter_map(|actor| actor.id.map(|id| id.0))
        .collect();

    Ok(CreateMovie {
        id: input.id.map(|id| id.0),
        title,
        release_date: input.release_date.and_then(|d| d.timestamp()),
        rating: input.rating,
        status: input.status.map(|s| s.as_str().to_string()),
        actor_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::types::ActorInput;

    fn error_code(err: &async_graphql::Error) -> Option<async_graphql::Value> {
        err.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned()
    }

    #[test]
    fn test_title_is_required() {
        let err = movie_input_to_create(MovieInput::default()).unwrap_err();
        assert_eq!(error_code(&err), Some(BAD_USER_INPUT.into()));

        let blank = MovieInput {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(movie_input_to_create(blank).is_err());
    }

    #[test]
    fn test_actor_ids_keep_order_and_duplicates() {
        let input = MovieInput {
            title: Some("Hook".to_string()),
            status: Some(MovieStatus::Interested),
            actor: Some(vec![
                ActorInput { id: Some(ID::from("williams")) },
                ActorInput { id: None },
                ActorInput { id: Some(ID::from("ghost")) },
                ActorInput { id: Some(ID::from("williams")) },
            ]),
            ..Default::default()
        };
        let create = movie_input_to_create(input).unwrap();
        assert_eq!(create.title, "Hook");
        assert_eq!(create.status.as_deref(), Some("INTERESTED"));
        assert_eq!(create.actor_ids, vec!["williams", "ghost", "williams"]);
        assert_eq!(create.id, None);
    }

    #[test]
    fn test_record_conversion() {
        let movie = movie_record_to_graphql(MovieRecord {
            id: "7".to_string(),
            title: "Se7en".to_string(),
            release_date: None,
            rating: Some(4),
            status: Some("NOT_INTERESTED".to_string()),
            actor_ids: vec!["ghost".to_string()],
        });
        assert_eq!(movie.id, ID::from("7"));
        assert_eq!(movie.status, Some(MovieStatus::NotInterested));
        assert_eq!(movie.actor_ids, vec!["ghost"]);
    }

    #[test]
    fn test_store_error_is_coded() {
        let err = store_error(StoreError::Unavailable("connection refused".to_string()));
        assert!(err.message.contains("connection refused"));
        assert_eq!(error_code(&err), Some(STORE_UNAVAILABLE.into()));

        let corrupt = store_error(StoreError::Corrupt {
            id: "7".to_string(),
            reason: "bad json".to_string(),
        });
        assert_eq!(error_code(&corrupt), Some(STORE_UNAVAILABLE.into()));
    }

    #[test]
    fn test_duplicate_is_bad_input() {
        let err = store_error(StoreError::Duplicate { id: "1".to_string() });
        assert!(err.message.contains("movie 1 already exists"));
        assert_eq!(error_code(&err), Some(BAD_USER_INPUT.into()));
    }
}
