//! GraphQL object, input, and enum types

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Enum, ID, InputObject, SimpleObject};

use crate::services::ActorDirectory;

use super::helpers::actor_record_to_graphql;
use super::scalars::Date;

// ============================================================================
// Enums
// ============================================================================

/// Viewing status of a movie
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "Status")]
pub enum MovieStatus {
    Watched,
    Interested,
    NotInterested,
    Unknown,
}

impl MovieStatus {
    /// Stored text form, identical to the GraphQL enum value
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Watched => "WATCHED",
            MovieStatus::Interested => "INTERESTED",
            MovieStatus::NotInterested => "NOT_INTERESTED",
            MovieStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse the stored text form. Unrecognized text maps to `Unknown`.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "WATCHED" => MovieStatus::Watched,
            "INTERESTED" => MovieStatus::Interested,
            "NOT_INTERESTED" => MovieStatus::NotInterested,
            _ => MovieStatus::Unknown,
        }
    }
}

// ============================================================================
// Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Actor {
    pub id: ID,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct Movie {
    pub id: ID,
    pub title: String,
    pub release_date: Option<Date>,
    pub rating: Option<i32>,
    pub status: Option<MovieStatus>,
    /// Referenced actor ids, resolved through the actor directory
    #[graphql(skip)]
    pub actor_ids: Vec<String>,
}

#[ComplexObject]
impl Movie {
    /// Actors in this movie. Ids without a matching actor are left out.
    async fn actor(&self, ctx: &Context<'_>) -> Vec<Actor> {
        ctx.data_unchecked::<Arc<ActorDirectory>>()
            .matching(&self.actor_ids)
            .into_iter()
            .map(actor_record_to_graphql)
            .collect()
    }
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, Default, InputObject)]
pub struct ActorInput {
    pub id: Option<ID>,
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct MovieInput {
    pub id: Option<ID>,
    pub title: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<i32>,
    pub status: Option<MovieStatus>,
    pub actor: Option<Vec<ActorInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_round_trips() {
        for status in [
            MovieStatus::Watched,
            MovieStatus::Interested,
            MovieStatus::NotInterested,
            MovieStatus::Unknown,
        ] {
            assert_eq!(MovieStatus::from_stored(status.as_str()), status);
        }
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        assert_eq!(MovieStatus::from_stored("watched"), MovieStatus::Unknown);
        assert_eq!(MovieStatus::from_stored(""), MovieStatus::Unknown);
    }
}
