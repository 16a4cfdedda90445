//! Tracing subscriber setup
//!
//! Console output is JSON so it can be shipped to a log collector as-is.
//! Filtering follows `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "cinegraph=debug,tower_http=debug,async_graphql=info";

/// Build the filter from `RUST_LOG`, or the default when it is unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns an error if one is already set.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;
    Ok(())
}
