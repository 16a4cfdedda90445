//! Application configuration management

use std::env;

use anyhow::{Context, Result, bail};

/// Default listener port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 4000;

/// Default connection string when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cinegraph.db";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Store connection string. The scheme selects the store backend.
    pub database_url: String,

    /// Maximum pooled connections for the SQLite store
    pub database_max_connections: u32,

    /// Per-topic buffer for the event bus
    pub event_bus_capacity: usize,
}

/// Which movie store implementation a connection string selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store seeded with demo movies
    Memory,
    /// SQLite database at the given sqlx URL
    Sqlite(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("Invalid PORT")?,
            Err(_) => DEFAULT_PORT,
        };

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let event_bus_capacity = env::var("EVENT_BUS_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|capacity| *capacity > 0)
            .unwrap_or(256);

        Ok(Self {
            port,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections,
            event_bus_capacity,
        })
    }

    /// Configuration backed by the in-memory store, used by `--print-schema` and tests
    pub fn in_memory() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: "memory://".to_string(),
            database_max_connections: 1,
            event_bus_capacity: 256,
        }
    }

    /// Resolve the store backend from the connection string scheme
    pub fn store_backend(&self) -> Result<StoreBackend> {
        let url = self.database_url.trim();
        if url == "memory" || url.starts_with("memory://") {
            return Ok(StoreBackend::Memory);
        }
        if url.starts_with("sqlite:") {
            return Ok(StoreBackend::Sqlite(url.to_string()));
        }
        bail!("Unsupported DATABASE_URL scheme: {}", url)
    }
}
