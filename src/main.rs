//! Cinegraph server entry point
//!
//! All operations are exposed via GraphQL at /graphql.

use std::net::SocketAddr;
use std::sync::Arc;

use cinegraph::cli::CliOptions;
use cinegraph::config::Config;
use cinegraph::db::{self, InMemoryMovieStore};
use cinegraph::graphql::MovieEventBus;
use cinegraph::{AppState, api, services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let options = CliOptions::from_args();

    if options.print_schema {
        let state = AppState::new(
            Arc::new(Config::in_memory()),
            Arc::new(InMemoryMovieStore::new()),
        );
        println!("{}", state.schema.sdl());
        return Ok(());
    }

    services::init_tracing()?;

    let config = Arc::new(Config::from_env()?);
    tracing::info!("Starting Cinegraph");
    tracing::info!(port = config.port, "Configuration loaded");

    // The listener must not start until the store is confirmed healthy
    let store = match db::connect_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Could not connect to movie store");
            return Err(e);
        }
    };
    tracing::info!("Movie store connected");

    let state = AppState::new(config.clone(), store);
    let events = state.events.clone();
    tracing::info!("GraphQL schema built");

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(events))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl-C, then close the event bus so live subscriptions finish
async fn shutdown_signal(events: Arc<MovieEventBus>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
    events.shutdown();
}
