//! Integration tests for the HTTP surface
//!
//! Requests go through the full axum router, so the request context
//! builder and the health probes are exercised as a client would see them.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use cinegraph::config::Config;
use cinegraph::db::{InMemoryMovieStore, MovieStore};
use cinegraph::{AppState, api};

fn app() -> (axum::Router, Arc<InMemoryMovieStore>) {
    let store = Arc::new(InMemoryMovieStore::with_demo_movies());
    let state = AppState::new(Arc::new(Config::in_memory()), store.clone());
    (api::router(state), store)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn graphql_post(query: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_readyz_reports_store() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ready": true, "store": true }));
}

#[tokio::test]
async fn test_query_over_http() {
    let (app, _) = app();
    let response = app
        .oneshot(graphql_post("{ movies { title } }"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!({ "movies": [{ "title": "Aladdin" }, { "title": "Hacksaw Ridge" }] })
    );
}

#[tokio::test]
async fn test_http_requests_carry_stub_identity() {
    let (app, store) = app();
    let response = app
        .oneshot(graphql_post(
            r#"mutation { addMovie(movie: { title: "Jumanji" }) { title } }"#,
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    assert_eq!(store.len(), 3);
    let titles: Vec<_> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles.last().map(String::as_str), Some("Jumanji"));
}

#[tokio::test]
async fn test_graphiql_only_for_browsers() {
    let (app, _) = app();
    let browser = app
        .clone()
        .oneshot(
            Request::get("/graphql")
                .header(header::ACCEPT, "text/html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(browser.status(), StatusCode::OK);

    let api_client = app
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(api_client.status(), StatusCode::METHOD_NOT_ALLOWED);
}
