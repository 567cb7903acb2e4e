use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use sqlx::postgres::PgConnectOptions;
use tower::ServiceExt;

use crate::app::create_app;
use crate::db::{ConnectionProvider, RetryPolicy};
use crate::state::SharedAppState;

pub fn app_with_provider(provider: ConnectionProvider) -> Router {
  create_app(SharedAppState::new(provider))
}

/// An app whose provider points at a port nothing listens on; store-touching
/// requests burn the given retry budget and fail.
pub fn unreachable_app(retry: RetryPolicy) -> Router {
  let options = PgConnectOptions::new()
    .host("127.0.0.1")
    .port(1)
    .username("nobody")
    .database("nowhere");

  app_with_provider(ConnectionProvider::with_options(options, retry))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, "GET", uri, None).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let bytes = serde_json::to_vec(body).expect("serialize request body");
  send(app, "POST", uri, Some(bytes)).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, "DELETE", uri, None).await
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Vec<u8>>) -> (StatusCode, Bytes) {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header("content-type", "application/json");
  }

  let request = builder
    .body(body.map(Body::from).unwrap_or_else(Body::empty))
    .expect("build request");

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}
