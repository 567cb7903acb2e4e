use std::time::Duration;

use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde_json::{json, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tower::ServiceExt;

use roster_api::app::create_app;
use roster_api::db::{ConnectionProvider, RetryPolicy};
use roster_api::domains::user::model::{User, UserCreatedResponse, UserDeletedResponse};
use roster_api::state::SharedAppState;

fn app_from_options(options: PgConnectOptions) -> Router {
  let retry = RetryPolicy {
    max_attempts: 3,
    delay: Duration::from_millis(100),
  };
  let provider = ConnectionProvider::with_options(options, retry);
  create_app(SharedAppState::new(provider))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Bytes) {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header("content-type", "application/json");
  }

  let request = builder
    .body(body.map(|value| Body::from(value.to_string())).unwrap_or_else(Body::empty))
    .expect("build request");

  let response = app.clone().oneshot(request).await.expect("handle request");
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, bytes)
}

async fn create_user(app: &Router, name: &str, email: &str) -> UserCreatedResponse {
  let (status, body) = send(app, "POST", "/api/users", Some(json!({ "name": name, "email": email }))).await;
  assert_eq!(status, StatusCode::CREATED);
  serde_json::from_slice(&body).expect("deserialize create response")
}

async fn list_users(app: &Router) -> Vec<User> {
  let (status, body) = send(app, "GET", "/api/users", None).await;
  assert_eq!(status, StatusCode::OK);
  serde_json::from_slice(&body).expect("deserialize user list")
}

#[sqlx::test(migrations = "./migrations")]
async fn create_user_persists_and_returns_id(_pool_opts: PgPoolOptions, options: PgConnectOptions) {
  let app = app_from_options(options);

  let created = create_user(&app, "Alice", "alice@example.com").await;
  assert_eq!(created.message, "User added successfully");
  assert!(created.id > 0);

  let users = list_users(&app).await;
  assert_eq!(users.len(), 1);
  assert_eq!(users[0].id, created.id);
  assert_eq!(users[0].name, "Alice");
  assert_eq!(users[0].email, "alice@example.com");
  assert!(users[0].created_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_orders_newest_first(_pool_opts: PgPoolOptions, options: PgConnectOptions) {
  let app = app_from_options(options);

  let alice = create_user(&app, "Alice", "alice@example.com").await;
  let bob = create_user(&app, "Bob", "bob@example.com").await;

  let users = list_users(&app).await;
  assert_eq!(users.len(), 2);
  assert_eq!(users[0].id, bob.id);
  assert_eq!(users[1].id, alice.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_exactly_one_user(_pool_opts: PgPoolOptions, options: PgConnectOptions) {
  let app = app_from_options(options);

  let alice = create_user(&app, "Alice", "alice@example.com").await;
  let bob = create_user(&app, "Bob", "bob@example.com").await;

  let (status, body) = send(&app, "DELETE", &format!("/api/users/{}", alice.id), None).await;
  assert_eq!(status, StatusCode::OK);
  let deleted: UserDeletedResponse = serde_json::from_slice(&body).expect("deserialize delete response");
  assert_eq!(deleted.message, "User deleted successfully");

  let users = list_users(&app).await;
  assert_eq!(users.len(), 1);
  assert_eq!(users[0].id, bob.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_of_missing_user_still_succeeds(_pool_opts: PgPoolOptions, options: PgConnectOptions) {
  let app = app_from_options(options);

  let (status, body) = send(&app, "DELETE", "/api/users/4242", None).await;
  assert_eq!(status, StatusCode::OK);
  let deleted: UserDeletedResponse = serde_json::from_slice(&body).expect("deserialize delete response");
  assert_eq!(deleted.message, "User deleted successfully");
}

#[sqlx::test(migrations = "./migrations")]
async fn rejected_create_leaves_store_unchanged(_pool_opts: PgPoolOptions, options: PgConnectOptions) {
  let app = app_from_options(options);

  let (status, _) = send(&app, "POST", "/api/users", Some(json!({ "email": "alice@example.com" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  assert!(list_users(&app).await.is_empty());
}
