use axum::{response::Json as JsonResponse, routing::get, Router};
use serde::Serialize;

use crate::{
  config::create_cors_layer,
  domains::user::rest::user_routes,
  state::SharedAppState,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
  pub message: &'static str,
}

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .nest("/api", health_routes().merge(user_routes()))
    .layer(create_cors_layer())
    .with_state(state)
}

fn health_routes() -> Router<SharedAppState> {
  Router::new().route("/health", get(health_handler))
}

/// Liveness probe only; deliberately answers without consulting the store.
pub async fn health_handler() -> JsonResponse<HealthResponse> {
  JsonResponse(HealthResponse {
    status: "healthy",
    message: "Backend is running",
  })
}
