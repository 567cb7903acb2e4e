use axum::{
  extract::{Json, Path, State},
  http::StatusCode,
  response::Json as JsonResponse,
  routing::{delete, get, Router},
};

use super::model::{CreateUserRequest, User, UserCreatedResponse, UserDeletedResponse};
use super::service::UserServiceError;
use crate::state::{AppState, SharedAppState};
use crate::AppError;

fn map_user_service_error(e: UserServiceError) -> AppError {
  match e {
    UserServiceError::ConnectionFailed => AppError::internal_server_error("Database connection failed"),
    UserServiceError::Database(msg) => AppError::internal_server_error(msg),
  }
}

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", get(list_users_handler).post(create_user_handler))
    .route("/users/{id}", delete(delete_user_handler))
}

async fn list_users_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<Vec<User>>, AppError> {
  state.list_users().await.map(JsonResponse).map_err(map_user_service_error)
}

async fn create_user_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, JsonResponse<UserCreatedResponse>), AppError> {
  let name = payload.name.filter(|name| !name.is_empty());
  let email = payload.email.filter(|email| !email.is_empty());

  let (name, email) = match (name, email) {
    (Some(name), Some(email)) => (name, email),
    _ => return Err(AppError::bad_request("Name and email are required")),
  };

  let id = state
    .create_user(&name, &email)
    .await
    .map_err(map_user_service_error)?;

  Ok((
    StatusCode::CREATED,
    JsonResponse(UserCreatedResponse {
      message: "User added successfully".to_string(),
      id,
    }),
  ))
}

async fn delete_user_handler(
  State(state): State<SharedAppState>,
  Path(id): Path<i32>,
) -> Result<JsonResponse<UserDeletedResponse>, AppError> {
  state.delete_user(id).await.map_err(map_user_service_error)?;

  Ok(JsonResponse(UserDeletedResponse {
    message: "User deleted successfully".to_string(),
  }))
}
