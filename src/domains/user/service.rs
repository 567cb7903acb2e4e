use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

use sqlx::Connection;

use super::model::User;
use crate::db::ConnectionProvider;

#[derive(Debug)]
pub enum UserServiceError {
  ConnectionFailed,
  Database(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ConnectionFailed => write!(f, "Database connection failed"),
      UserServiceError::Database(msg) => write!(f, "Database error: {}", msg),
    }
  }
}

impl From<sqlx::Error> for UserServiceError {
  fn from(err: sqlx::Error) -> Self {
    UserServiceError::Database(err.to_string())
  }
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError>;
  async fn create_user(&self, name: &str, email: &str) -> Result<i32, UserServiceError>;
  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError>;
}

/// Each operation acquires its own connection from the provider, runs a
/// single statement, and closes the connection before reporting the result.
pub struct UserServiceImpl {
  provider: Arc<ConnectionProvider>,
}

impl UserServiceImpl {
  pub fn new(provider: Arc<ConnectionProvider>) -> Self {
    Self { provider }
  }
}

#[async_trait]
impl UserService for UserServiceImpl {
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    let mut conn = self
      .provider
      .acquire()
      .await
      .map_err(|_| UserServiceError::ConnectionFailed)?;

    let result = User::list_all(&mut conn).await;
    conn.close().await.ok();

    Ok(result?)
  }

  async fn create_user(&self, name: &str, email: &str) -> Result<i32, UserServiceError> {
    let mut conn = self
      .provider
      .acquire()
      .await
      .map_err(|_| UserServiceError::ConnectionFailed)?;

    let result = User::insert(&mut conn, name, email).await;
    conn.close().await.ok();

    Ok(result?)
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    let mut conn = self
      .provider
      .acquire()
      .await
      .map_err(|_| UserServiceError::ConnectionFailed)?;

    let result = User::delete_by_id(&mut conn, id).await;
    conn.close().await.ok();

    result?;
    Ok(())
  }
}
