use std::sync::Arc;

use crate::db::ConnectionProvider;
use crate::domains::user::{
  model::User,
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn list_users(&self) -> impl std::future::Future<Output = Result<Vec<User>, UserServiceError>> + Send;
  fn create_user(
    &self,
    name: &str,
    email: &str,
  ) -> impl std::future::Future<Output = Result<i32, UserServiceError>> + Send;
  fn delete_user(&self, id: i32) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<UserServiceImpl>,
}

impl SharedAppState {
  pub fn new(provider: ConnectionProvider) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(Arc::new(provider)));

    Self { user_service }
  }
}

impl AppState for SharedAppState {
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn create_user(&self, name: &str, email: &str) -> Result<i32, UserServiceError> {
    self.user_service.create_user(name, email).await
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    self.user_service.delete_user(id).await
  }
}
