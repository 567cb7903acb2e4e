use std::env;

use sqlx::postgres::PgConnectOptions;

pub mod cors;

pub use cors::create_cors_layer;

/// Database connection parameters, read from the environment. Every value
/// has a default so the service comes up in the standard deployment without
/// any configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
  pub host: String,
  pub user: String,
  pub password: String,
  pub database: String,
}

impl DbConfig {
  pub fn from_env() -> Self {
    Self {
      host: env::var("DB_HOST").unwrap_or_else(|_| "db".to_string()),
      user: env::var("DB_USER").unwrap_or_else(|_| "root".to_string()),
      password: env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string()),
      database: env::var("DB_NAME").unwrap_or_else(|_| "appdb".to_string()),
    }
  }

  pub fn connect_options(&self) -> PgConnectOptions {
    PgConnectOptions::new()
      .host(&self.host)
      .username(&self.user)
      .password(&self.password)
      .database(&self.database)
  }
}
