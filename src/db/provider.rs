use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgConnection};

use crate::config::DbConfig;

/// Bounded retry for opening a connection: a fixed number of attempts with
/// a fixed delay between them. Injected at construction so tests can shrink
/// the budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
  pub max_attempts: u32,
  pub delay: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 30,
      delay: Duration::from_secs(1),
    }
  }
}

/// Returned once the whole retry budget is spent without a usable connection.
#[derive(Debug)]
pub struct ConnectionUnavailable {
  pub attempts: u32,
}

impl fmt::Display for ConnectionUnavailable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "database unavailable after {} connection attempts", self.attempts)
  }
}

impl std::error::Error for ConnectionUnavailable {}

/// Opens one connection per request. There is no pool: callers acquire a
/// connection, run their statement, and close it themselves.
pub struct ConnectionProvider {
  options: PgConnectOptions,
  retry: RetryPolicy,
}

impl ConnectionProvider {
  pub fn new(config: &DbConfig, retry: RetryPolicy) -> Self {
    Self::with_options(config.connect_options(), retry)
  }

  pub fn with_options(options: PgConnectOptions, retry: RetryPolicy) -> Self {
    Self { options, retry }
  }

  /// Attempts to open a connection, sleeping the configured delay after
  /// every failed attempt, the last one included.
  pub async fn acquire(&self) -> Result<PgConnection, ConnectionUnavailable> {
    for attempt in 1..=self.retry.max_attempts {
      match self.options.connect().await {
        Ok(conn) => return Ok(conn),
        Err(e) => {
          tracing::warn!(
            "Database connection attempt ({}/{}) failed: {}",
            attempt,
            self.retry.max_attempts,
            e
          );
          tokio::time::sleep(self.retry.delay).await;
        }
      }
    }

    Err(ConnectionUnavailable {
      attempts: self.retry.max_attempts,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Instant;

  fn unreachable_options() -> PgConnectOptions {
    // Port 1 is never listening, so every attempt fails fast.
    PgConnectOptions::new()
      .host("127.0.0.1")
      .port(1)
      .username("nobody")
      .database("nowhere")
  }

  #[tokio::test]
  async fn acquire_fails_after_full_retry_budget() {
    let retry = RetryPolicy {
      max_attempts: 2,
      delay: Duration::from_millis(50),
    };
    let provider = ConnectionProvider::with_options(unreachable_options(), retry);

    let started = Instant::now();
    let result = provider.acquire().await;
    let elapsed = started.elapsed();

    let err = result.err().expect("unreachable store must not yield a connection");
    assert_eq!(err.attempts, 2);
    assert!(
      elapsed >= Duration::from_millis(100),
      "gave up after {:?}, before the full retry delay elapsed",
      elapsed
    );
  }

  #[test]
  fn default_retry_policy_matches_deployment_budget() {
    let retry = RetryPolicy::default();
    assert_eq!(retry.max_attempts, 30);
    assert_eq!(retry.delay, Duration::from_secs(1));
  }
}
