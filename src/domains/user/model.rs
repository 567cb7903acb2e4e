use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
pub struct User {
  pub id: i32,
  pub name: String,
  pub email: String,
  pub created_at: Option<DateTime<Utc>>,
}

/// Both fields are optional at the wire level so the handler can reject an
/// incomplete body itself instead of letting deserialization do it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateUserRequest {
  pub name: Option<String>,
  pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserCreatedResponse {
  pub message: String,
  pub id: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserDeletedResponse {
  pub message: String,
}

impl User {
  pub async fn list_all<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"SELECT id, name, email, created_at FROM users ORDER BY created_at DESC"#,
    )
    .fetch_all(executor)
    .await
  }

  pub async fn insert<'e, E>(executor: E, name: &str, email: &str) -> Result<i32, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let (id,): (i32,) = sqlx::query_as(
      r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id
            "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(executor)
    .await?;

    Ok(id)
  }

  /// Deleting an id that does not exist is not an error; the caller only
  /// learns how many rows went away.
  pub async fn delete_by_id<'e, E>(executor: E, id: i32) -> Result<u64, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected())
  }
}
