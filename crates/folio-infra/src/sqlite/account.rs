//! SQLite account repository: users and hashed API tokens.

use chrono::Utc;
use folio_core::repository::account::AccountRepository;
use folio_types::account::{ApiToken, User};
use folio_types::error::RepositoryError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

#[derive(Clone)]
pub struct SqliteAccountRepository {
    pool: DatabasePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    email: String,
    display_name: String,
    is_staff: bool,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            is_staff: row.try_get("is_staff")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
            email: self.email,
            display_name: self.display_name,
            is_staff: self.is_staff,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

impl AccountRepository for SqliteAccountRepository {
    async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, email, display_name, is_staff, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.is_staff)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::Conflict(format!("email '{}' already registered", user.email))
            } else {
                query_error(e)
            }
        })?;

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.map(|row| UserRow::from_row(&row).map_err(query_error)?.into_user())
            .transpose()
    }

    async fn create_token(&self, token: &ApiToken) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO api_tokens (id, user_id, key_hash, created_at, last_used_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.key_hash)
        .bind(format_datetime(&token.created_at))
        .bind(token.last_used_at.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::Conflict("token hash already exists".to_string())
            } else {
                query_error(e)
            }
        })?;

        Ok(())
    }

    async fn find_user_by_token_hash(&self, key_hash: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT u.* FROM users u
               JOIN api_tokens t ON t.user_id = u.id
               WHERE t.key_hash = ?"#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        row.map(|row| UserRow::from_row(&row).map_err(query_error)?.into_user())
            .transpose()
    }

    async fn touch_token(&self, key_hash: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE api_tokens SET last_used_at = ? WHERE key_hash = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(key_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
