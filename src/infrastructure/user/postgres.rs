//! Postgres user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::user::{PermissionLevel, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let last_login: Option<DateTime<Utc>> = row
        .try_get("last_login")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let is_active: bool = row
        .try_get("is_active")
        .map_err(|e| DomainError::storage(e.to_string()))?;
    let permission: String = row
        .try_get("permission_level")
        .map_err(|e| DomainError::storage(e.to_string()))?;

    let permission_level = PermissionLevel::parse(&permission).ok_or_else(|| {
        DomainError::storage(format!("unknown permission level '{permission}'"))
    })?;

    Ok(User {
        id: UserId::new(id),
        username,
        email,
        created_at,
        last_login,
        is_active,
        permission_level,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, created_at, last_login, is_active, permission_level
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, created_at, last_login, is_active, permission_level
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        rows.iter().map(user_from_row).collect()
    }
}
