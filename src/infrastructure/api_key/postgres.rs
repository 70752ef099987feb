//! Postgres key store implementation
//!
//! Quota state lives in the `api_keys` table so multiple gateway instances
//! share one source of truth. Both quota mutations are conditional updates:
//! the database enforces the invariants, not the gateway process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::api_key::{quota, ApiKeyRecord, KeyStore};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PostgresKeyStore {
    pool: PgPool,
}

impl PostgresKeyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PostgresKeyStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT api_key, owner_user_id, is_valid, rate_limit, calls_made, last_reset
            FROM api_keys
            WHERE api_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let api_key: String = row
            .try_get("api_key")
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let owner: i64 = row
            .try_get("owner_user_id")
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let is_valid: bool = row
            .try_get("is_valid")
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let rate_limit: i32 = row
            .try_get("rate_limit")
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let calls_made: i32 = row
            .try_get("calls_made")
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let last_reset: DateTime<Utc> = row
            .try_get("last_reset")
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(Some(ApiKeyRecord::from_parts(
            api_key,
            UserId::new(owner),
            is_valid,
            rate_limit.max(0) as u32,
            calls_made.max(0) as u32,
            last_reset,
        )))
    }

    async fn reset_if_due(&self, key: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        // Conditioned on last_reset still being due: concurrent redundant
        // attempts zero the counter at most once per window.
        sqlx::query(
            r#"
            UPDATE api_keys
            SET calls_made = 0, last_reset = $2
            WHERE api_key = $1 AND last_reset <= $3
            "#,
        )
        .bind(key)
        .bind(now)
        .bind(quota::reset_cutoff(now))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(())
    }

    async fn increment_if_under_limit(&self, key: &str) -> Result<bool, DomainError> {
        // Single conditional update: the check and the increment cannot be
        // separated by a concurrent writer.
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET calls_made = calls_made + 1
            WHERE api_key = $1 AND calls_made < rate_limit
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
