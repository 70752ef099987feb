//! Postgres audit log implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::audit::{AuditEntry, AuditStore};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PostgresAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs
                (id, api_key, endpoint, response_code, response_time_ms, timestamp, error_message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.api_key)
        .bind(&entry.endpoint)
        .bind(entry.response_code as i32)
        .bind(entry.response_time_ms as i64)
        .bind(entry.timestamp)
        .bind(&entry.error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<AuditEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, api_key, endpoint, response_code, response_time_ms, timestamp, error_message
            FROM audit_logs
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row
                .try_get("id")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let api_key: Option<String> = row
                .try_get("api_key")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let endpoint: String = row
                .try_get("endpoint")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let response_code: i32 = row
                .try_get("response_code")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let response_time_ms: i64 = row
                .try_get("response_time_ms")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let timestamp: DateTime<Utc> = row
                .try_get("timestamp")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let error_message: Option<String> = row
                .try_get("error_message")
                .map_err(|e| DomainError::storage(e.to_string()))?;

            entries.push(AuditEntry {
                id,
                api_key,
                endpoint,
                response_code: response_code.clamp(0, u16::MAX as i32) as u16,
                response_time_ms: response_time_ms.max(0) as u64,
                timestamp,
                error_message,
            });
        }

        Ok(entries)
    }
}
