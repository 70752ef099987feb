//! Postgres service registry implementation

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::registry::{ServiceRecord, ServiceRegistry, ServiceStatus};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PostgresServiceRegistry {
    pool: PgPool,
}

impl PostgresServiceRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRegistry for PostgresServiceRegistry {
    async fn list(
        &self,
        status: Option<ServiceStatus>,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        // The filter is always bound as a parameter, never interpolated.
        let rows = match status {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT id, name, status, base_url
                    FROM services
                    WHERE status = $1
                    ORDER BY id
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, status, base_url
                    FROM services
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(e.to_string()))?;

        let mut services = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row
                .try_get("id")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let name: String = row
                .try_get("name")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let status: String = row
                .try_get("status")
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let base_url: String = row
                .try_get("base_url")
                .map_err(|e| DomainError::storage(e.to_string()))?;

            let status = ServiceStatus::parse(&status).ok_or_else(|| {
                DomainError::storage(format!("unknown service status '{status}'"))
            })?;

            services.push(ServiceRecord::new(id, name, status, base_url));
        }

        Ok(services)
    }
}
