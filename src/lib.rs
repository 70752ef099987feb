//! Datahub Gateway
//!
//! A small HTTP gateway exposing data-management endpoints behind an API-key
//! authorization and per-key rate-limiting pipeline, with an append-only
//! audit trail of every request.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use config::StoreBackend;
use domain::api_key::ApiKeyRecord;
use domain::registry::{ServiceRecord, ServiceStatus};
use domain::user::{PermissionLevel, User, UserId};
use infrastructure::api_key::{Authorizer, InMemoryKeyStore, PostgresKeyStore};
use infrastructure::audit::{AuditRecorder, InMemoryAuditLog, PostgresAuditLog};
use infrastructure::registry::{InMemoryServiceRegistry, PostgresServiceRegistry};
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

/// Create the application state with the configured store backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store_timeout = Duration::from_millis(config.store.timeout_ms);

    match config.store.backend {
        StoreBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let keys = Arc::new(PostgresKeyStore::new(pool.clone()));
            let users = Arc::new(PostgresUserRepository::new(pool.clone()));
            let services = Arc::new(PostgresServiceRegistry::new(pool.clone()));
            let audit = Arc::new(PostgresAuditLog::new(pool));

            Ok(AppState::new(
                Authorizer::new(keys, users.clone()).with_store_timeout(store_timeout),
                AuditRecorder::new(audit).with_store_timeout(store_timeout),
                users,
                services,
            ))
        }
        StoreBackend::Memory => {
            info!("Using in-memory stores with seeded development data");

            let users = Arc::new(InMemoryUserRepository::with_users(default_users()));
            let keys = Arc::new(InMemoryKeyStore::with_records(default_api_keys()));
            let services = Arc::new(InMemoryServiceRegistry::with_services(default_services()));
            let audit = Arc::new(InMemoryAuditLog::new());

            Ok(AppState::new(
                Authorizer::new(keys, users.clone()).with_store_timeout(store_timeout),
                AuditRecorder::new(audit).with_store_timeout(store_timeout),
                users,
                services,
            ))
        }
    }
}

/// Development users for the in-memory backend
fn default_users() -> Vec<User> {
    vec![
        User::new(
            UserId::new(1),
            "dev-reader",
            "dev-reader@example.org",
            PermissionLevel::Read,
        ),
        User::new(
            UserId::new(2),
            "dev-writer",
            "dev-writer@example.org",
            PermissionLevel::Write,
        ),
        User::new(
            UserId::new(3),
            "dev-admin",
            "dev-admin@example.org",
            PermissionLevel::Admin,
        ),
    ]
}

/// Development keys for the in-memory backend. Real keys are provisioned
/// out-of-band in the durable store.
fn default_api_keys() -> Vec<ApiKeyRecord> {
    vec![
        ApiKeyRecord::new("dh_dev_read_000001", UserId::new(1), 1000),
        ApiKeyRecord::new("dh_dev_write_00001", UserId::new(2), 1000),
        ApiKeyRecord::new("dh_dev_admin_00001", UserId::new(3), 1000),
    ]
}

fn default_services() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord::new(1, "search", ServiceStatus::Up, "http://localhost:9200"),
        ServiceRecord::new(2, "exports", ServiceStatus::Up, "http://localhost:8082"),
    ]
}
