//! Audit recorder
//!
//! Best-effort front for the audit store: a failed append is reported to the
//! operational log and never aborts or reverses the request it describes.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::audit::{AuditEntry, AuditStore};
use crate::domain::DomainError;

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
    store_timeout: Duration,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Append one entry, bounded by the store timeout. Failures degrade to a
    /// warning; the response path is never held up beyond the attempt.
    pub async fn record(&self, entry: AuditEntry) {
        let endpoint = entry.endpoint.clone();
        match tokio::time::timeout(self.store_timeout, self.store.append(entry)).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                warn!(%endpoint, %error, "Failed to persist audit entry");
            }
            Err(_) => {
                warn!(%endpoint, "Audit append timed out");
            }
        }
    }

    /// All entries, newest first
    pub async fn list(&self) -> Result<Vec<AuditEntry>, DomainError> {
        match tokio::time::timeout(self.store_timeout, self.store.list()).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::timeout("audit list")),
        }
    }
}
