//! In-memory audit log implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::audit::{AuditEntry, AuditStore};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AuditEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().cloned().collect())
    }
}
