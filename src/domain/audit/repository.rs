//! Audit store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::AuditEntry;
use crate::domain::DomainError;

/// Append-only store of audit entries
#[async_trait]
pub trait AuditStore: Send + Sync + Debug {
    /// Append one entry. The pipeline never updates or deletes entries.
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError>;

    /// All entries, newest first
    async fn list(&self) -> Result<Vec<AuditEntry>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock audit store with failure injection
    #[derive(Debug, Default)]
    pub struct MockAuditStore {
        entries: Arc<RwLock<Vec<AuditEntry>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockAuditStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        pub async fn entries(&self) -> Vec<AuditEntry> {
            self.entries.read().await.clone()
        }
    }

    #[async_trait]
    impl AuditStore for MockAuditStore {
        async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock audit store configured to fail"));
            }
            self.entries.write().await.push(entry);
            Ok(())
        }

        async fn list(&self) -> Result<Vec<AuditEntry>, DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock audit store configured to fail"));
            }
            let mut entries = self.entries.read().await.clone();
            entries.reverse();
            Ok(entries)
        }
    }
}
