//! Service registry trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ServiceRecord, ServiceStatus};
use crate::domain::DomainError;

/// Read-side registry of downstream services
#[async_trait]
pub trait ServiceRegistry: Send + Sync + Debug {
    /// List registered services, optionally filtered by status
    async fn list(
        &self,
        status: Option<ServiceStatus>,
    ) -> Result<Vec<ServiceRecord>, DomainError>;
}
