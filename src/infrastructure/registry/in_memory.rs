//! In-memory service registry implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::registry::{ServiceRecord, ServiceRegistry, ServiceStatus};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryServiceRegistry {
    services: Arc<RwLock<Vec<ServiceRecord>>>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(services: Vec<ServiceRecord>) -> Self {
        Self {
            services: Arc::new(RwLock::new(services)),
        }
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn list(
        &self,
        status: Option<ServiceStatus>,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        let services = self.services.read().await;
        Ok(services
            .iter()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect())
    }
}
