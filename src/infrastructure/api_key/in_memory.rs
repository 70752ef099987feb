//! In-memory key store implementation
//!
//! Default backend for development and tests. All quota mutations happen
//! under a single write guard, which gives the same atomicity the Postgres
//! backend gets from conditional updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{quota, ApiKeyRecord, KeyStore};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    records: Arc<RwLock<HashMap<String, ApiKeyRecord>>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ApiKeyRecord>) -> Self {
        let map: HashMap<String, ApiKeyRecord> = records
            .into_iter()
            .map(|r| (r.key().to_string(), r))
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, record: ApiKeyRecord) {
        self.records
            .write()
            .await
            .insert(record.key().to_string(), record);
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn reset_if_due(&self, key: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(key) {
            if quota::due_for_reset(record.last_reset(), now) {
                record.apply_reset(now);
            }
        }
        Ok(())
    }

    async fn increment_if_under_limit(&self, key: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(record) if record.under_limit() => {
                record.record_call();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
