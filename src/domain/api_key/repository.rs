//! Key store trait
//!
//! The store is the only holder of quota state; multiple gateway instances
//! may share one store, so the check-and-increment is a single atomic
//! operation here rather than a read-modify-write at the call site.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::ApiKeyRecord;
use crate::domain::DomainError;

/// Durable store of API key records
#[async_trait]
pub trait KeyStore: Send + Sync + Debug {
    /// Look up a record by the presented secret. `Ok(None)` means the key
    /// does not exist; errors mean the store could not answer.
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, DomainError>;

    /// Zero the key's consumption counter if its window has elapsed at `now`.
    /// Idempotent: redundant concurrent calls apply at most one reset per
    /// window. A missing key is a no-op.
    async fn reset_if_due(&self, key: &str, now: DateTime<Utc>) -> Result<(), DomainError>;

    /// Atomically consume one call if the key is under its limit. Returns
    /// `true` when the call was accounted, `false` when the quota is
    /// exhausted. Concurrent callers can never all pass the limit.
    async fn increment_if_under_limit(&self, key: &str) -> Result<bool, DomainError>;
}
