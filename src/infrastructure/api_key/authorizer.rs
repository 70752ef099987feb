//! Request authorization pipeline
//!
//! Resolves a presented API key to an identity, applies the quota window
//! reset, enforces the per-key limit with an atomic consume, and returns the
//! authenticated identity. Store access is bounded by a timeout; a store that
//! cannot answer is never treated as success.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::api_key::KeyStore;
use crate::domain::audit::mask_api_key;
use crate::domain::user::{Identity, UserRepository};
use crate::domain::DomainError;

/// Default bound on a single store call
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Terminal authorization failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("API key required")]
    MissingKey,

    #[error("Invalid API key")]
    UnknownKey,

    #[error("API key disabled")]
    DisabledKey,

    #[error("Rate limit exceeded")]
    QuotaExceeded,

    #[error("Key store unavailable")]
    StoreUnavailable,
}

/// Authorization service over the key store and user repository
#[derive(Debug, Clone)]
pub struct Authorizer {
    keys: Arc<dyn KeyStore>,
    users: Arc<dyn UserRepository>,
    store_timeout: Duration,
}

impl Authorizer {
    pub fn new(keys: Arc<dyn KeyStore>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            keys,
            users,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Run the full pipeline for a presented key.
    ///
    /// Order matters: a missing key never touches the store, a disabled key
    /// never consumes or resets quota, and the limit check plus consume is a
    /// single atomic store operation.
    pub async fn authorize(&self, presented: Option<&str>) -> Result<Identity, AuthError> {
        let key = match presented.map(str::trim) {
            None | Some("") => return Err(AuthError::MissingKey),
            Some(key) => key,
        };

        debug!(key = %mask_api_key(key), "Authorizing request");

        let record = self
            .bounded("find_by_key", self.keys.find_by_key(key))
            .await?
            .ok_or(AuthError::UnknownKey)?;

        if !record.is_valid() {
            return Err(AuthError::DisabledKey);
        }

        self.bounded("reset_if_due", self.keys.reset_if_due(key, Utc::now()))
            .await?;

        let permitted = self
            .bounded(
                "increment_if_under_limit",
                self.keys.increment_if_under_limit(key),
            )
            .await?;
        if !permitted {
            debug!(key = %mask_api_key(key), "Quota exhausted");
            return Err(AuthError::QuotaExceeded);
        }

        let owner = self
            .bounded("find_user", self.users.find(record.owner_user_id()))
            .await?
            .ok_or_else(|| {
                warn!(
                    owner = %record.owner_user_id(),
                    "API key references a missing owner"
                );
                AuthError::StoreUnavailable
            })?;

        Ok(owner.identity())
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!(%operation, %error, "Key store error during authorization");
                Err(AuthError::StoreUnavailable)
            }
            Err(_) => {
                warn!(%operation, timeout_ms = self.store_timeout.as_millis() as u64, "Key store call timed out");
                Err(AuthError::StoreUnavailable)
            }
        }
    }
}
