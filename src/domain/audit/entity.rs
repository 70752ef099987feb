//! Audit entry entity and key masking

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Characters of the raw key revealed when an entry is rendered
pub const MASK_PREFIX_LEN: usize = 6;

/// Marker appended after the revealed prefix
pub const MASK_MARKER: &str = "***";

/// Immutable record of a single request's outcome. One entry is written per
/// request, success or failure, and entries are never mutated or deleted.
///
/// The raw key is kept for correlation; it is deliberately not serializable.
/// Every response-producing boundary goes through [`AuditEntryView`], which
/// carries only the masked form.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Uuid,
    pub api_key: Option<String>,
    pub endpoint: String,
    pub response_code: u16,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub error_message: Option<String>,
}

impl AuditEntry {
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        response_code: u16,
        response_time_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            api_key,
            endpoint: endpoint.into(),
            response_code,
            response_time_ms,
            timestamp: Utc::now(),
            error_message: None,
        }
    }

    pub fn with_error(mut self, error_message: Option<String>) -> Self {
        self.error_message = error_message;
        self
    }

    /// Masked rendering of the entry for response payloads
    pub fn to_view(&self) -> AuditEntryView {
        AuditEntryView {
            id: self.id,
            api_key: self.api_key.as_deref().map(mask_api_key),
            endpoint: self.endpoint.clone(),
            response_code: self.response_code,
            response_time_ms: self.response_time_ms,
            timestamp: self.timestamp,
            error_message: self.error_message.clone(),
        }
    }
}

/// Serializable audit entry with the key masked
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntryView {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub response_code: u16,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Redact an API key for display: a short literal prefix plus a fixed marker,
/// never the full secret.
pub fn mask_api_key(key: &str) -> String {
    let prefix: String = key.chars().take(MASK_PREFIX_LEN).collect();
    format!("{prefix}{MASK_MARKER}")
}
