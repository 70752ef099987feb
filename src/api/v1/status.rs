//! System status handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: ComponentStatus,
    pub version: String,
    pub components: Vec<ComponentCheck>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// GET /api/status
///
/// Unauthenticated. Probes the stores the pipeline depends on and reports a
/// coarse ok/degraded summary; store errors are reflected as degraded, never
/// echoed in detail.
pub async fn system_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut components = Vec::with_capacity(2);
    let mut overall = ComponentStatus::Ok;

    let audit_check = match state.audit.list().await {
        Ok(entries) => ComponentCheck {
            name: "audit_store",
            status: ComponentStatus::Ok,
            detail: Some(format!("{} entries", entries.len())),
        },
        Err(_) => ComponentCheck {
            name: "audit_store",
            status: ComponentStatus::Degraded,
            detail: None,
        },
    };
    if audit_check.status != ComponentStatus::Ok {
        overall = ComponentStatus::Degraded;
    }
    components.push(audit_check);

    let registry_check = match state.services.list(None).await {
        Ok(services) => ComponentCheck {
            name: "service_registry",
            status: ComponentStatus::Ok,
            detail: Some(format!("{} services", services.len())),
        },
        Err(_) => ComponentCheck {
            name: "service_registry",
            status: ComponentStatus::Degraded,
            detail: None,
        },
    };
    if registry_check.status != ComponentStatus::Ok {
        overall = ComponentStatus::Degraded;
    }
    components.push(registry_check);

    Json(StatusResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        components,
        timestamp: Utc::now(),
    })
}
