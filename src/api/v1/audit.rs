//! Audit trail listing handler

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::middleware::{Authorized, ReadAccess};
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::audit::AuditEntryView;

/// GET /api/audit
///
/// Any authenticated caller may read the trail; entries go through the
/// masked view so the raw key never reaches a response payload.
pub async fn list_audit_log(
    State(state): State<AppState>,
    auth: Authorized<ReadAccess>,
) -> Result<Json<Vec<AuditEntryView>>, ApiError> {
    debug!(user = %auth.identity().user_id, "Listing audit log");

    let entries = state.audit.list().await.map_err(ApiError::from)?;

    Ok(Json(entries.iter().map(|e| e.to_view()).collect()))
}
