//! Service listing handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::registry::{ServiceRecord, ServiceStatus};

#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    status: Option<String>,
}

/// GET /api/services
///
/// Unauthenticated. An unrecognized status filter is a client error rather
/// than an empty result.
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<ServiceRecord>>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(ServiceStatus::parse(raw).ok_or_else(|| {
            ApiError::bad_request(format!("Unknown service status '{raw}'"))
        })?),
    };

    let services = state
        .services
        .list(status)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(services))
}
