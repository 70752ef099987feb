//! Data export and import endpoint handlers

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::{Authorized, ReadAccess, WriteAccess};

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub status: &'static str,
    pub data: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: &'static str,
}

/// GET /api/export
pub async fn export(auth: Authorized<ReadAccess>) -> Json<ExportResponse> {
    debug!(user = %auth.identity().user_id, "Exporting dataset");

    Json(ExportResponse {
        status: "success",
        data: vec![
            "item1".to_string(),
            "item2".to_string(),
            "item3".to_string(),
        ],
    })
}

/// POST /api/import
pub async fn import(auth: Authorized<WriteAccess>) -> (StatusCode, Json<ImportResponse>) {
    debug!(user = %auth.identity().user_id, "Starting import");

    (
        StatusCode::ACCEPTED,
        Json(ImportResponse {
            status: "import started",
        }),
    )
}
