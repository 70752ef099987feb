//! Data-management API endpoints

pub mod audit;
pub mod data;
pub mod services;
pub mod status;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the /api router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/export", get(data::export))
        .route("/import", post(data::import))
        .route("/audit", get(audit::list_audit_log))
        .route("/services", get(services::list_services))
        .route("/status", get(status::system_status))
        .route("/users", get(users::list_users))
}
