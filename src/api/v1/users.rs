//! User listing handler

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::middleware::{AdminAccess, Authorized};
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: Authorized<AdminAccess>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!(admin = %auth.identity().user_id, "Listing users");

    let users = state.users.list().await.map_err(ApiError::from)?;

    Ok(Json(users))
}
