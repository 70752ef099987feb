//! Audit middleware
//!
//! Emits exactly one audit entry per request with the final response code and
//! elapsed time, for successes and failures alike. The append is best-effort;
//! the response is returned regardless.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use super::auth::extract_api_key;
use crate::api::state::AppState;
use crate::api::types::ErrorMessage;
use crate::domain::audit::AuditEntry;

pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let endpoint = request.uri().path().to_string();
    let api_key = extract_api_key(request.headers());

    let response = next.run(request).await;

    let response_time_ms = start.elapsed().as_millis() as u64;
    let error_message = response
        .extensions()
        .get::<ErrorMessage>()
        .map(|m| m.0.clone());

    let entry = AuditEntry::new(
        api_key,
        endpoint,
        response.status().as_u16(),
        response_time_ms,
    )
    .with_error(error_message);

    state.audit.record(entry).await;

    response
}
