//! Route table
//!
//! Maps (method, path) to handlers. Every /api route sits behind the audit
//! middleware so each request, success or failure, leaves exactly one trail
//! entry; /health is the only unaudited route.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::audit_middleware;
use super::state::AppState;
use super::v1;

/// Create the full application router
pub fn create_router(state: AppState) -> Router {
    let api = v1::create_api_router().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        audit_middleware,
    ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, Response, StatusCode};
    use tower::ServiceExt;

    use crate::api::middleware::API_KEY_HEADER;
    use crate::domain::api_key::ApiKeyRecord;
    use crate::domain::registry::{ServiceRecord, ServiceStatus};
    use crate::domain::user::{PermissionLevel, User, UserId};
    use crate::infrastructure::api_key::{Authorizer, InMemoryKeyStore};
    use crate::infrastructure::audit::{AuditRecorder, InMemoryAuditLog};
    use crate::infrastructure::registry::InMemoryServiceRegistry;
    use crate::infrastructure::user::InMemoryUserRepository;

    const READ_KEY: &str = "dh_read_key_000001";
    const WRITE_KEY: &str = "dh_write_key_00001";
    const ADMIN_KEY: &str = "dh_admin_key_00001";
    const DISABLED_KEY: &str = "dh_disabled_key_01";
    const TINY_KEY: &str = "dh_tiny_key_000001";

    struct TestApp {
        router: Router,
        audit_log: Arc<InMemoryAuditLog>,
    }

    fn test_app() -> TestApp {
        let users = Arc::new(InMemoryUserRepository::with_users(vec![
            User::new(UserId::new(1), "reader", "reader@example.org", PermissionLevel::Read),
            User::new(UserId::new(2), "writer", "writer@example.org", PermissionLevel::Write),
            User::new(UserId::new(3), "ops", "ops@example.org", PermissionLevel::Admin),
        ]));

        let keys = Arc::new(InMemoryKeyStore::with_records(vec![
            ApiKeyRecord::new(READ_KEY, UserId::new(1), 100),
            ApiKeyRecord::new(WRITE_KEY, UserId::new(2), 100),
            ApiKeyRecord::new(ADMIN_KEY, UserId::new(3), 100),
            ApiKeyRecord::new(DISABLED_KEY, UserId::new(1), 100).disabled(),
            ApiKeyRecord::new(TINY_KEY, UserId::new(1), 1),
        ]));

        let services = Arc::new(InMemoryServiceRegistry::with_services(vec![
            ServiceRecord::new(1, "search", ServiceStatus::Up, "http://search:9200"),
            ServiceRecord::new(2, "thumbnails", ServiceStatus::Down, "http://thumbs:8081"),
        ]));

        let audit_log = Arc::new(InMemoryAuditLog::new());

        let state = AppState::new(
            Authorizer::new(keys, users.clone()),
            AuditRecorder::new(audit_log.clone()),
            users,
            services,
        );

        TestApp {
            router: create_router(state),
            audit_log,
        }
    }

    async fn send(app: &TestApp, method: Method, uri: &str, key: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let request = builder.body(Body::empty()).unwrap();

        app.router.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_open_and_unaudited() {
        let app = test_app();

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        assert!(app.audit_log.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_with_read_key() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", Some(READ_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("\"status\":\"success\""));
    }

    #[tokio::test]
    async fn test_export_missing_key_is_unauthorized() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_text(response).await;
        assert!(body.contains("API key required"));
    }

    #[tokio::test]
    async fn test_export_unknown_key_is_unauthorized() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", Some("dh_no_such_key_001")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_disabled_key_is_forbidden() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", Some(DISABLED_KEY)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_text(response).await;
        assert!(body.contains("API key disabled"));
    }

    #[tokio::test]
    async fn test_import_requires_write() {
        let app = test_app();

        let response = send(&app, Method::POST, "/api/import", Some(READ_KEY)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, Method::POST, "/api/import", Some(WRITE_KEY)).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_users_requires_admin() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/users", Some(WRITE_KEY)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, Method::GET, "/api/users", Some(ADMIN_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("\"username\":\"reader\""));
        assert!(body.contains("\"permission_level\":\"admin\""));
    }

    #[tokio::test]
    async fn test_admin_key_can_export() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", Some(ADMIN_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_services_is_open_and_filterable() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/services", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("search"));
        assert!(body.contains("thumbnails"));

        let response = send(&app, Method::GET, "/api/services?status=up", None).await;
        let body = body_text(response).await;
        assert!(body.contains("search"));
        assert!(!body.contains("thumbnails"));

        let response = send(&app, Method::GET, "/api/services?status=bogus", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_is_open() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/status", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("\"status\":\"ok\""));
        assert!(body.contains("audit_store"));
    }

    #[tokio::test]
    async fn test_quota_exhaustion_returns_429() {
        let app = test_app();

        let response = send(&app, Method::GET, "/api/export", Some(TINY_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, Method::GET, "/api/export", Some(TINY_KEY)).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = body_text(response).await;
        assert!(body.contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_every_api_request_leaves_one_audit_entry() {
        let app = test_app();

        send(&app, Method::GET, "/api/export", Some(READ_KEY)).await;
        send(&app, Method::GET, "/api/export", None).await;
        send(&app, Method::GET, "/api/services", None).await;

        let entries = app.audit_log.list().await.unwrap();
        assert_eq!(entries.len(), 3);

        // Newest first: services (200, no key), missing key (401), export (200)
        assert_eq!(entries[0].endpoint, "/api/services");
        assert_eq!(entries[0].response_code, 200);
        assert!(entries[0].api_key.is_none());

        assert_eq!(entries[1].response_code, 401);
        assert_eq!(
            entries[1].error_message.as_deref(),
            Some("API key required")
        );

        assert_eq!(entries[2].response_code, 200);
        assert_eq!(entries[2].api_key.as_deref(), Some(READ_KEY));
    }

    #[tokio::test]
    async fn test_audit_listing_masks_keys() {
        let app = test_app();

        send(&app, Method::GET, "/api/export", Some(READ_KEY)).await;

        let response = send(&app, Method::GET, "/api/audit", Some(READ_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("dh_rea***"));
        assert!(!body.contains(READ_KEY));
    }

    #[tokio::test]
    async fn test_quota_outcome_is_audited_with_real_code() {
        let app = test_app();

        send(&app, Method::GET, "/api/export", Some(TINY_KEY)).await;
        send(&app, Method::GET, "/api/export", Some(TINY_KEY)).await;

        let entries = app.audit_log.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].response_code, 429);
        assert_eq!(entries[1].response_code, 200);
    }
}
