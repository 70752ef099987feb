//! Application state for shared services

use std::sync::Arc;

use crate::domain::registry::ServiceRegistry;
use crate::domain::user::UserRepository;
use crate::infrastructure::api_key::Authorizer;
use crate::infrastructure::audit::AuditRecorder;

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Authorizer,
    pub audit: AuditRecorder,
    pub users: Arc<dyn UserRepository>,
    pub services: Arc<dyn ServiceRegistry>,
}

impl AppState {
    pub fn new(
        authorizer: Authorizer,
        audit: AuditRecorder,
        users: Arc<dyn UserRepository>,
        services: Arc<dyn ServiceRegistry>,
    ) -> Self {
        Self {
            authorizer,
            audit,
            users,
            services,
        }
    }
}
