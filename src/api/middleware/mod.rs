//! Request middleware and extractors

pub mod audit;
pub mod auth;

pub use audit::audit_middleware;
pub use auth::{AdminAccess, Authorized, ReadAccess, WriteAccess, API_KEY_HEADER};
