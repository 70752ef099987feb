//! Service registry domain

pub mod entity;
pub mod repository;

pub use entity::{ServiceRecord, ServiceStatus};
pub use repository::ServiceRegistry;
