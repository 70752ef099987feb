//! API key domain: key records, quota window policy and the key store trait

pub mod entity;
pub mod quota;
pub mod repository;

pub use entity::ApiKeyRecord;
pub use repository::KeyStore;
