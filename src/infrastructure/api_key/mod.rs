//! Key store implementations and the authorization pipeline

pub mod authorizer;
pub mod in_memory;
pub mod postgres;

pub use authorizer::{AuthError, Authorizer};
pub use in_memory::InMemoryKeyStore;
pub use postgres::PostgresKeyStore;
