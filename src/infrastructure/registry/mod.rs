//! Service registry implementations

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryServiceRegistry;
pub use postgres::PostgresServiceRegistry;
