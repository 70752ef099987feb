//! User repository implementations

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
