//! User domain: accounts, permission levels and authenticated identities

pub mod entity;
pub mod repository;

pub use entity::{Identity, PermissionLevel, User, UserId};
pub use repository::UserRepository;
