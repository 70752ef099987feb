//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by id
    async fn find(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
