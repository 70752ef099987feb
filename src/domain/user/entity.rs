//! User entity and permission levels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal capability tier. `Read < Write < Admin`; a caller at a given level
/// may invoke any handler requiring that level or lower.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    #[default]
    Read,
    Write,
    Admin,
}

impl PermissionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }

    /// Parse the store's textual representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Self::Read),
            "write" => Some(Self::Write),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Check whether this level satisfies `required`
    pub fn allows(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated caller attached to a request after authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub permission_level: PermissionLevel,
}

impl Identity {
    pub fn new(user_id: UserId, permission_level: PermissionLevel) -> Self {
        Self {
            user_id,
            permission_level,
        }
    }
}

/// User account that owns API keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub permission_level: PermissionLevel,
}

impl User {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        permission_level: PermissionLevel,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
            permission_level,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.permission_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_level_ordering() {
        assert!(PermissionLevel::Read < PermissionLevel::Write);
        assert!(PermissionLevel::Write < PermissionLevel::Admin);
        assert!(PermissionLevel::Admin > PermissionLevel::Read);
    }

    #[test]
    fn test_permission_level_allows() {
        assert!(PermissionLevel::Admin.allows(PermissionLevel::Read));
        assert!(PermissionLevel::Admin.allows(PermissionLevel::Admin));
        assert!(PermissionLevel::Write.allows(PermissionLevel::Read));
        assert!(!PermissionLevel::Read.allows(PermissionLevel::Write));
        assert!(!PermissionLevel::Write.allows(PermissionLevel::Admin));
    }

    #[test]
    fn test_permission_level_parse() {
        assert_eq!(PermissionLevel::parse("read"), Some(PermissionLevel::Read));
        assert_eq!(
            PermissionLevel::parse("write"),
            Some(PermissionLevel::Write)
        );
        assert_eq!(
            PermissionLevel::parse("admin"),
            Some(PermissionLevel::Admin)
        );
        assert_eq!(PermissionLevel::parse("superuser"), None);
    }

    #[test]
    fn test_permission_level_serialization() {
        assert_eq!(
            serde_json::to_string(&PermissionLevel::Admin).unwrap(),
            "\"admin\""
        );
    }

    #[test]
    fn test_user_identity() {
        let user = User::new(UserId::new(7), "maria", "maria@example.org", PermissionLevel::Write);
        let identity = user.identity();

        assert_eq!(identity.user_id, UserId::new(7));
        assert_eq!(identity.permission_level, PermissionLevel::Write);
    }

    #[test]
    fn test_user_serialization_skips_empty_last_login() {
        let user = User::new(UserId::new(1), "ops", "ops@example.org", PermissionLevel::Admin);
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("last_login"));
        assert!(json.contains("\"permission_level\":\"admin\""));
    }
}
