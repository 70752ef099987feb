//! Registered service entity

use serde::{Deserialize, Serialize};

/// Reported health of a registered service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
    Degraded,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Degraded => "degraded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "degraded" => Some(Self::Degraded),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A downstream service known to the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub name: String,
    pub status: ServiceStatus,
    pub base_url: String,
}

impl ServiceRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        status: ServiceStatus,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for status in [ServiceStatus::Up, ServiceStatus::Down, ServiceStatus::Degraded] {
            assert_eq!(ServiceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ServiceStatus::parse("offline"), None);
    }

    #[test]
    fn test_service_record_serialization() {
        let record = ServiceRecord::new(3, "search", ServiceStatus::Degraded, "http://search:9200");
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"base_url\":\"http://search:9200\""));
    }
}
