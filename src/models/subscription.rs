use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Pending,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Some(SubscriptionStatus::Active),
            "expired" => Some(SubscriptionStatus::Expired),
            "pending" => Some(SubscriptionStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub user: Option<String>,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::decimal")]
    pub amount: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.end_date.map_or(true, |end| end > now)
    }
}

/// Admin edit of a provider's subscription window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_current() {
        let json = r#"{"id":"s1","status":"active","end_date":"2030-01-01T00:00:00Z","amount":"200.00"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        let now = "2025-01-01T00:00:00Z".parse().unwrap();
        assert!(sub.is_current(now));
        let later = "2031-01-01T00:00:00Z".parse().unwrap();
        assert!(!sub.is_current(later));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = SubscriptionUpdate {
            status: Some(SubscriptionStatus::Expired),
            end_date: None,
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"status":"expired"}"#);
    }
}
