use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecentActivity {
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub new_bookings: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_tools: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub recent_activity: RecentActivity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyToggled {
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveToggled {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stats() {
        let json = r#"{"total_users":12,"total_tools":30,"total_bookings":7,"total_revenue":"4500.00","recent_activity":{"new_users":3,"new_bookings":2}}"#;
        let stats: AdminStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_revenue, Some(4500.0));
        assert_eq!(stats.recent_activity.new_users, 3);
    }

    #[test]
    fn test_decode_stats_with_zero_revenue() {
        let json = r#"{"total_users":0,"total_tools":0,"total_bookings":0,"total_revenue":0}"#;
        let stats: AdminStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_revenue, Some(0.0));
        assert_eq!(stats.recent_activity, RecentActivity::default());
    }
}
