//! Read-only analytics snapshots.
//!
//! Both snapshots are replaced wholesale on every fetch — there is no
//! incremental merge and no identity, so plain value types with `Default`
//! impls matching the dashboard's pre-fetch placeholders are enough.

use serde::{Deserialize, Serialize};

/// Aggregate counts and growth series for the dashboard cards and charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_lessons: i64,
    #[serde(default)]
    pub total_sentences: i64,
    #[serde(default)]
    pub total_feedbacks: i64,
    #[serde(default)]
    pub total_categories: i64,
    #[serde(default)]
    pub total_topics: i64,
    #[serde(default)]
    pub average_rating: f64,
    /// Per-bucket signup counts; bucket labels depend on the chosen range
    /// (hours for today, days for week/month, months for year).
    #[serde(default)]
    pub user_growth: Vec<GrowthPoint>,
}

/// One bucket of the user-growth area chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub name: String,
    #[serde(default)]
    pub users: i64,
}

/// Point-in-time system health as reported by `/admin/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: String,
    #[serde(default)]
    pub details: HealthDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDetails {
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub cache: String,
    /// Backend process uptime in seconds.
    #[serde(default)]
    pub uptime: f64,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            status: "Checking...".into(),
            details: HealthDetails::default(),
        }
    }
}

impl Default for HealthDetails {
    fn default() -> Self {
        Self {
            database: "Checking...".into(),
            cache: "Checking...".into(),
            uptime: 0.0,
        }
    }
}

impl HealthSnapshot {
    /// The degraded snapshot shown when the health endpoint itself fails.
    #[must_use]
    pub fn unhealthy() -> Self {
        Self {
            status: "Unhealthy".into(),
            details: HealthDetails {
                database: "Disconnected".into(),
                cache: "Offline".into(),
                uptime: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATS_FIXTURE: &str = r#"{
        "totalUsers": 128,
        "totalLessons": 42,
        "totalSentences": 900,
        "totalFeedbacks": 17,
        "totalCategories": 6,
        "totalTopics": 21,
        "averageRating": 4.6,
        "userGrowth": [
            { "name": "Jan", "users": 10 },
            { "name": "Feb", "users": 31 }
        ]
    }"#;

    #[test]
    fn parses_camel_case_stats() {
        let stats: StatsSnapshot = serde_json::from_str(STATS_FIXTURE).unwrap();
        assert_eq!(stats.total_users, 128);
        assert_eq!(stats.user_growth.len(), 2);
        assert_eq!(stats.user_growth[1].name, "Feb");
    }

    #[test]
    fn empty_stats_object_yields_zeroes() {
        let stats: StatsSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, StatsSnapshot::default());
    }

    #[test]
    fn health_placeholder_and_degraded_forms() {
        let initial = HealthSnapshot::default();
        assert_eq!(initial.status, "Checking...");

        let down = HealthSnapshot::unhealthy();
        assert_eq!(down.details.database, "Disconnected");
        assert_eq!(down.details.cache, "Offline");
        assert_eq!(down.details.uptime, 0.0);
    }

    #[test]
    fn parses_health_payload() {
        let health: HealthSnapshot = serde_json::from_str(
            r#"{"status": "Healthy",
                "details": {"database": "Connected", "cache": "Online", "uptime": 9301.5}}"#,
        )
        .unwrap();
        assert_eq!(health.status, "Healthy");
        assert_eq!(health.details.uptime, 9301.5);
    }
}
