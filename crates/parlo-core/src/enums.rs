//! Difficulty level and dashboard range enums.
//!
//! `Level` serializes with capitalized variant names (`"Beginner"`) because
//! that is how the backend stores and filters it; `StatsRange` serializes
//! lowercase to match the `?range=` query values.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Difficulty level of a category or lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// String form sent in multipart fields and the `?level=` query.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatsRange
// ---------------------------------------------------------------------------

/// Time window for the dashboard stats summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    Today,
    Week,
    Month,
    #[default]
    Year,
}

impl StatsRange {
    /// Query-string value for `/admin/stats-summary?range=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for StatsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_wire_names_are_capitalized() {
        assert_eq!(serde_json::to_string(&Level::Beginner).unwrap(), "\"Beginner\"");
        let parsed: Level = serde_json::from_str("\"Advanced\"").unwrap();
        assert_eq!(parsed, Level::Advanced);
    }

    #[test]
    fn stats_range_is_lowercase() {
        assert_eq!(StatsRange::Week.as_str(), "week");
        assert_eq!(serde_json::to_string(&StatsRange::Today).unwrap(), "\"today\"");
    }

    #[test]
    fn defaults_match_the_console_form_defaults() {
        assert_eq!(Level::default(), Level::Beginner);
        assert_eq!(StatsRange::default(), StatsRange::Year);
    }
}
