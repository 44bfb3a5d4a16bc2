use serde::{Deserialize, Serialize};

use super::refs::{AssetRef, EntityRef};
use crate::enums::Level;

/// Third level of the hierarchy. Owns the sentence slides.
///
/// Carries a denormalized owning-category reference next to the owning topic
/// because the backend stores both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level: Level,
    /// Sequence position within the owning topic.
    #[serde(rename = "partNumber", default)]
    pub part_number: i64,
    #[serde(default)]
    pub thumbnail: Option<AssetRef>,
    #[serde(default)]
    pub topic: Option<EntityRef>,
    #[serde(default)]
    pub category: Option<EntityRef>,
}

impl Lesson {
    /// Whether this lesson belongs to the given topic, tolerating both the
    /// bare-id and populated wire shapes of the reference.
    #[must_use]
    pub fn belongs_to_topic(&self, topic_id: &str) -> bool {
        self.topic.as_ref().is_some_and(|t| t.id() == topic_id)
    }
}
