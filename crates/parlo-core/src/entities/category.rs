use serde::{Deserialize, Serialize};

use super::refs::AssetRef;
use crate::enums::Level;

/// Top level of the content hierarchy. Owns zero or more topics.
///
/// `order` is an admin-supplied display position, required by the backend
/// schema because the learner app uses it for phased unlocking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<AssetRef>,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub order: i64,
}
