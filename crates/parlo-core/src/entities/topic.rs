use serde::{Deserialize, Serialize};

use super::refs::{AssetRef, EntityRef};

/// Second level of the hierarchy, scoped to one category. Owns lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<AssetRef>,
    /// Owning category; bare id or populated, depending on the endpoint.
    #[serde(default)]
    pub category: Option<EntityRef>,
}
