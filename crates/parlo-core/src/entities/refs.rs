use serde::{Deserialize, Serialize};

/// Reference to a stored media asset (thumbnail, slide image, audio clip).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(default)]
    pub url: String,
    /// Storage-provider handle, present when the backend manages the asset.
    #[serde(default)]
    pub public_id: Option<String>,
}

/// A parent-entity reference as the API serves it.
///
/// Depending on whether the backend populated the relation, the same field
/// arrives either as a bare id string or as an embedded sub-document. Both
/// shapes must parse; [`EntityRef::id`] gives uniform access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated(EntitySummary),
}

/// The populated form of a parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityRef {
    /// The referenced entity's id, regardless of wire shape.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(summary) => &summary.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_bare_id() {
        let parsed: EntityRef = serde_json::from_str("\"cat1\"").unwrap();
        assert_eq!(parsed.id(), "cat1");
    }

    #[test]
    fn parses_populated_reference() {
        let parsed: EntityRef =
            serde_json::from_str(r#"{"_id": "cat1", "name": "Kitchen"}"#).unwrap();
        assert_eq!(parsed.id(), "cat1");
        let EntityRef::Populated(summary) = parsed else {
            panic!("expected populated form");
        };
        assert_eq!(summary.name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn asset_ref_tolerates_missing_public_id() {
        let parsed: AssetRef = serde_json::from_str(r#"{"url": "https://cdn/x.webp"}"#).unwrap();
        assert_eq!(parsed.url, "https://cdn/x.webp");
        assert!(parsed.public_id.is_none());
    }
}
