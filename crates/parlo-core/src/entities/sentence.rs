use serde::{Deserialize, Serialize};

use super::refs::{AssetRef, EntityRef};

/// A single slide within a lesson: text plus optional image and audio.
///
/// `order` is admin-supplied and only used for display; duplicates are
/// allowed and the server never reorders on the client's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(rename = "isPremium", default)]
    pub premium: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub image: Option<AssetRef>,
    #[serde(default)]
    pub audio: Option<AssetRef>,
    #[serde(default, alias = "lessonId")]
    pub lesson: Option<EntityRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "_id": "s1",
        "text": "Could I get an espresso, please?",
        "isPremium": true,
        "order": 2,
        "image": { "url": "https://cdn/espresso.webp" },
        "audio": { "url": "https://cdn/espresso.mp3", "public_id": "snd/espresso" },
        "lesson": "l1"
    }"#;

    #[test]
    fn parses_backend_document() {
        let sentence: Sentence = serde_json::from_str(FIXTURE).unwrap();
        assert!(sentence.premium);
        assert_eq!(sentence.order, 2);
        assert_eq!(sentence.lesson.as_ref().map(EntityRef::id), Some("l1"));
        assert_eq!(sentence.audio.unwrap().public_id.as_deref(), Some("snd/espresso"));
    }

    #[test]
    fn premium_defaults_to_false() {
        let sentence: Sentence =
            serde_json::from_str(r#"{"_id": "s2", "text": "Hello."}"#).unwrap();
        assert!(!sentence.premium);
        assert!(sentence.image.is_none());
    }
}
