//! In-progress field sets for create/update operations.
//!
//! A draft never carries identity — the server assigns ids — and its binary
//! fields are `Option`s: `None` on an edit means "keep the stored asset"
//! (the multipart packer omits the field entirely, see [`crate::multipart`]).

use parlo_core::Level;

/// A newly selected file attached to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    /// MIME type sent with the part (e.g. `image/webp`, `audio/mpeg`).
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub level: Level,
    /// Display order; required by the backend schema for phased unlocking.
    pub order: Option<i64>,
    pub thumbnail: Option<FilePart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDraft {
    pub name: String,
    pub thumbnail: Option<FilePart>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
    pub level: Level,
    pub part_number: i64,
    pub thumbnail: Option<FilePart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceDraft {
    pub text: String,
    pub premium: bool,
    pub order: i64,
    pub image: Option<FilePart>,
    pub audio: Option<FilePart>,
}
