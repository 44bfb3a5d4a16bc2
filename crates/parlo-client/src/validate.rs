//! Client-side guards run before any mutating call.
//!
//! Pure and synchronous. A failed check blocks the call entirely — the
//! transport gateway is never invoked and no collection flag changes — and
//! surfaces as [`ValidationError`], a warning class the UI reports separately
//! from server errors.
//!
//! The duplicate-name guard is advisory only: it inspects the currently
//! loaded siblings, so it is exactly as accurate as the last fetch. The
//! server remains the authority on uniqueness.

use parlo_core::{Category, Topic};
use thiserror::Error;

use crate::drafts::{CategoryDraft, LessonDraft, SentenceDraft, TopicDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("\"{0}\" already exists")]
    DuplicateName(String),
}

/// Whether a draft targets a new entity or an existing one.
///
/// Edit mode carries the edited entity's id so the duplicate guard can
/// exclude it from the sibling comparison (self-exclusion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode<'a> {
    Create,
    Edit { id: &'a str },
}

impl<'a> DraftMode<'a> {
    const fn is_create(self) -> bool {
        matches!(self, Self::Create)
    }

    const fn excluded_id(self) -> Option<&'a str> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(id),
        }
    }
}

/// A collection entry the duplicate guard can compare against.
pub trait Sibling {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Sibling for Category {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Sibling for Topic {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive duplicate check against loaded siblings, excluding the
/// entity being edited. Best-effort hint only.
#[must_use]
pub fn is_duplicate_name<T: Sibling>(
    candidate: &str,
    siblings: &[T],
    exclude_id: Option<&str>,
) -> bool {
    let candidate = candidate.to_lowercase();
    siblings.iter().any(|sibling| {
        sibling.name().to_lowercase() == candidate && Some(sibling.id()) != exclude_id
    })
}

/// Case-insensitive substring matches over loaded siblings, used for the
/// name-entry autocomplete. Empty below two typed characters.
#[must_use]
pub fn name_suggestions<'a, T: Sibling>(
    input: &str,
    siblings: &'a [T],
    exclude_id: Option<&str>,
) -> Vec<&'a T> {
    if input.chars().count() < 2 {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    siblings
        .iter()
        .filter(|sibling| {
            sibling.name().to_lowercase().contains(&needle)
                && Some(sibling.id()) != exclude_id
        })
        .collect()
}

/// Guard a category draft. Checks, in order: name, display order, duplicate
/// name, thumbnail (create only).
///
/// # Errors
///
/// Returns the first failed check.
pub fn guard_category(
    draft: &CategoryDraft,
    mode: DraftMode<'_>,
    siblings: &[Category],
) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required("name"));
    }
    if draft.order.is_none() {
        return Err(ValidationError::Required("display order"));
    }
    if is_duplicate_name(&draft.name, siblings, mode.excluded_id()) {
        return Err(ValidationError::DuplicateName(draft.name.clone()));
    }
    if mode.is_create() && draft.thumbnail.is_none() {
        return Err(ValidationError::Required("thumbnail"));
    }
    Ok(())
}

/// Guard a topic draft: name, duplicate name, thumbnail (create only).
///
/// # Errors
///
/// Returns the first failed check.
pub fn guard_topic(
    draft: &TopicDraft,
    mode: DraftMode<'_>,
    siblings: &[Topic],
) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required("name"));
    }
    if is_duplicate_name(&draft.name, siblings, mode.excluded_id()) {
        return Err(ValidationError::DuplicateName(draft.name.clone()));
    }
    if mode.is_create() && draft.thumbnail.is_none() {
        return Err(ValidationError::Required("thumbnail"));
    }
    Ok(())
}

/// Guard a lesson draft: title, thumbnail (create only). Lesson titles have
/// no uniqueness rule.
///
/// # Errors
///
/// Returns the first failed check.
pub fn guard_lesson(draft: &LessonDraft, mode: DraftMode<'_>) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::Required("title"));
    }
    if mode.is_create() && draft.thumbnail.is_none() {
        return Err(ValidationError::Required("thumbnail"));
    }
    Ok(())
}

/// Guard a sentence draft: text only. Media stays optional client-side; the
/// backend enforces its own requirements.
///
/// # Errors
///
/// Returns the first failed check.
pub fn guard_sentence(draft: &SentenceDraft) -> Result<(), ValidationError> {
    if draft.text.trim().is_empty() {
        return Err(ValidationError::Required("text"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::FilePart;
    use parlo_core::Level;
    use pretty_assertions::assert_eq;

    fn topic(id: &str, name: &str) -> Topic {
        serde_json::from_str(&format!(r#"{{"_id": "{id}", "name": "{name}"}}"#)).unwrap()
    }

    fn thumb() -> FilePart {
        FilePart::new("thumb.webp", "image/webp", vec![1, 2, 3])
    }

    #[test]
    fn duplicate_guard_is_case_insensitive() {
        let siblings = vec![topic("t1", "Kitchen")];
        assert!(is_duplicate_name("kitchen", &siblings, None));
        assert!(is_duplicate_name("KITCHEN", &siblings, None));
        assert!(!is_duplicate_name("Bedroom", &siblings, None));
    }

    #[test]
    fn duplicate_guard_excludes_the_edited_entity() {
        let siblings = vec![topic("t1", "Kitchen")];
        // Editing t1 itself: same name is not a duplicate.
        assert!(!is_duplicate_name("kitchen", &siblings, Some("t1")));
        // Editing a different entity: still a duplicate.
        assert!(is_duplicate_name("kitchen", &siblings, Some("t2")));
    }

    #[test]
    fn topic_guard_requires_trimmed_name() {
        let draft = TopicDraft {
            name: "   ".into(),
            thumbnail: Some(thumb()),
        };
        assert_eq!(
            guard_topic(&draft, DraftMode::Create, &[]),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn topic_guard_requires_thumbnail_only_on_create() {
        let draft = TopicDraft {
            name: "Bedroom".into(),
            thumbnail: None,
        };
        assert_eq!(
            guard_topic(&draft, DraftMode::Create, &[]),
            Err(ValidationError::Required("thumbnail"))
        );
        // Edit without a new file means "keep the stored asset".
        assert_eq!(guard_topic(&draft, DraftMode::Edit { id: "t1" }, &[]), Ok(()));
    }

    #[test]
    fn category_guard_requires_display_order() {
        let draft = CategoryDraft {
            name: "Travel".into(),
            level: Level::Beginner,
            order: None,
            thumbnail: Some(thumb()),
        };
        assert_eq!(
            guard_category(&draft, DraftMode::Create, &[]),
            Err(ValidationError::Required("display order"))
        );
    }

    #[test]
    fn lesson_guard_checks_title_and_create_thumbnail() {
        let mut draft = LessonDraft {
            title: String::new(),
            ..LessonDraft::default()
        };
        assert_eq!(
            guard_lesson(&draft, DraftMode::Create),
            Err(ValidationError::Required("title"))
        );

        draft.title = "Making Coffee".into();
        assert_eq!(
            guard_lesson(&draft, DraftMode::Create),
            Err(ValidationError::Required("thumbnail"))
        );
        assert_eq!(guard_lesson(&draft, DraftMode::Edit { id: "l1" }), Ok(()));
    }

    #[test]
    fn sentence_guard_checks_text_only() {
        let draft = SentenceDraft {
            text: " \t".into(),
            ..SentenceDraft::default()
        };
        assert_eq!(
            guard_sentence(&draft),
            Err(ValidationError::Required("text"))
        );

        let valid = SentenceDraft {
            text: "Hello there.".into(),
            ..SentenceDraft::default()
        };
        assert_eq!(guard_sentence(&valid), Ok(()));
    }

    #[test]
    fn suggestions_need_at_least_two_characters() {
        let siblings = vec![topic("t1", "Kitchen"), topic("t2", "Kit Bag")];
        assert!(name_suggestions("k", &siblings, None).is_empty());

        let matches = name_suggestions("kit", &siblings, None);
        assert_eq!(matches.len(), 2);

        let excluding = name_suggestions("kit", &siblings, Some("t1"));
        assert_eq!(excluding.len(), 1);
        assert_eq!(excluding[0].name, "Kit Bag");
    }
}
