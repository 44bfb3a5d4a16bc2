//! Multipart request packaging.
//!
//! Drafts are flattened to an ordered field list first and only then into a
//! `reqwest` form, so the packing rules stay testable without a live
//! transport. Two rules matter:
//! - Scalar fields are always included, stringified.
//! - Binary fields are included only when the draft holds a newly selected
//!   file. An absent file is omitted entirely — never sent as an empty
//!   part — which is what lets the server keep its stored asset on a
//!   partial edit.
//!
//! Foreign-key scalars (owning category/topic/lesson ids) come from call
//! context, never from user input.

use reqwest::multipart::{Form, Part};

use crate::drafts::{CategoryDraft, FilePart, LessonDraft, SentenceDraft, TopicDraft};
use crate::error::ClientError;

/// One field of a pending multipart body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormField {
    Text(&'static str, String),
    File(&'static str, FilePart),
}

impl FormField {
    #[cfg(test)]
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Text(name, _) | Self::File(name, _) => name,
        }
    }
}

fn push_file(fields: &mut Vec<FormField>, name: &'static str, file: Option<FilePart>) {
    if let Some(file) = file {
        fields.push(FormField::File(name, file));
    }
}

pub(crate) fn category_fields(draft: CategoryDraft) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text("name", draft.name),
        FormField::Text("level", draft.level.as_str().into()),
        FormField::Text(
            "order",
            draft.order.map_or_else(String::new, |o| o.to_string()),
        ),
    ];
    push_file(&mut fields, "thumbnail", draft.thumbnail);
    fields
}

pub(crate) fn topic_fields(draft: TopicDraft, category_id: &str) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text("name", draft.name),
        FormField::Text("category", category_id.into()),
    ];
    push_file(&mut fields, "thumbnail", draft.thumbnail);
    fields
}

pub(crate) fn lesson_fields(
    draft: LessonDraft,
    topic_id: &str,
    category_id: Option<&str>,
) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text("title", draft.title),
        FormField::Text("description", draft.description),
        FormField::Text("level", draft.level.as_str().into()),
        FormField::Text("partNumber", draft.part_number.to_string()),
        FormField::Text("topic", topic_id.into()),
    ];
    if let Some(category_id) = category_id {
        fields.push(FormField::Text("category", category_id.into()));
    }
    push_file(&mut fields, "thumbnail", draft.thumbnail);
    fields
}

/// `lesson_id` is only present on create; updates never re-parent a slide.
pub(crate) fn sentence_fields(draft: SentenceDraft, lesson_id: Option<&str>) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text("text", draft.text),
        FormField::Text("isPremium", draft.premium.to_string()),
        FormField::Text("order", draft.order.to_string()),
    ];
    if let Some(lesson_id) = lesson_id {
        fields.push(FormField::Text("lessonId", lesson_id.into()));
    }
    push_file(&mut fields, "image", draft.image);
    push_file(&mut fields, "audio", draft.audio);
    fields
}

/// Assemble the final form. The content-type header (and boundary) is left
/// to reqwest.
pub(crate) fn build(fields: Vec<FormField>) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text(name, value) => form.text(name, value),
            FormField::File(name, file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlo_core::Level;
    use pretty_assertions::assert_eq;

    fn file(name: &str, mime: &str) -> FilePart {
        FilePart::new(name, mime, vec![0xAA, 0xBB])
    }

    fn names(fields: &[FormField]) -> Vec<&'static str> {
        fields.iter().map(FormField::name).collect()
    }

    #[test]
    fn absent_files_are_omitted_not_empty() {
        let draft = SentenceDraft {
            text: "Hello.".into(),
            premium: false,
            order: 1,
            image: None,
            audio: None,
        };
        let fields = sentence_fields(draft, None);
        assert_eq!(names(&fields), vec!["text", "isPremium", "order"]);
    }

    #[test]
    fn selected_files_are_included() {
        let draft = SentenceDraft {
            text: "Hello.".into(),
            premium: true,
            order: 2,
            image: Some(file("slide.webp", "image/webp")),
            audio: Some(file("slide.mp3", "audio/mpeg")),
        };
        let fields = sentence_fields(draft, Some("l1"));
        assert_eq!(
            names(&fields),
            vec!["text", "isPremium", "order", "lessonId", "image", "audio"]
        );
        assert!(fields.contains(&FormField::Text("isPremium", "true".into())));
        assert!(fields.contains(&FormField::Text("lessonId", "l1".into())));
    }

    #[test]
    fn sentence_update_never_reparents() {
        let fields = sentence_fields(SentenceDraft::default(), None);
        assert!(!names(&fields).contains(&"lessonId"));
    }

    #[test]
    fn category_scalars_are_always_present() {
        let draft = CategoryDraft {
            name: "Travel".into(),
            level: Level::Advanced,
            order: Some(4),
            thumbnail: None,
        };
        let fields = category_fields(draft);
        assert_eq!(names(&fields), vec!["name", "level", "order"]);
        assert!(fields.contains(&FormField::Text("level", "Advanced".into())));
        assert!(fields.contains(&FormField::Text("order", "4".into())));
    }

    #[test]
    fn topic_foreign_key_comes_from_context() {
        let draft = TopicDraft {
            name: "Bedroom".into(),
            thumbnail: Some(file("thumb.webp", "image/webp")),
        };
        let fields = topic_fields(draft, "cat1");
        assert_eq!(names(&fields), vec!["name", "category", "thumbnail"]);
        assert!(fields.contains(&FormField::Text("category", "cat1".into())));
    }

    #[test]
    fn lesson_category_is_optional_context() {
        let draft = LessonDraft {
            title: "Making Coffee".into(),
            description: "Order drinks".into(),
            level: Level::Beginner,
            part_number: 3,
            thumbnail: None,
        };
        let with = lesson_fields(draft.clone(), "t1", Some("cat1"));
        assert!(names(&with).contains(&"category"));

        let without = lesson_fields(draft, "t1", None);
        assert!(!names(&without).contains(&"category"));
        assert!(without.contains(&FormField::Text("partNumber", "3".into())));
    }

    #[test]
    fn build_accepts_text_and_file_fields() {
        let fields = vec![
            FormField::Text("name", "Kitchen".into()),
            FormField::File("thumbnail", file("thumb.webp", "image/webp")),
        ];
        assert!(build(fields).is_ok());
    }
}
