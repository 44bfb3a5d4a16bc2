//! Lesson store.
//!
//! Lessons are the one resource fetched unscoped (optionally narrowed by
//! level); the topic view filters client-side via
//! [`LessonStore::lessons_for_topic`]. Topics and sentences filter
//! server-side instead — the inconsistency is inherited deliberately from
//! the backend's surface.
//!
//! Next to the list the store keeps a singular `current` slot for the
//! details view, replaced wholesale by [`LessonStore::fetch_by_id`] and kept
//! in sync when an update resolves for the lesson it holds.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use parlo_core::{Lesson, Level};
use reqwest::Method;
use serde::Deserialize;

use super::collection::Collection;
use crate::confirm::ConfirmPolicy;
use crate::drafts::LessonDraft;
use crate::error::ClientError;
use crate::gateway::AdminClient;
use crate::multipart;
use crate::validate::{self, DraftMode};

#[derive(Deserialize)]
struct LessonsEnvelope {
    lessons: Vec<Lesson>,
}

#[derive(Deserialize)]
struct LessonEnvelope {
    lesson: Lesson,
}

#[derive(Deserialize)]
struct NewLessonEnvelope {
    #[serde(rename = "newLesson")]
    new_lesson: Lesson,
}

#[derive(Deserialize)]
struct UpdatedLessonEnvelope {
    #[serde(rename = "updatedLesson")]
    updated_lesson: Lesson,
}

#[derive(Debug, Default)]
struct LessonState {
    collection: Collection<Lesson>,
    current: Option<Lesson>,
    /// Generation ticket for the `current` slot, independent of the list's.
    current_ticket: u64,
}

/// Lesson collection plus the singular details-view slot.
#[derive(Debug)]
pub struct LessonStore {
    client: AdminClient,
    state: RwLock<LessonState>,
}

impl LessonStore {
    /// Deleting a lesson only needs a plain yes/no in the UI shell.
    pub const DELETE_POLICY: ConfirmPolicy = ConfirmPolicy::Simple;

    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(LessonState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LessonState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LessonState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Lesson> {
        self.read().collection.items().to_vec()
    }

    /// Client-side filter for the topic view (lesson fetches are unscoped).
    #[must_use]
    pub fn lessons_for_topic(&self, topic_id: &str) -> Vec<Lesson> {
        self.read()
            .collection
            .items()
            .iter()
            .filter(|lesson| lesson.belongs_to_topic(topic_id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn current(&self) -> Option<Lesson> {
        self.read().current.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().collection.loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().collection.error().map(str::to_string)
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.read().collection.success()
    }

    /// Clear outcome flags before the next operation.
    pub fn reset(&self) {
        self.write().collection.reset();
    }

    /// Replace the collection with the (optionally level-filtered) lesson
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_all(&self, level: Option<Level>) -> Result<Vec<Lesson>, ClientError> {
        let ticket = self.write().collection.begin_fetch();
        let filter = level.map_or("all", Level::as_str);
        let path = format!("/lessons?level={}", urlencoding::encode(filter));
        match self.client.get_json::<LessonsEnvelope>(&path).await {
            Ok(envelope) => {
                self.write()
                    .collection
                    .apply_list(ticket, envelope.lessons.clone());
                Ok(envelope.lessons)
            }
            Err(err) => {
                self.write()
                    .collection
                    .fail_fetch(ticket, err.flag_message("Failed to fetch lessons"));
                Err(err)
            }
        }
    }

    /// Replace the `current` slot wholesale with one lesson.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Lesson, ClientError> {
        let ticket = {
            let mut state = self.write();
            state.collection.begin_mutation();
            state.current_ticket += 1;
            state.current_ticket
        };
        let path = format!("/lessons/{}", urlencoding::encode(id));
        match self.client.get_json::<LessonEnvelope>(&path).await {
            Ok(envelope) => {
                let mut state = self.write();
                if ticket == state.current_ticket {
                    state.collection.reset();
                    state.current = Some(envelope.lesson.clone());
                } else {
                    tracing::warn!(ticket, "discarding stale lesson-details fetch");
                }
                Ok(envelope.lesson)
            }
            Err(err) => {
                let mut state = self.write();
                if ticket == state.current_ticket {
                    state
                        .collection
                        .fail(err.flag_message("Failed to load lesson"));
                }
                Err(err)
            }
        }
    }

    /// Create a lesson under a topic. The denormalized owning-category id
    /// comes from the topic context, never from user input.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn create(
        &self,
        topic_id: &str,
        category_id: Option<&str>,
        draft: LessonDraft,
    ) -> Result<Lesson, ClientError> {
        validate::guard_lesson(&draft, DraftMode::Create)?;
        self.write().collection.begin_mutation();
        let form = multipart::build(multipart::lesson_fields(draft, topic_id, category_id))?;
        match self
            .client
            .send_multipart::<NewLessonEnvelope>(Method::POST, "/lessons", form)
            .await
        {
            Ok(envelope) => {
                self.write()
                    .collection
                    .insert_newest_first(envelope.new_lesson.clone());
                Ok(envelope.new_lesson)
            }
            Err(err) => {
                self.write()
                    .collection
                    .fail(err.flag_message("Creation failed"));
                Err(err)
            }
        }
    }

    /// Update a lesson in place; syncs the `current` slot when it holds the
    /// same lesson.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn update(
        &self,
        id: &str,
        topic_id: &str,
        category_id: Option<&str>,
        draft: LessonDraft,
    ) -> Result<Lesson, ClientError> {
        validate::guard_lesson(&draft, DraftMode::Edit { id })?;
        self.write().collection.begin_mutation();
        let form = multipart::build(multipart::lesson_fields(draft, topic_id, category_id))?;
        let path = format!("/lessons/{}", urlencoding::encode(id));
        match self
            .client
            .send_multipart::<UpdatedLessonEnvelope>(Method::PUT, &path, form)
            .await
        {
            Ok(envelope) => {
                let lesson = envelope.updated_lesson;
                let mut state = self.write();
                state.collection.replace_existing(lesson.clone());
                if state
                    .current
                    .as_ref()
                    .is_some_and(|current| current.id == lesson.id)
                {
                    state.current = Some(lesson.clone());
                }
                drop(state);
                Ok(lesson)
            }
            Err(err) => {
                self.write()
                    .collection
                    .fail(err.flag_message("Update failed"));
                Err(err)
            }
        }
    }

    /// Delete a lesson; the server cleans up its stored assets.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        self.write().collection.begin_mutation();
        let path = format!("/lessons/{}", urlencoding::encode(id));
        match self.client.delete(&path).await {
            Ok(()) => {
                self.write().collection.remove(id);
                Ok(id.to_string())
            }
            Err(err) => {
                self.write()
                    .collection
                    .fail(err.flag_message("Delete failed"));
                Err(err)
            }
        }
    }
}
