//! Sentence store.
//!
//! Sentences are always viewed through one lesson, so besides the shared
//! lifecycle the store offers [`SentenceStore::clear`] for navigating away
//! from a lesson without leaving its slides behind for the next one.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use parlo_core::Sentence;
use reqwest::Method;
use serde::Deserialize;

use super::collection::Collection;
use crate::confirm::ConfirmPolicy;
use crate::drafts::SentenceDraft;
use crate::error::ClientError;
use crate::gateway::AdminClient;
use crate::multipart;
use crate::validate;

#[derive(Deserialize)]
struct SentencesEnvelope {
    sentences: Vec<Sentence>,
}

#[derive(Deserialize)]
struct SentenceEnvelope {
    sentence: Sentence,
}

/// Ordered sentence collection for the currently viewed lesson.
#[derive(Debug)]
pub struct SentenceStore {
    client: AdminClient,
    state: RwLock<Collection<Sentence>>,
}

impl SentenceStore {
    /// Deleting a sentence only needs a plain yes/no in the UI shell.
    pub const DELETE_POLICY: ConfirmPolicy = ConfirmPolicy::Simple;

    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(Collection::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Collection<Sentence>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collection<Sentence>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Sentence> {
        self.read().items().to_vec()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error().map(str::to_string)
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.read().success()
    }

    /// Clear outcome flags before the next operation.
    pub fn reset(&self) {
        self.write().reset();
    }

    /// Drop the cached sentences when leaving the lesson view. Flags are
    /// left alone; only the items go.
    pub fn clear(&self) {
        self.write().clear_items();
    }

    /// Replace the collection with the slides of one lesson.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_for_lesson(&self, lesson_id: &str) -> Result<Vec<Sentence>, ClientError> {
        let ticket = self.write().begin_fetch();
        let path = format!("/sentences/lesson/{}", urlencoding::encode(lesson_id));
        match self.client.get_json::<SentencesEnvelope>(&path).await {
            Ok(envelope) => {
                self.write().apply_list(ticket, envelope.sentences.clone());
                Ok(envelope.sentences)
            }
            Err(err) => {
                self.write()
                    .fail_fetch(ticket, err.flag_message("Failed to load sentences"));
                Err(err)
            }
        }
    }

    /// Create a sentence under a lesson. Media attachments are optional
    /// client-side; the backend decides whether to demand them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn create(
        &self,
        lesson_id: &str,
        draft: SentenceDraft,
    ) -> Result<Sentence, ClientError> {
        validate::guard_sentence(&draft)?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::sentence_fields(draft, Some(lesson_id)))?;
        match self
            .client
            .send_multipart::<SentenceEnvelope>(Method::POST, "/sentences", form)
            .await
        {
            Ok(envelope) => {
                self.write().insert_newest_first(envelope.sentence.clone());
                Ok(envelope.sentence)
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Sentence creation failed"));
                Err(err)
            }
        }
    }

    /// Update a sentence in place. The owning lesson never changes on
    /// update, so no lesson id travels with the form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn update(&self, id: &str, draft: SentenceDraft) -> Result<Sentence, ClientError> {
        validate::guard_sentence(&draft)?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::sentence_fields(draft, None))?;
        let path = format!("/sentences/{}", urlencoding::encode(id));
        match self
            .client
            .send_multipart::<SentenceEnvelope>(Method::PUT, &path, form)
            .await
        {
            Ok(envelope) => {
                self.write().replace_existing(envelope.sentence.clone());
                Ok(envelope.sentence)
            }
            Err(err) => {
                self.write().fail(err.flag_message("Update failed"));
                Err(err)
            }
        }
    }

    /// Delete a sentence; the server cleans up its stored media.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        self.write().begin_mutation();
        let path = format!("/sentences/{}", urlencoding::encode(id));
        match self.client.delete(&path).await {
            Ok(()) => {
                self.write().remove(id);
                Ok(id.to_string())
            }
            Err(err) => {
                self.write().fail(err.flag_message("Delete failed"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_envelope_parses_premium_and_media() {
        let envelope: SentencesEnvelope = serde_json::from_str(
            r#"{"sentences": [
                {"_id": "s1", "text": "Ich trinke Kaffee.", "isPremium": true,
                 "order": 1,
                 "image": {"url": "https://cdn.parlo.app/s1.jpg", "public_id": "s1"},
                 "lessonId": "l1"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(envelope.sentences.len(), 1);
        assert!(envelope.sentences[0].premium);
        assert_eq!(
            envelope.sentences[0].image.as_ref().map(|a| a.url.as_str()),
            Some("https://cdn.parlo.app/s1.jpg")
        );
    }

    #[test]
    fn clear_drops_items_but_keeps_flags() {
        let mut collection: Collection<Sentence> = Collection::new();
        let ticket = collection.begin_fetch();
        let envelope: SentencesEnvelope = serde_json::from_str(
            r#"{"sentences": [{"_id": "s1", "text": "Hallo."}]}"#,
        )
        .unwrap();
        collection.apply_list(ticket, envelope.sentences);
        collection.fail("Delete failed".into());

        collection.clear_items();
        assert!(collection.items().is_empty());
        assert_eq!(collection.error(), Some("Delete failed"));
    }
}
