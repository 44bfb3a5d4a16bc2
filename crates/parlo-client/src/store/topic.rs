//! Topic store.
//!
//! Topic lists are always scoped server-side to an owning category, and
//! topic deletion is the one destructive action behind the typed
//! confirmation gate — it cascades every lesson and slide underneath.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use parlo_core::Topic;
use reqwest::Method;
use serde::Deserialize;

use super::collection::Collection;
use crate::confirm::{ConfirmPolicy, DeleteArmed};
use crate::drafts::TopicDraft;
use crate::error::ClientError;
use crate::gateway::AdminClient;
use crate::multipart;
use crate::validate::{self, DraftMode};

#[derive(Deserialize)]
struct TopicsEnvelope {
    topics: Vec<Topic>,
}

#[derive(Deserialize)]
struct TopicEnvelope {
    topic: Topic,
}

/// Ordered topic collection for the currently viewed category.
#[derive(Debug)]
pub struct TopicStore {
    client: AdminClient,
    state: RwLock<Collection<Topic>>,
}

impl TopicStore {
    /// Topic deletion requires the typed gate (see [`crate::confirm`]).
    pub const DELETE_POLICY: ConfirmPolicy = ConfirmPolicy::TypedPhrase;

    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(Collection::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Collection<Topic>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collection<Topic>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Topic> {
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

    /// Replace the collection with the topics of one category.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_for_category(&self, category_id: &str) -> Result<Vec<Topic>, ClientError> {
        let ticket = self.write().begin_fetch();
        let path = format!("/topics/{}", urlencoding::encode(category_id));
        match self.client.get_json::<TopicsEnvelope>(&path).await {
            Ok(envelope) => {
                self.write().apply_list(ticket, envelope.topics.clone());
                Ok(envelope.topics)
            }
            Err(err) => {
                self.write()
                    .fail_fetch(ticket, err.flag_message("Failed to load topics"));
                Err(err)
            }
        }
    }

    /// Create a topic under the given category.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn create(&self, category_id: &str, draft: TopicDraft) -> Result<Topic, ClientError> {
        validate::guard_topic(&draft, DraftMode::Create, self.read().items())?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::topic_fields(draft, category_id))?;
        match self
            .client
            .send_multipart::<TopicEnvelope>(Method::POST, "/topics", form)
            .await
        {
            Ok(envelope) => {
                self.write().insert_newest_first(envelope.topic.clone());
                Ok(envelope.topic)
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to create topic"));
                Err(err)
            }
        }
    }

    /// Update a topic in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn update(
        &self,
        id: &str,
        category_id: &str,
        draft: TopicDraft,
    ) -> Result<Topic, ClientError> {
        validate::guard_topic(&draft, DraftMode::Edit { id }, self.read().items())?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::topic_fields(draft, category_id))?;
        let path = format!("/topics/{}", urlencoding::encode(id));
        match self
            .client
            .send_multipart::<TopicEnvelope>(Method::PUT, &path, form)
            .await
        {
            Ok(envelope) => {
                self.write().replace_existing(envelope.topic.clone());
                Ok(envelope.topic)
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to update topic"));
                Err(err)
            }
        }
    }

    /// Delete a topic. Demands an armed typed-gate proof; every lesson and
    /// slide underneath is lost server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn delete(&self, id: &str, _confirmation: DeleteArmed) -> Result<String, ClientError> {
        self.write().begin_mutation();
        let path = format!("/topics/{}", urlencoding::encode(id));
        match self.client.delete(&path).await {
            Ok(()) => {
                self.write().remove(id);
                Ok(id.to_string())
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to delete topic"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn topic_json(id: &str, name: &str) -> String {
        format!(r#"{{"_id": "{id}", "name": "{name}", "category": "cat1"}}"#)
    }

    #[test]
    fn list_envelope_parses() {
        let envelope: TopicsEnvelope = serde_json::from_str(&format!(
            r#"{{"topics": [{}]}}"#,
            topic_json("t1", "Kitchen")
        ))
        .unwrap();
        assert_eq!(envelope.topics.len(), 1);
        assert_eq!(envelope.topics[0].name, "Kitchen");
    }

    // Scenario from the console's daily flow: load a category's topics,
    // then create one — the new topic must land at the head.
    #[test]
    fn created_topic_lands_at_the_head_of_the_loaded_list() {
        let mut collection: Collection<Topic> = Collection::new();
        let ticket = collection.begin_fetch();
        let fetched: TopicsEnvelope = serde_json::from_str(&format!(
            r#"{{"topics": [{}]}}"#,
            topic_json("t1", "Kitchen")
        ))
        .unwrap();
        collection.apply_list(ticket, fetched.topics);

        collection.begin_mutation();
        let created: TopicEnvelope = serde_json::from_str(&format!(
            r#"{{"topic": {}}}"#,
            topic_json("t2", "Bedroom")
        ))
        .unwrap();
        collection.insert_newest_first(created.topic);

        let ids: Vec<&str> = collection.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert!(collection.success());
    }
}
