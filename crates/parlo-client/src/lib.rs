//! # parlo-client
//!
//! State-synchronization core of the Parlo admin console.
//!
//! Provides the transport gateway (`reqwest` with bearer auth and hard 401
//! teardown), one cache store per backend resource (categories, topics,
//! lessons, sentences), the dashboard analytics snapshots, the draft
//! validation guards, multipart upload packaging, and the typed delete
//! confirmation gate.

pub mod confirm;
pub mod drafts;
pub mod error;
pub mod gateway;
pub mod multipart;
pub mod store;
pub mod validate;

mod auth;

use std::sync::Arc;

use parlo_auth::SessionStore;
use parlo_config::ApiConfig;

pub use confirm::{ConfirmPolicy, DeleteArmed, TypedDeleteGate, DELETE_PHRASE};
pub use drafts::{CategoryDraft, FilePart, LessonDraft, SentenceDraft, TopicDraft};
pub use error::ClientError;
pub use gateway::AdminClient;
pub use store::{
    CategoryStore, DashboardStore, LessonStore, SentenceStore, TopicStore,
};
pub use validate::{name_suggestions, ValidationError};

/// The assembled console: one gateway, one session, one store per resource.
///
/// All stores share the same [`AdminClient`] (and through it the same
/// [`SessionStore`]), so a 401 on any call tears down the session every
/// other store sees.
#[derive(Debug)]
pub struct AdminConsole {
    pub client: AdminClient,
    pub session: Arc<SessionStore>,
    pub categories: CategoryStore,
    pub topics: TopicStore,
    pub lessons: LessonStore,
    pub sentences: SentenceStore,
    pub dashboard: DashboardStore,
}

impl AdminConsole {
    /// Assemble the console, restoring any persisted credential.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_session(config, Arc::new(SessionStore::bootstrap()))
    }

    /// Assemble the console around an existing session store.
    #[must_use]
    pub fn with_session(config: &ApiConfig, session: Arc<SessionStore>) -> Self {
        let client = AdminClient::new(config, Arc::clone(&session));
        Self {
            categories: CategoryStore::new(client.clone()),
            topics: TopicStore::new(client.clone()),
            lessons: LessonStore::new(client.clone()),
            sentences: SentenceStore::new(client.clone()),
            dashboard: DashboardStore::new(client.clone()),
            client,
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_stores_share_one_session() {
        let config = ApiConfig {
            base_url: "http://example.invalid/api/v1".into(),
        };
        let session = Arc::new(SessionStore::ephemeral(Some("tok".into())));
        let console = AdminConsole::with_session(&config, Arc::clone(&session));

        assert!(console.session.is_authenticated());
        // Teardown through the shared handle is visible on the console.
        session.invalidate();
        assert!(!console.session.is_authenticated());
    }
}
