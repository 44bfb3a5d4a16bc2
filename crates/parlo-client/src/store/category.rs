//! Category store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use parlo_core::Category;
use reqwest::Method;
use serde::Deserialize;

use super::collection::Collection;
use crate::confirm::ConfirmPolicy;
use crate::drafts::CategoryDraft;
use crate::error::ClientError;
use crate::gateway::AdminClient;
use crate::multipart;
use crate::validate::{self, DraftMode};

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct CategoryEnvelope {
    category: Category,
}

#[derive(Deserialize)]
struct UpdatedCategoryEnvelope {
    #[serde(rename = "updatedCategory")]
    updated_category: Category,
}

/// Ordered category collection with the shared lifecycle flags.
#[derive(Debug)]
pub struct CategoryStore {
    client: AdminClient,
    state: RwLock<Collection<Category>>,
}

impl CategoryStore {
    /// Deleting a category only needs a plain yes/no in the UI shell.
    pub const DELETE_POLICY: ConfirmPolicy = ConfirmPolicy::Simple;

    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(Collection::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Collection<Category>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collection<Category>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Category> {
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

    /// Replace the collection with the server's category list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_all(&self) -> Result<Vec<Category>, ClientError> {
        let ticket = self.write().begin_fetch();
        match self.client.get_json::<CategoriesEnvelope>("/categories").await {
            Ok(envelope) => {
                self.write().apply_list(ticket, envelope.categories.clone());
                Ok(envelope.categories)
            }
            Err(err) => {
                self.write()
                    .fail_fetch(ticket, err.flag_message("Failed to load categories"));
                Err(err)
            }
        }
    }

    /// Create a category. The guard runs first; a rejected draft never
    /// reaches the transport and leaves the flags untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, ClientError> {
        validate::guard_category(&draft, DraftMode::Create, self.read().items())?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::category_fields(draft))?;
        match self
            .client
            .send_multipart::<CategoryEnvelope>(Method::POST, "/categories", form)
            .await
        {
            Ok(envelope) => {
                self.write().insert_newest_first(envelope.category.clone());
                Ok(envelope.category)
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to create category"));
                Err(err)
            }
        }
    }

    /// Update a category in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] on a failed guard check, otherwise
    /// [`ClientError`] on transport/server failure.
    pub async fn update(&self, id: &str, draft: CategoryDraft) -> Result<Category, ClientError> {
        validate::guard_category(&draft, DraftMode::Edit { id }, self.read().items())?;
        self.write().begin_mutation();
        let form = multipart::build(multipart::category_fields(draft))?;
        let path = format!("/categories/{}", urlencoding::encode(id));
        match self
            .client
            .send_multipart::<UpdatedCategoryEnvelope>(Method::PUT, &path, form)
            .await
        {
            Ok(envelope) => {
                self.write()
                    .replace_existing(envelope.updated_category.clone());
                Ok(envelope.updated_category)
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to update category"));
                Err(err)
            }
        }
    }

    /// Delete a category. Descendant topics are orphaned server-side; the
    /// cache only removes this one entry and relies on later fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        self.write().begin_mutation();
        let path = format!("/categories/{}", urlencoding::encode(id));
        match self.client.delete(&path).await {
            Ok(()) => {
                self.write().remove(id);
                Ok(id.to_string())
            }
            Err(err) => {
                self.write()
                    .fail(err.flag_message("Failed to delete category"));
                Err(err)
            }
        }
    }
}
