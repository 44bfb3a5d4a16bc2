//! Remote API configuration.

use serde::{Deserialize, Serialize};

/// Default backend base URL, versioned API root included.
fn default_base_url() -> String {
    "https://api.parlo.app/api/v1".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Check that the API section points somewhere usable.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}
