//! Transport gateway: every outbound call goes through [`AdminClient`].
//!
//! Responsibilities, in order:
//! - attach the bearer credential read from the session store (never written
//!   here);
//! - leave multipart content-type to reqwest so the boundary is computed by
//!   the transport;
//! - intercept 401 on ANY response and force session teardown, regardless of
//!   which call triggered it;
//! - surface other non-2xx statuses with the server's `message` when the
//!   error body carries one.
//!
//! No retry, no cancellation, no timeout beyond transport defaults: each
//! call runs to completion or failure exactly once.

use std::sync::Arc;

use parlo_auth::SessionStore;
use parlo_config::ApiConfig;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AdminClient {
    /// Create a gateway bound to a session store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("parlo-admin/0.1")
                .build()
                .expect("reqwest client should build"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "dispatching request");
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(credential) = self.session.credential() {
            builder = builder.bearer_auth(credential);
        }
        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.request(Method::GET, path).send().await?;
        Ok(self.check(resp).await?.json().await?)
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        Ok(self.check(resp).await?.json().await?)
    }

    /// POST/PUT a multipart body. No explicit content-type header: reqwest
    /// sets `multipart/form-data` with its own boundary.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let resp = self.request(method, path).multipart(form).send().await?;
        Ok(self.check(resp).await?.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let resp = self.request(Method::DELETE, path).send().await?;
        self.check(resp).await?;
        Ok(())
    }

    /// Classify a response. 401 tears the session down as a hard side effect
    /// before the error is even returned — including for calls unrelated to
    /// the current view.
    pub(crate) async fn check(&self, resp: Response) -> Result<Response, ClientError> {
        if resp.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("401 received; tearing the session down");
            self.session.invalidate();
            return Err(ClientError::Unauthorized);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                message: extract_message(&body),
            });
        }
        Ok(resp)
    }
}

/// Pull the conventional `{ "message": ... }` out of an error body, if any.
fn extract_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client_with(session: Arc<SessionStore>) -> AdminClient {
        let config = ApiConfig {
            base_url: "http://example.invalid/api/v1".into(),
        };
        AdminClient::new(&config, session)
    }

    fn mock_response(status: u16, body: &'static str) -> Response {
        Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn extract_message_from_error_body() {
        assert_eq!(
            extract_message(r#"{"message": "Name already exists"}"#),
            Some("Name already exists".to_string())
        );
        assert_eq!(extract_message(r#"{"message": ""}"#), None);
        assert_eq!(extract_message("<html>gateway timeout</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = ApiConfig {
            base_url: "http://example.invalid/api/v1/".into(),
        };
        let client = AdminClient::new(&config, Arc::new(SessionStore::unauthenticated()));
        assert_eq!(client.base_url, "http://example.invalid/api/v1");
    }

    #[tokio::test]
    async fn check_passes_success_through() {
        let client = client_with(Arc::new(SessionStore::unauthenticated()));
        let resp = mock_response(200, r#"{"categories": []}"#);
        assert!(client.check(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_surfaces_server_message() {
        let client = client_with(Arc::new(SessionStore::unauthenticated()));
        let resp = mock_response(409, r#"{"message": "Name already exists"}"#);
        let err = client.check(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api {
                status: 409,
                message: Some(ref m)
            } if m == "Name already exists"
        ));
    }

    #[tokio::test]
    async fn check_falls_back_on_unparseable_body() {
        let client = client_with(Arc::new(SessionStore::unauthenticated()));
        let resp = mock_response(500, "Internal Server Error");
        let err = client.check(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api {
                status: 500,
                message: None
            }
        ));
    }

    #[tokio::test]
    async fn any_401_tears_the_session_down() {
        // Ephemeral session: teardown must not touch the real keyring.
        let session = Arc::new(SessionStore::ephemeral(Some("stale".into())));
        let client = client_with(Arc::clone(&session));

        let resp = mock_response(401, r#"{"message": "jwt expired"}"#);
        let err = client.check(resp).await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized));
        assert!(!session.is_authenticated());
        assert!(session.credential().is_none());
        assert!(session.take_teardown());
    }
}
