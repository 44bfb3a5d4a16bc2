use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — sign in first")]
    NotAuthenticated,

    #[error("credential store error: {0}")]
    CredentialStore(String),
}
