//! # parlo-auth
//!
//! Admin session state and credential persistence for the Parlo console.
//!
//! The session is a two-state machine (`Unauthenticated` ⇄ `Authenticated`)
//! with one deliberate looseness: on startup the state is derived from the
//! *presence* of a persisted credential, never from validating it against the
//! server. A stale credential therefore yields an optimistic authenticated
//! session until the first request fails with 401 and the transport layer
//! calls [`SessionStore::invalidate`].
//!
//! The persisted credential is a single external slot (OS keyring with file
//! fallback) isolated from any learner-app session on the same device. This
//! store is its only writer; the transport layer only reads it through
//! [`SessionStore::credential`].

pub mod credential_store;
mod error;

pub use error::AuthError;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

/// The authenticated admin as returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authentication status of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    /// `admin` is `None` when the session was restored from a persisted
    /// credential — identity only becomes known after an explicit login.
    Authenticated { admin: Option<AdminIdentity> },
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    credential: Option<String>,
    /// Login-scoped request flags; no other operation touches them.
    loading: bool,
    error: Option<String>,
    /// Raised once a registration OTP request succeeds.
    otp_sent: bool,
    /// Set by [`SessionStore::invalidate`]; the UI shell consumes it once to
    /// route back to the login screen.
    torn_down: bool,
    /// When false, the external credential slot is never touched
    /// ([`SessionStore::ephemeral`]).
    persist: bool,
}

/// Shared session state. The sole writer of the persisted credential.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<Inner>,
}

impl SessionStore {
    /// Fresh, unauthenticated store that ignores any persisted credential.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::from_credential(None, true)
    }

    /// Derive the initial state from the persisted credential slot.
    ///
    /// Presence alone decides: an invalid credential still bootstraps as
    /// authenticated and is torn down by the first 401.
    #[must_use]
    pub fn bootstrap() -> Self {
        Self::from_credential(credential_store::load(), true)
    }

    /// In-memory session that never reads or writes the external credential
    /// slot. For tests and embedded tooling.
    #[must_use]
    pub fn ephemeral(credential: Option<String>) -> Self {
        Self::from_credential(credential, false)
    }

    fn from_credential(credential: Option<String>, persist: bool) -> Self {
        let state = if credential.is_some() {
            SessionState::Authenticated { admin: None }
        } else {
            SessionState::Unauthenticated
        };
        Self {
            inner: RwLock::new(Inner {
                state,
                credential,
                loading: false,
                error: None,
                otp_sent: false,
                torn_down: false,
                persist,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.read().state, SessionState::Authenticated { .. })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read().state.clone()
    }

    #[must_use]
    pub fn admin(&self) -> Option<AdminIdentity> {
        match &self.read().state {
            SessionState::Authenticated { admin } => admin.clone(),
            SessionState::Unauthenticated => None,
        }
    }

    /// Current bearer credential, if any. Read by the transport layer on
    /// every outbound request.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.read().credential.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    #[must_use]
    pub fn otp_sent(&self) -> bool {
        self.read().otp_sent
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    /// Mark a login (or OTP request) as in flight.
    pub fn begin_login(&self) {
        let mut inner = self.write();
        inner.loading = true;
        inner.error = None;
    }

    /// Record a successful login: identity and credential in memory, the
    /// credential persisted externally.
    ///
    /// The in-memory session is established even when persistence fails —
    /// the server accepted the login; only restart survival is lost.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialStore`] if the credential could not be
    /// persisted.
    pub fn complete_login(
        &self,
        admin: AdminIdentity,
        credential: String,
    ) -> Result<(), AuthError> {
        let persist = {
            let mut inner = self.write();
            inner.loading = false;
            inner.state = SessionState::Authenticated { admin: Some(admin) };
            inner.credential = Some(credential.clone());
            inner.torn_down = false;
            inner.persist
        };
        if persist {
            credential_store::store(&credential)?;
        }
        Ok(())
    }

    /// Record a failed login.
    pub fn fail_login(&self, message: impl Into<String>) {
        let mut inner = self.write();
        inner.loading = false;
        inner.error = Some(message.into());
    }

    /// Record that a registration OTP was dispatched.
    pub fn mark_otp_sent(&self) {
        let mut inner = self.write();
        inner.loading = false;
        inner.otp_sent = true;
    }

    /// Explicit logout: clear the session and the persisted credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialStore`] if the persisted credential
    /// could not be removed; the in-memory session is cleared regardless.
    pub fn logout(&self) -> Result<(), AuthError> {
        let persist = self.read().persist;
        self.clear_session();
        if persist {
            credential_store::delete()?;
        }
        Ok(())
    }

    /// Forced teardown on a 401, regardless of which call triggered it.
    ///
    /// Clears the session, best-effort deletes the persisted credential, and
    /// raises the teardown flag for the UI shell.
    pub fn invalidate(&self) {
        let persist = self.read().persist;
        self.clear_session();
        if persist {
            if let Err(error) = credential_store::delete() {
                tracing::warn!(%error, "failed to clear persisted credential during teardown");
            }
        }
        self.write().torn_down = true;
    }

    /// One-shot consumption of the teardown signal.
    pub fn take_teardown(&self) -> bool {
        let mut inner = self.write();
        std::mem::take(&mut inner.torn_down)
    }

    fn clear_session(&self) {
        let mut inner = self.write();
        inner.state = SessionState::Unauthenticated;
        inner.credential = None;
        inner.loading = false;
        inner.otp_sent = false;
    }
}
