use std::fs;
use std::path::PathBuf;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "parlo-admin";
// Deliberately distinct from the learner app's keyring user so an admin
// session never collides with a learner session on the same device.
const KEYRING_USER: &str = "admin-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Returns the keyring service name.
///
/// Defaults to `"parlo-admin"`. Override via `PARLO_KEYRING_SERVICE` env var
/// for testing (e.g., `"parlo-admin-test"`) to avoid touching production
/// credentials.
fn keyring_service() -> String {
    std::env::var("PARLO_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store the bearer credential in the OS keychain. Falls back to file if the
/// keyring is unavailable.
///
/// # Errors
///
/// Returns `AuthError::CredentialStore` if both keyring and file storage fail.
pub fn store(credential: &str) -> Result<(), AuthError> {
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(credential) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(credential)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(credential)
        }
    }
}

/// Load the credential. Priority: keyring → `PARLO_AUTH__TOKEN` env →
/// file (`~/.parlo-admin/credentials`).
#[must_use]
pub fn load() -> Option<String> {
    // 1. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        if let Ok(credential) = entry.get_password() {
            if !credential.is_empty() {
                return Some(credential);
            }
        }
    }

    // 2. Environment variable
    if let Ok(credential) = std::env::var("PARLO_AUTH__TOKEN") {
        if !credential.is_empty() {
            return Some(credential);
        }
    }

    // 3. File fallback
    load_file()
}

/// Delete the stored credential from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::CredentialStore` if the credentials file cannot be
/// removed.
pub fn delete() -> Result<(), AuthError> {
    // Delete from keyring (ignore errors — may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    // Delete credentials file
    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::CredentialStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".parlo-admin").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::CredentialStore("home directory not found — cannot store credentials".into())
        })
}

fn store_file(credential: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AuthError::CredentialStore(format!("mkdir {}: {e}", parent.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, credential)
        .map_err(|e| AuthError::CredentialStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::CredentialStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
