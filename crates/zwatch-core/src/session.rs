//! Session state machine
//!
//! The session is either signed out or holds a complete [`Credential`]. The
//! view shown to the user is derived from it and never stored on its own.
//! Persistence happens only at the transitions: [`Session::restore`] on start,
//! [`Session::sign_in`] after login/register, [`Session::sign_out`] on logout.

use std::fmt;

use crate::config::StorageKeys;
use crate::error::{Result, ZWatchError};
use crate::store::CredentialStore;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Identity and token of an authenticated user
///
/// Both parts are always non-empty; a partial credential cannot be built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    identity: String,
    token: String,
}

impl Credential {
    /// Build a credential, or `None` if either part is missing
    pub fn new(identity: impl Into<String>, token: impl Into<String>) -> Option<Self> {
        let identity = identity.into();
        let token = token.into();
        if identity.is_empty() || token.is_empty() {
            return None;
        }
        Some(Self { identity, token })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Which top-level view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unauthenticated,
    Authenticated,
}

/// Authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(Credential),
}

impl Session {
    /// Read the session from durable storage
    ///
    /// Storage errors and partial credentials both leave the user signed out.
    pub fn restore(store: &dyn CredentialStore, keys: &StorageKeys) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read '{}' from credential store: {}", key, e);
                None
            }
        };

        let identity = read(&keys.identity_key);
        let token = read(&keys.token_key);

        match (identity, token) {
            (Some(identity), Some(token)) => match Credential::new(identity, token) {
                Some(credential) => {
                    tracing::debug!("Restored session for '{}'", credential.identity());
                    Session::Authenticated(credential)
                }
                None => Session::Unauthenticated,
            },
            (None, None) => Session::Unauthenticated,
            _ => {
                tracing::debug!("Ignoring partial credential in storage");
                Session::Unauthenticated
            }
        }
    }

    /// Persist the credential and enter the authenticated state
    ///
    /// A storage failure is logged; the session still holds the credential
    /// in memory for the lifetime of the process.
    pub fn sign_in(store: &dyn CredentialStore, keys: &StorageKeys, credential: Credential) -> Self {
        let persisted = store
            .set(&keys.identity_key, credential.identity())
            .and_then(|_| store.set(&keys.token_key, credential.token()));
        if let Err(e) = persisted {
            tracing::warn!("Failed to persist credential: {}", e);
        }
        tracing::info!("Signed in as '{}'", credential.identity());
        Session::Authenticated(credential)
    }

    /// Clear the credential from storage and enter the unauthenticated state
    pub fn sign_out(store: &dyn CredentialStore, keys: &StorageKeys) -> Self {
        for key in [&keys.identity_key, &keys.token_key] {
            if let Err(e) = store.remove(key) {
                tracing::warn!("Failed to remove '{}' from credential store: {}", key, e);
            }
        }
        tracing::info!("Signed out");
        Session::Unauthenticated
    }

    pub fn view(&self) -> ViewState {
        match self {
            Session::Unauthenticated => ViewState::Unauthenticated,
            Session::Authenticated(_) => ViewState::Authenticated,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Session::Unauthenticated => None,
            Session::Authenticated(credential) => Some(credential),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }
}

/// Check login input before anything is sent
pub fn validate_login(identity: &str, password: &str) -> Result<()> {
    if identity.is_empty() || password.is_empty() {
        return Err(ZWatchError::Validation(
            "Please enter username and password".to_string(),
        ));
    }
    Ok(())
}

/// Check registration input before anything is sent
pub fn validate_register(identity: &str, password: &str) -> Result<()> {
    validate_login(identity, password)?;
    // Length in UTF-16 code units, as a browser input reports it.
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ZWatchError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
