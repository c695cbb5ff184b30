//! Client-held credential state.
//!
//! The guard never touches storage directly; it goes through
//! [`CredentialStore`], so tests can swap in a fake and a browser build can
//! back it with `localStorage` (or a cookie jar) through [`KeyValueBackend`].

use std::cell::RefCell;
use std::collections::HashMap;

use crate::credential::{Credential, User};

/// Storage key for the raw session token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded user descriptor.
pub const USER_KEY: &str = "user";

/// Error returned when persisting a credential fails.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The user descriptor could not be encoded
    #[error("cannot encode user descriptor: {0}")]
    Encode(#[from] serde_json::Error),
    /// The underlying key/value storage refused the write
    #[error("storage backend rejected write: {0}")]
    Backend(String),
}

/// Read/write/clear interface over the locally persisted credential.
///
/// # Contract
///
/// - `read` is a pure read and never fails: absence (or unreadable state) is
///   reported as `None`.
/// - `clear` removes every authentication artifact, is idempotent, and runs
///   to completion before returning. A later `read` never sees half of a
///   credential.
pub trait CredentialStore {
    /// Returns the stored credential, if a complete one is present.
    fn read(&self) -> Option<Credential>;

    /// Persists a credential, replacing any previous one.
    ///
    /// Called once login or signup completes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the user descriptor cannot be encoded or the
    /// backend refuses the write.
    fn write(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Removes all locally persisted authentication and session artifacts.
    fn clear(&self);
}

/// Minimal string key/value storage, per origin.
///
/// This is the shape of the browser's `localStorage`: synchronous, string
/// keys and values, survives reload, not readable cross-origin.
pub trait KeyValueBackend {
    /// Returns the value under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` when the storage is full or unavailable.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`; removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// In-process [`KeyValueBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// [`CredentialStore`] persisting the token and the user descriptor as two
/// entries of a [`KeyValueBackend`].
///
/// A credential is only returned when both entries are present and the user
/// entry decodes. Anything else (a lone token, a lone user, a corrupted
/// descriptor) reads as absent, which the guard treats as "not signed in".
///
/// # Examples
///
/// ```
/// use route_guard::{Credential, CredentialStore, KeyValueCredentialStore, MemoryBackend, Role, User};
///
/// let store = KeyValueCredentialStore::new(MemoryBackend::new());
/// assert!(store.read().is_none());
///
/// let user = User { id: "u-1".into(), role: Role::Customer, display_name: "Ama".into() };
/// store.write(&Credential::new("tok", user)).unwrap();
/// assert_eq!(store.read().unwrap().user.role, Role::Customer);
///
/// store.clear();
/// assert!(store.read().is_none());
/// ```
#[derive(Debug, Default)]
pub struct KeyValueCredentialStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> KeyValueCredentialStore<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: KeyValueBackend> CredentialStore for KeyValueCredentialStore<B> {
    fn read(&self) -> Option<Credential> {
        let token = self.backend.get(TOKEN_KEY)?;
        let raw_user = self.backend.get(USER_KEY)?;

        if token.trim().is_empty() {
            return None;
        }

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Credential::new(token, user)),
            Err(err) => {
                tracing::warn!(error = %err, "stored user descriptor is unreadable; treating as signed out");
                None
            }
        }
    }

    fn write(&self, credential: &Credential) -> Result<(), StoreError> {
        let user = serde_json::to_string(&credential.user)?;
        // User first: a failed token write then leaves a lone user entry,
        // which reads as absent.
        self.backend.set(USER_KEY, &user)?;
        if let Err(err) = self
            .backend
            .set(TOKEN_KEY, credential.token.expose_secret())
        {
            self.backend.remove(USER_KEY);
            return Err(err);
        }
        Ok(())
    }

    fn clear(&self) {
        // Token first: once it is gone, read() already reports absence.
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}
