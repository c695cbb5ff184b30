//! Fakes for exercising the guard without a browser or a backend.
//!
//! Compiled for the crate's own tests and behind the `testing` feature.
//!
//! - [`MemoryCredentialStore`] counts reads and clears.
//! - [`StaticVerifier`] answers every check the same way.
//! - [`ScriptedVerifier`] hands out one oneshot sender per expected check, so
//!   a test decides exactly when (and in which order) responses arrive.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::credential::{Credential, User};
use crate::store::{CredentialStore, StoreError};
use crate::token::SessionToken;
use crate::verifier::{SessionCheck, SessionVerifier, TransportError};

/// In-memory [`CredentialStore`] that counts reads and clears.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entry: RefCell<Option<(String, User)>>,
    reads: Cell<usize>,
    clears: Cell<usize>,
}

impl MemoryCredentialStore {
    /// An empty store (signed out).
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a credential.
    pub fn signed_in(token: impl Into<String>, user: User) -> Self {
        let store = Self::new();
        *store.entry.borrow_mut() = Some((token.into(), user));
        store
    }

    /// Number of `read` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Number of `clear` calls so far.
    pub fn clear_count(&self) -> usize {
        self.clears.get()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self) -> Option<Credential> {
        self.reads.set(self.reads.get() + 1);
        self.entry
            .borrow()
            .as_ref()
            .map(|(token, user)| Credential::new(token.clone(), user.clone()))
    }

    fn write(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.entry.borrow_mut() = Some((
            credential.token.expose_secret().to_string(),
            credential.user.clone(),
        ));
        Ok(())
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
        *self.entry.borrow_mut() = None;
    }
}

/// [`SessionVerifier`] returning the same answer to every call.
#[derive(Debug)]
pub struct StaticVerifier {
    response: Result<SessionCheck, TransportError>,
    tokens: RefCell<Vec<String>>,
}

impl StaticVerifier {
    /// Answers with `response`.
    pub fn new(response: Result<SessionCheck, TransportError>) -> Self {
        Self {
            response,
            tokens: RefCell::new(Vec::new()),
        }
    }

    /// Every session is valid.
    pub fn valid() -> Self {
        Self::new(Ok(SessionCheck::valid()))
    }

    /// Every session is rejected with `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(Ok(SessionCheck::rejected(message)))
    }

    /// Every call fails at the transport level.
    pub fn failing(error: TransportError) -> Self {
        Self::new(Err(error))
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.tokens.borrow().len()
    }

    /// Raw tokens presented, in call order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SessionVerifier for StaticVerifier {
    async fn verify(&self, token: &SessionToken) -> Result<SessionCheck, TransportError> {
        self.tokens
            .borrow_mut()
            .push(token.expose_secret().to_string());
        self.response.clone()
    }
}

/// Sender half handed to the test for one scripted verification.
pub type ScriptedReply = oneshot::Sender<Result<SessionCheck, TransportError>>;

/// [`SessionVerifier`] whose answers the test delivers by hand.
///
/// Each [`respond_later`](Self::respond_later) queues one pending answer;
/// calls to `verify` take them in order and wait until the matching sender
/// is used. A call with nothing queued, or whose sender is dropped, fails
/// with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedVerifier {
    pending: RefCell<VecDeque<oneshot::Receiver<Result<SessionCheck, TransportError>>>>,
    calls: Cell<usize>,
}

impl ScriptedVerifier {
    /// Creates a verifier with no queued answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer for the next unanswered `verify` call.
    pub fn respond_later(&self) -> ScriptedReply {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl SessionVerifier for ScriptedVerifier {
    async fn verify(&self, _token: &SessionToken) -> Result<SessionCheck, TransportError> {
        self.calls.set(self.calls.get() + 1);
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("response dropped".into()))),
            None => Err(TransportError::Network("no scripted response".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::role::Role;

    fn user() -> User {
        User {
            id: "u-1".into(),
            role: Role::Customer,
            display_name: String::new(),
        }
    }

    #[test]
    fn memory_store_counts() {
        let store = MemoryCredentialStore::signed_in("tok", user());
        assert!(store.read().is_some());
        store.clear();
        store.clear();
        assert!(store.read().is_none());
        assert_eq!(store.read_count(), 2);
        assert_eq!(store.clear_count(), 2);
    }

    #[test]
    fn memory_store_write() {
        let store = MemoryCredentialStore::new();
        store.write(&Credential::new("t2", user())).unwrap();
        assert_eq!(store.read().unwrap().token.expose_secret(), "t2");
    }

    #[test]
    fn scripted_verifier_answers_in_order() {
        let verifier = ScriptedVerifier::new();
        let first = verifier.respond_later();
        let second = verifier.respond_later();
        first.send(Ok(SessionCheck::valid())).unwrap();
        second.send(Ok(SessionCheck::rejected("no"))).unwrap();

        let token = SessionToken::new("t");
        assert_eq!(block_on(verifier.verify(&token)), Ok(SessionCheck::valid()));
        assert_eq!(
            block_on(verifier.verify(&token)),
            Ok(SessionCheck::rejected("no"))
        );
        assert_eq!(verifier.calls(), 2);
    }

    #[test]
    fn scripted_verifier_without_answer_fails() {
        let verifier = ScriptedVerifier::new();
        let result = block_on(verifier.verify(&SessionToken::new("t")));
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[test]
    fn dropped_reply_is_a_transport_error() {
        let verifier = ScriptedVerifier::new();
        drop(verifier.respond_later());
        let result = block_on(verifier.verify(&SessionToken::new("t")));
        assert_eq!(
            result,
            Err(TransportError::Network("response dropped".into()))
        );
    }
}
