//! The access guard: admission checks for protected navigations.
//!
//! For every navigation to a protected path the guard runs, strictly in this
//! order:
//!
//! 1. **Credential**: no locally held credential means an immediate deny, with
//!    no network call.
//! 2. **Provenance**: a referrer from outside the app purges local state and
//!    denies. This is a heuristic in front of step 3, never a replacement
//!    for it.
//! 3. **Session**: the backend confirms the token. Only a confirmed session
//!    can produce `Allow`.
//! 4. **Role**: the confirmed user's role must own the page.
//!
//! # Stale responses
//!
//! Each evaluation is tagged with a fresh [`AttemptId`]. Starting a new
//! evaluation (or logging out) makes every older attempt stale. A stale
//! attempt's verification result is discarded when it arrives and the
//! evaluation resolves to [`Outcome::Superseded`]. Nothing is cancelled and
//! no lock is taken: the UI event loop is single-threaded, and the attempt
//! tag is the only synchronization.

use std::cell::{Cell, RefCell};

use crate::audit::{AuditTrail, GuardEvent};
use crate::config::GuardConfig;
use crate::credential::Credential;
use crate::error::{ConfigError, Denial, DenyKind};
use crate::gate::RoleGate;
use crate::logging::AttemptLog;
use crate::navigation::{AttemptId, NavigationContext};
use crate::provenance::ProvenanceClassifier;
use crate::routes::RouteTable;
use crate::state::GuardState;
use crate::store::CredentialStore;
use crate::verdict::{GuardView, Outcome, Redirect, Verdict};
use crate::verifier::SessionVerifier;

/// Message for a navigation without a stored credential.
pub const AUTH_REQUIRED: &str = "Authentication required";
/// Message for a navigation flagged by the referrer heuristic.
pub const DIRECT_ACCESS_DENIED: &str = "Direct access not allowed. Please log in again.";
/// Fallback when the backend rejects the session without a reason.
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
/// Message when the session check could not be performed.
pub const AUTH_FAILED: &str = "Authentication failed. Please log in again.";

#[derive(Debug, Clone)]
enum Slot {
    Public,
    Guarded(GuardState),
}

#[derive(Debug, Clone)]
struct Current {
    id: AttemptId,
    slot: Slot,
}

/// Decides, for each protected navigation, whether the page may render.
///
/// Generic over the credential store and the session verifier so it runs
/// against real browser storage and HTTP in the app, and against fakes in
/// tests.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use route_guard::testing::{MemoryCredentialStore, StaticVerifier};
/// use route_guard::{AccessGuard, GuardView, NavigationContext, Outcome, Role, RouteTable, User, Verdict};
///
/// let store = MemoryCredentialStore::signed_in(
///     "tok",
///     User { id: "u-1".into(), role: Role::Customer, display_name: "Ama".into() },
/// );
/// let routes = RouteTable::new().protect("/customer/*", Role::Customer)?;
/// let guard = AccessGuard::new(store, StaticVerifier::valid(), routes);
///
/// let nav = NavigationContext::new("/customer/orders", "https://pickup.example");
/// assert_eq!(block_on(guard.evaluate(&nav)), Outcome::Decided(Verdict::Allow));
/// assert_eq!(guard.view(), GuardView::Render);
/// # Ok::<(), route_guard::ConfigError>(())
/// ```
pub struct AccessGuard<S, V> {
    store: S,
    verifier: V,
    classifier: ProvenanceClassifier,
    routes: RouteTable,
    role_gate: RoleGate,
    login_path: String,
    next_attempt: Cell<u64>,
    current: RefCell<Option<Current>>,
    audit: Option<AuditTrail>,
}

impl<S: CredentialStore, V: SessionVerifier> AccessGuard<S, V> {
    /// Creates a guard with the default login path and landing pages.
    pub fn new(store: S, verifier: V, routes: RouteTable) -> Self {
        let defaults = GuardConfig::default();
        Self {
            store,
            verifier,
            classifier: ProvenanceClassifier::new(),
            routes,
            role_gate: RoleGate::new(defaults.landing, defaults.login_path.clone()),
            login_path: defaults.login_path,
            next_attempt: Cell::new(1),
            current: RefCell::new(None),
            audit: None,
        }
    }

    /// Creates a guard from a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a path is relative, a route has no role or an
    /// unknown one, or a route is declared twice.
    pub fn from_config(store: S, verifier: V, config: &GuardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let routes = RouteTable::from_config(&config.routes)?;

        let mut guard = Self::new(store, verifier, routes);
        guard.role_gate = RoleGate::new(config.landing.clone(), config.login_path.clone());
        guard.login_path = config.login_path.clone();
        Ok(guard)
    }

    /// Records every decision in `trail`.
    pub fn with_audit(mut self, trail: AuditTrail) -> Self {
        self.audit = Some(trail);
        self
    }

    /// Evaluates one navigation attempt.
    ///
    /// Starting an evaluation supersedes any evaluation still awaiting the
    /// backend. Never fails: every problem resolves into a deny verdict with
    /// a readable message.
    pub async fn evaluate(&self, nav: &NavigationContext) -> Outcome {
        let id = self.next_id();
        let log = AttemptLog::new(id, &nav.requested_path);

        let Some(required) = self.routes.required_role(nav.path()) else {
            self.replace_current(id, Slot::Public);
            log.debug(format_args!("public route, no checks"));
            return Outcome::Public;
        };
        self.replace_current(id, Slot::Guarded(GuardState::Init));

        self.advance(id, GuardState::CheckingCredential, &log);
        let Some(credential) = self.store.read().filter(|c| !c.token.is_blank()) else {
            return self.deny(id, nav, None, DenyKind::MissingCredential, AUTH_REQUIRED, &log);
        };

        self.advance(id, GuardState::ClassifyingProvenance, &log);
        if !self.classifier.classify(nav).trusted {
            self.store.clear();
            return self.deny(
                id,
                nav,
                Some(&credential),
                DenyKind::SuspiciousProvenance,
                DIRECT_ACCESS_DENIED,
                &log,
            );
        }

        self.advance(id, GuardState::VerifyingSession, &log);
        let result = self.verifier.verify(&credential.token).await;

        if !self.is_current(id) {
            log.warn(format_args!(
                "navigation changed while verifying session; result discarded"
            ));
            self.record(GuardEvent::superseded(id.get(), nav.requested_path.as_str()));
            return Outcome::Superseded;
        }

        match result {
            Ok(check) if check.valid => {}
            Ok(check) => {
                let message = check
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SESSION_EXPIRED.to_string());
                return self.deny(
                    id,
                    nav,
                    Some(&credential),
                    DenyKind::SessionInvalid,
                    &message,
                    &log,
                );
            }
            Err(err) => {
                log.error(format_args!("session check failed: {}", err));
                return self.deny(
                    id,
                    nav,
                    Some(&credential),
                    DenyKind::TransportFailure,
                    AUTH_FAILED,
                    &log,
                );
            }
        }

        match self
            .role_gate
            .check(credential.user.role, required, &nav.requested_path)
        {
            Verdict::Allow => {
                self.advance(id, GuardState::Allowed, &log);
                log.info(format_args!(
                    "allowed {} user {}",
                    credential.user.role, credential.user.id
                ));
                self.record(GuardEvent::allowed(
                    id.get(),
                    nav.requested_path.as_str(),
                    credential.user.id.as_str(),
                ));
                Outcome::Decided(Verdict::Allow)
            }
            Verdict::Deny(denial) => self.finish_denied(id, nav, Some(&credential), denial, &log),
        }
    }

    /// Signs the user out: clears local state and supersedes any in-flight
    /// evaluation.
    pub fn logout(&self) {
        self.store.clear();
        let previous = self.current.borrow_mut().take();
        if let Some(previous) = previous {
            tracing::info!(attempt_id = %previous.id, "signed out; current attempt dropped");
        }
        // Burn an id so a verification still in flight can never match.
        self.next_id();
    }

    /// What to render for the current navigation.
    pub fn view(&self) -> GuardView {
        match self.current.borrow().as_ref().map(|c| &c.slot) {
            None => GuardView::Loading,
            Some(Slot::Public) | Some(Slot::Guarded(GuardState::Allowed)) => GuardView::Render,
            Some(Slot::Guarded(GuardState::Denied(denial))) => {
                GuardView::Redirect(denial.redirect.clone())
            }
            Some(Slot::Guarded(_)) => GuardView::Loading,
        }
    }

    /// State of the current attempt; `None` before any navigation, after
    /// logout, or on a public route.
    pub fn state(&self) -> Option<GuardState> {
        match self.current.borrow().as_ref().map(|c| &c.slot) {
            Some(Slot::Guarded(state)) => Some(state.clone()),
            _ => None,
        }
    }

    /// Id of the current attempt.
    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current.borrow().as_ref().map(|c| c.id)
    }

    /// The credential store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The session verifier.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The audit trail, if one was installed.
    pub fn audit(&self) -> Option<&AuditTrail> {
        self.audit.as_ref()
    }

    fn next_id(&self) -> AttemptId {
        let raw = self.next_attempt.get();
        self.next_attempt.set(raw + 1);
        AttemptId::new(raw)
    }

    fn replace_current(&self, id: AttemptId, slot: Slot) {
        *self.current.borrow_mut() = Some(Current { id, slot });
    }

    fn is_current(&self, id: AttemptId) -> bool {
        self.current_attempt() == Some(id)
    }

    fn advance(&self, id: AttemptId, next: GuardState, log: &AttemptLog<'_>) {
        let mut current = self.current.borrow_mut();
        let Some(Current {
            id: current_id,
            slot: Slot::Guarded(state),
        }) = current.as_mut()
        else {
            return;
        };
        if *current_id != id {
            return;
        }
        debug_assert!(
            state.can_advance_to(&next),
            "illegal guard transition {} -> {}",
            state,
            next
        );
        log.debug(format_args!("{} -> {}", state, next));
        *state = next;
    }

    fn deny(
        &self,
        id: AttemptId,
        nav: &NavigationContext,
        credential: Option<&Credential>,
        kind: DenyKind,
        message: &str,
        log: &AttemptLog<'_>,
    ) -> Outcome {
        let redirect = Redirect::new(&self.login_path, &nav.requested_path, message);
        self.finish_denied(id, nav, credential, Denial::new(kind, redirect), log)
    }

    fn finish_denied(
        &self,
        id: AttemptId,
        nav: &NavigationContext,
        credential: Option<&Credential>,
        denial: Denial,
        log: &AttemptLog<'_>,
    ) -> Outcome {
        log.denied(
            &denial.kind,
            format_args!("denied, redirecting to {}", denial.redirect.target),
        );
        self.record(GuardEvent::denied(
            id.get(),
            nav.requested_path.as_str(),
            credential.map(|c| c.user.id.as_str()),
            &denial.kind,
        ));
        self.advance(id, GuardState::Denied(denial.clone()), log);
        Outcome::Decided(Verdict::Deny(denial))
    }

    fn record(&self, event: GuardEvent) {
        if let Some(trail) = &self.audit {
            trail.record(event);
        }
    }
}
