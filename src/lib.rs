//! Client-side route guard for role-segmented web apps.
//!
//! Before a protected page renders, [`AccessGuard`] decides whether the
//! current browser context may see it. It combines three signals:
//! - **Credential**: a session token and user descriptor held locally
//!   ([`CredentialStore`])
//! - **Provenance**: a referrer heuristic that catches deep links from outside
//!   the app ([`ProvenanceClassifier`])
//! - **Session**: a backend confirmation that the token is still live
//!   ([`SessionVerifier`])
//!
//! A [`RoleGate`] then checks the confirmed user's role against the role the
//! [`RouteTable`] declares for the page.
//!
//! # Core Types
//!
//! - [`AccessGuard`]: runs the admission sequence for each navigation attempt
//! - [`Verdict`]: `Allow` or `Deny` with a [`Redirect`] to login
//! - [`GuardView`]: what to render (loading, page, or redirect) right now
//! - [`SessionToken`]: bearer token that formats as `[REDACTED]`
//!
//! The referrer check is a heuristic, not a security boundary. Only a
//! backend-confirmed session can produce [`Verdict::Allow`].
//!
//! # Examples
//!
//! ```
//! use futures::executor::block_on;
//! use route_guard::testing::{MemoryCredentialStore, StaticVerifier};
//! use route_guard::{AccessGuard, DenyKind, GuardConfig, NavigationContext, Outcome};
//!
//! let config = GuardConfig::from_json(r#"{"routes": {"/admin/*": "admin"}}"#)?;
//! let guard = AccessGuard::from_config(
//!     MemoryCredentialStore::new(),
//!     StaticVerifier::valid(),
//!     &config,
//! )?;
//!
//! let nav = NavigationContext::new("/admin/users", "https://pickup.example");
//! let outcome = block_on(guard.evaluate(&nav));
//!
//! let denial = outcome.verdict().and_then(|v| v.denial()).unwrap();
//! assert_eq!(denial.kind, DenyKind::MissingCredential);
//! assert_eq!(denial.redirect.target, "/login");
//! assert_eq!(denial.redirect.from, "/admin/users");
//! # Ok::<(), route_guard::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod credential;
mod error;
mod gate;
mod guard;
pub mod logging;
mod navigation;
mod provenance;
mod role;
mod routes;
mod state;
mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token;
mod verdict;
mod verifier;

pub use config::{GuardConfig, Landing};
pub use credential::{Credential, User};
pub use error::{ConfigError, Denial, DenyKind};
pub use gate::RoleGate;
pub use guard::{AccessGuard, AUTH_FAILED, AUTH_REQUIRED, DIRECT_ACCESS_DENIED, SESSION_EXPIRED};
pub use logging::AttemptLog;
pub use navigation::{AttemptId, NavigationContext};
pub use provenance::{Provenance, ProvenanceClassifier, DEFAULT_AUTH_PAGES};
pub use role::Role;
pub use routes::RouteTable;
pub use state::GuardState;
pub use store::{
    CredentialStore, KeyValueBackend, KeyValueCredentialStore, MemoryBackend, StoreError,
    TOKEN_KEY, USER_KEY,
};
pub use token::SessionToken;
pub use verdict::{GuardView, Outcome, Redirect, Verdict};
#[cfg(feature = "http")]
pub use verifier::HttpSessionVerifier;
pub use verifier::{SessionCheck, SessionCheckResponse, SessionVerifier, TransportError};
