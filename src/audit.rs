//! Audit trail of guard decisions.
//!
//! Every evaluation that reaches a terminal state (or is superseded) leaves a
//! [`GuardEvent`] behind. Events hold identifiers only: the path, the user id
//! and the deny kind. Never the token.

mod event;
mod trail;

pub use event::{GuardEvent, GuardOutcome};
pub use trail::{AuditTrail, DEFAULT_CAPACITY};
