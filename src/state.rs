//! States of one guard evaluation.
//!
//! ```text
//! Init -> CheckingCredential -> ClassifyingProvenance -> VerifyingSession -> Allowed
//!               |                       |                       |
//!               +-----------------------+-----------------------+--------> Denied
//! ```
//!
//! The role gate runs while still in `VerifyingSession`, so a role mismatch
//! goes straight to `Denied`. `Allowed` and `Denied` are terminal for the
//! attempt; the next navigation starts again at `Init`.

use std::fmt;

use crate::error::Denial;

/// Where an attempt currently is in the admission sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Attempt registered, nothing checked yet
    Init,
    /// Reading the credential store
    CheckingCredential,
    /// Running the referrer heuristic
    ClassifyingProvenance,
    /// Awaiting the backend session check
    VerifyingSession,
    /// Session confirmed and role matches
    Allowed,
    /// Refused
    Denied(Denial),
}

impl GuardState {
    /// Returns true for `Allowed` and `Denied`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuardState::Allowed | GuardState::Denied(_))
    }

    /// Whether `next` is a legal successor of `self`.
    pub(crate) fn can_advance_to(&self, next: &GuardState) -> bool {
        use GuardState::*;
        matches!(
            (self, next),
            (Init, CheckingCredential)
                | (CheckingCredential, ClassifyingProvenance)
                | (CheckingCredential, Denied(_))
                | (ClassifyingProvenance, VerifyingSession)
                | (ClassifyingProvenance, Denied(_))
                | (VerifyingSession, Allowed)
                | (VerifyingSession, Denied(_))
        )
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            GuardState::Init => "init",
            GuardState::CheckingCredential => "checking_credential",
            GuardState::ClassifyingProvenance => "classifying_provenance",
            GuardState::VerifyingSession => "verifying_session",
            GuardState::Allowed => "allowed",
            GuardState::Denied(_) => "denied",
        }
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DenyKind;
    use crate::verdict::Redirect;

    fn denied() -> GuardState {
        GuardState::Denied(Denial::new(
            DenyKind::MissingCredential,
            Redirect::new("/login", "/admin", "Authentication required"),
        ))
    }

    #[test]
    fn only_allowed_and_denied_are_terminal() {
        assert!(!GuardState::Init.is_terminal());
        assert!(!GuardState::CheckingCredential.is_terminal());
        assert!(!GuardState::ClassifyingProvenance.is_terminal());
        assert!(!GuardState::VerifyingSession.is_terminal());
        assert!(GuardState::Allowed.is_terminal());
        assert!(denied().is_terminal());
    }

    #[test]
    fn sequence_cannot_skip_steps() {
        assert!(GuardState::Init.can_advance_to(&GuardState::CheckingCredential));
        assert!(!GuardState::Init.can_advance_to(&GuardState::VerifyingSession));
        assert!(!GuardState::CheckingCredential.can_advance_to(&GuardState::VerifyingSession));
        assert!(!GuardState::ClassifyingProvenance.can_advance_to(&GuardState::Allowed));
        assert!(GuardState::VerifyingSession.can_advance_to(&GuardState::Allowed));
    }

    #[test]
    fn terminal_states_do_not_restart() {
        assert!(!denied().can_advance_to(&GuardState::CheckingCredential));
        assert!(!GuardState::Allowed.can_advance_to(&GuardState::Init));
        assert!(!GuardState::Allowed.can_advance_to(&denied()));
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(GuardState::VerifyingSession.to_string(), "verifying_session");
        assert_eq!(denied().to_string(), "denied");
    }
}
