use std::fmt;

use crate::error::DenyKind;

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Page rendered
    Allowed,
    /// Redirected away
    Denied,
    /// Result discarded because a newer navigation started
    Superseded,
}

impl fmt::Display for GuardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardOutcome::Allowed => write!(f, "allowed"),
            GuardOutcome::Denied => write!(f, "denied"),
            GuardOutcome::Superseded => write!(f, "superseded"),
        }
    }
}

/// One recorded guard decision.
///
/// # Example
///
/// ```
/// use route_guard::audit::{GuardEvent, GuardOutcome};
/// use route_guard::DenyKind;
///
/// let event = GuardEvent::denied(
///     3,
///     "/admin/users",
///     Some("u-9"),
///     &DenyKind::SessionInvalid,
/// );
/// assert_eq!(event.outcome(), GuardOutcome::Denied);
/// assert_eq!(event.deny_kind(), Some("session_invalid"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardEvent {
    attempt: u64,
    path: String,
    user_id: Option<String>,
    outcome: GuardOutcome,
    deny_kind: Option<&'static str>,
}

impl GuardEvent {
    /// An allowed attempt.
    pub fn allowed(attempt: u64, path: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            attempt,
            path: path.into(),
            user_id: Some(user_id.into()),
            outcome: GuardOutcome::Allowed,
            deny_kind: None,
        }
    }

    /// A denied attempt; `user_id` is `None` when no credential was found.
    pub fn denied(
        attempt: u64,
        path: impl Into<String>,
        user_id: Option<impl Into<String>>,
        kind: &DenyKind,
    ) -> Self {
        Self {
            attempt,
            path: path.into(),
            user_id: user_id.map(Into::into),
            outcome: GuardOutcome::Denied,
            deny_kind: Some(kind.label()),
        }
    }

    /// An attempt whose verification result was discarded.
    pub fn superseded(attempt: u64, path: impl Into<String>) -> Self {
        Self {
            attempt,
            path: path.into(),
            user_id: None,
            outcome: GuardOutcome::Superseded,
            deny_kind: None,
        }
    }

    /// Attempt counter value.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Requested path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Id of the signed-in user, if known.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// How the attempt ended.
    pub fn outcome(&self) -> GuardOutcome {
        self.outcome
    }

    /// Deny kind label for denied attempts.
    pub fn deny_kind(&self) -> Option<&'static str> {
        self.deny_kind
    }
}

impl fmt::Display for GuardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[nav-{}] {} {}", self.attempt, self.path, self.outcome)?;
        if let Some(kind) = self.deny_kind {
            write!(f, " ({})", kind)?;
        }
        if let Some(user) = &self.user_id {
            write!(f, " user={}", user)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_event_has_no_deny_kind() {
        let event = GuardEvent::allowed(1, "/customer/orders", "u-1");
        assert_eq!(event.outcome(), GuardOutcome::Allowed);
        assert_eq!(event.deny_kind(), None);
        assert_eq!(event.user_id(), Some("u-1"));
    }

    #[test]
    fn denied_without_credential_has_no_user() {
        let event = GuardEvent::denied(2, "/admin", None::<String>, &DenyKind::MissingCredential);
        assert_eq!(event.user_id(), None);
        assert_eq!(event.deny_kind(), Some("missing_credential"));
    }

    #[test]
    fn display_is_compact() {
        let event = GuardEvent::denied(4, "/admin", Some("u-2"), &DenyKind::TransportFailure);
        assert_eq!(
            event.to_string(),
            "[nav-4] /admin denied (transport_failure) user=u-2"
        );
        assert_eq!(
            GuardEvent::superseded(5, "/company").to_string(),
            "[nav-5] /company superseded"
        );
    }
}
