use serde::Serialize;

use crate::error::Denial;

/// Where a denied navigation is sent, and what it carries along.
///
/// The login surface reads `from` to return the user after
/// re-authentication and shows `message` as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Navigation target (login entry point or a role landing page)
    pub target: String,
    /// The originally requested path
    pub from: String,
    /// Human-readable reason
    pub message: String,
}

impl Redirect {
    /// Creates a redirect.
    pub fn new(
        target: impl Into<String>,
        from: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            from: from.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one guard evaluation for one navigation attempt.
///
/// Consumed immediately by the rendering layer; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Render the protected page
    Allow,
    /// Redirect instead
    Deny(Denial),
}

impl Verdict {
    /// Returns true for `Allow`.
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// Returns the denial, if any.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Verdict::Allow => None,
            Verdict::Deny(denial) => Some(denial),
        }
    }
}

/// What [`AccessGuard::evaluate`](crate::AccessGuard::evaluate) resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The path is not in the route table; no checks were run
    Public,
    /// The attempt reached a verdict
    Decided(Verdict),
    /// A newer navigation started while this one awaited the backend; its
    /// result was discarded
    Superseded,
}

impl Outcome {
    /// The verdict, if this attempt reached one.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Outcome::Decided(verdict) => Some(verdict),
            _ => None,
        }
    }
}

/// What the rendering layer should show for the current navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    /// A check is still running: show the loading indicator
    Loading,
    /// Render the page
    Render,
    /// Navigate away
    Redirect(Redirect),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DenyKind;

    #[test]
    fn verdict_helpers() {
        assert!(Verdict::Allow.is_allow());
        assert!(Verdict::Allow.denial().is_none());

        let denial = Denial::new(
            DenyKind::SessionInvalid,
            Redirect::new("/login", "/admin", "Session expired"),
        );
        let verdict = Verdict::Deny(denial.clone());
        assert!(!verdict.is_allow());
        assert_eq!(verdict.denial(), Some(&denial));
    }

    #[test]
    fn outcome_verdict() {
        assert_eq!(
            Outcome::Decided(Verdict::Allow).verdict(),
            Some(&Verdict::Allow)
        );
        assert!(Outcome::Public.verdict().is_none());
        assert!(Outcome::Superseded.verdict().is_none());
    }

    #[test]
    fn redirect_serializes_for_router_state() {
        let json = serde_json::to_value(Redirect::new(
            "/login",
            "/company/jobs",
            "Authentication required",
        ))
        .unwrap();
        assert_eq!(json["from"], "/company/jobs");
        assert_eq!(json["message"], "Authentication required");
    }
}
