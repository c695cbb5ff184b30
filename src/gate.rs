use crate::config::Landing;
use crate::error::{Denial, DenyKind};
use crate::role::Role;
use crate::verdict::{Redirect, Verdict};

/// Role check applied after the session has been confirmed.
///
/// The role is already known locally, so a mismatch is decided without a
/// network call. The user is sent to their own role's landing page, or to
/// login if that landing page is the very page they were refused.
///
/// # Examples
///
/// ```
/// use route_guard::{Landing, Role, RoleGate};
///
/// let gate = RoleGate::new(Landing::default(), "/login");
///
/// assert!(gate.check(Role::Admin, Role::Admin, "/admin/users").is_allow());
///
/// let verdict = gate.check(Role::Customer, Role::Admin, "/admin/users");
/// let denial = verdict.denial().unwrap();
/// assert_eq!(denial.redirect.target, "/customer/dashboard");
/// ```
#[derive(Debug, Clone)]
pub struct RoleGate {
    landing: Landing,
    login_path: String,
}

impl RoleGate {
    /// Creates a gate with the given landing pages and login entry point.
    pub fn new(landing: Landing, login_path: impl Into<String>) -> Self {
        Self {
            landing,
            login_path: login_path.into(),
        }
    }

    /// Decides whether `actual` may open a page owned by `required`.
    ///
    /// Total over the three roles: `Allow` exactly when they are equal.
    pub fn check(&self, actual: Role, required: Role, requested_path: &str) -> Verdict {
        if actual == required {
            return Verdict::Allow;
        }

        let landing = self.landing.for_role(actual);
        let target = if landing == crate::navigation::strip_query(requested_path) {
            self.login_path.as_str()
        } else {
            landing
        };

        Verdict::Deny(Denial::new(
            DenyKind::RoleMismatch { required, actual },
            Redirect::new(
                target,
                requested_path,
                format!("This page is only available to {} accounts.", required),
            ),
        ))
    }

    /// Landing pages in use.
    pub fn landing(&self) -> &Landing {
        &self.landing
    }
}
