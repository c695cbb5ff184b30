use std::fmt;

use crate::role::Role;
use crate::verdict::Redirect;

/// Why an admission check refused a navigation.
///
/// Every kind resolves into a redirect to the login entry point (or a role
/// landing page); none of them is a fault the rendering layer has to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyKind {
    /// No token or user descriptor is held locally
    MissingCredential,
    /// The referrer heuristic flagged the navigation; local state was purged
    SuspiciousProvenance,
    /// The backend explicitly rejected the token
    SessionInvalid,
    /// The verification call itself failed (timeout, connectivity, bad body)
    TransportFailure,
    /// The session is live but the user's role does not own the page
    RoleMismatch {
        /// The role the page declares
        required: Role,
        /// The role held by the signed-in user
        actual: Role,
    },
}

impl DenyKind {
    /// Stable label used in structured log fields and audit events.
    pub fn label(&self) -> &'static str {
        match self {
            DenyKind::MissingCredential => "missing_credential",
            DenyKind::SuspiciousProvenance => "suspicious_provenance",
            DenyKind::SessionInvalid => "session_invalid",
            DenyKind::TransportFailure => "transport_failure",
            DenyKind::RoleMismatch { .. } => "role_mismatch",
        }
    }
}

impl fmt::Display for DenyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyKind::MissingCredential => write!(f, "Missing credential"),
            DenyKind::SuspiciousProvenance => write!(f, "Suspicious provenance"),
            DenyKind::SessionInvalid => write!(f, "Session invalid"),
            DenyKind::TransportFailure => write!(f, "Transport failure"),
            DenyKind::RoleMismatch { required, actual } => {
                write!(f, "Role '{}' cannot open a '{}' page", actual, required)
            }
        }
    }
}

/// A refused navigation together with where the user is sent instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// The kind of denial
    pub kind: DenyKind,
    /// Redirect carrying the originally requested path and a readable reason
    pub redirect: Redirect,
}

impl Denial {
    /// Creates a new denial.
    pub fn new(kind: DenyKind, redirect: Redirect) -> Self {
        Self { kind, redirect }
    }

    /// Human-readable reason shown on the login surface.
    pub fn message(&self) -> &str {
        &self.redirect.message
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.redirect.message)
    }
}

impl std::error::Error for Denial {}

/// Errors raised while loading guard configuration or declaring routes.
///
/// These are programming/deployment mistakes, surfaced once at startup rather
/// than during a navigation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A role name outside `customer`, `company`, `admin`
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    /// A protected route declared without a role
    #[error("route '{0}' has no required role")]
    MissingRole(String),
    /// The same route pattern declared twice
    #[error("route '{0}' is declared more than once")]
    DuplicateRoute(String),
    /// Route patterns and page paths must be absolute
    #[error("path '{0}' must start with '/'")]
    RelativePath(String),
    /// The configuration document could not be parsed
    #[error("invalid guard config: {0}")]
    Parse(#[from] serde_json::Error),
}
