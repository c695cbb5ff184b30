//! Guard configuration.
//!
//! Loaded once at app start, typically from a JSON document bundled with the
//! frontend:
//!
//! ```json
//! {
//!   "loginPath": "/login",
//!   "sessionCheckUrl": "https://api.pickup.example/auth/session",
//!   "routes": {
//!     "/customer/*": "customer",
//!     "/company/*": "company",
//!     "/admin/*": "admin"
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::role::Role;

/// Landing page per role, used when a signed-in user hits another role's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Landing {
    /// Customer home
    pub customer: String,
    /// Company home
    pub company: String,
    /// Admin home
    pub admin: String,
}

impl Default for Landing {
    fn default() -> Self {
        Self {
            customer: "/customer/dashboard".to_string(),
            company: "/company/dashboard".to_string(),
            admin: "/admin/dashboard".to_string(),
        }
    }
}

impl Landing {
    /// Landing path for a role.
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Customer => &self.customer,
            Role::Company => &self.company,
            Role::Admin => &self.admin,
        }
    }
}

/// Everything needed to assemble an [`AccessGuard`](crate::AccessGuard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuardConfig {
    /// Login entry point that denied navigations redirect to
    pub login_path: String,
    /// Backend session-check endpoint
    pub session_check_url: Option<String>,
    /// Role landing pages
    pub landing: Landing,
    /// Protected route patterns mapped to role names
    pub routes: BTreeMap<String, String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            session_check_url: None,
            landing: Landing::default(),
            routes: BTreeMap::new(),
        }
    }
}

impl GuardConfig {
    /// Parses a JSON configuration document.
    ///
    /// Missing fields take their defaults. Paths are checked here; role names
    /// are checked when the route table is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::RelativePath` for a login or landing path that does
    /// not start with `/`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GuardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every configured page path is absolute.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RelativePath` naming the first offending path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = std::iter::once(self.login_path.as_str())
            .chain(Role::ALL.iter().map(|role| self.landing.for_role(*role)));

        for path in paths {
            if !path.starts_with('/') {
                return Err(ConfigError::RelativePath(path.to_string()));
            }
        }
        Ok(())
    }
}
