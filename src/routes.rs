//! Declarative mapping from protected paths to the role that owns them.
//!
//! One generic guard consults this table on every navigation instead of each
//! page wrapping itself in a role-specific guard.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::navigation::strip_query;
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    /// `/admin/users`
    Exact(String),
    /// `/admin/*`, stored without the trailing `/*`
    Prefix(String),
}

impl Pattern {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        if !raw.starts_with('/') {
            return Err(ConfigError::RelativePath(raw.to_string()));
        }
        match raw.strip_suffix("/*") {
            Some(base) => Ok(Pattern::Prefix(base.to_string())),
            None => Ok(Pattern::Exact(trim_trailing_slash(raw).to_string())),
        }
    }

    /// Length of the match, or `None` if the path does not match.
    fn matches(&self, path: &str) -> Option<usize> {
        match self {
            Pattern::Exact(p) => (p == path).then(|| p.len()),
            Pattern::Prefix(base) => {
                let rest = path.strip_prefix(base.as_str())?;
                (rest.is_empty() || rest.starts_with('/') || base.is_empty())
                    .then(|| base.len())
            }
        }
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[derive(Debug, Clone)]
struct Route {
    raw: String,
    pattern: Pattern,
    role: Role,
}

/// Table of protected routes.
///
/// A pattern is either an exact path (`/admin/users`) or a subtree ending in
/// `/*` (`/customer/*`, which also covers `/customer` itself). An exact match
/// beats any prefix, and among prefixes the longest wins. Paths that match
/// nothing are public.
///
/// # Examples
///
/// ```
/// use route_guard::{Role, RouteTable};
///
/// let routes = RouteTable::new()
///     .protect("/customer/*", Role::Customer)?
///     .protect("/admin/*", Role::Admin)?;
///
/// assert_eq!(routes.required_role("/customer/orders?page=2"), Some(Role::Customer));
/// assert_eq!(routes.required_role("/about"), None);
/// # Ok::<(), route_guard::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table: every path is public.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `pattern` as owned by `role`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RelativePath` for a pattern not starting with
    /// `/`, and `ConfigError::DuplicateRoute` if the pattern is already
    /// declared.
    pub fn protect(mut self, pattern: &str, role: Role) -> Result<Self, ConfigError> {
        let parsed = Pattern::parse(pattern)?;
        if self.routes.iter().any(|r| r.pattern == parsed) {
            return Err(ConfigError::DuplicateRoute(pattern.to_string()));
        }
        self.routes.push(Route {
            raw: pattern.to_string(),
            pattern: parsed,
            role,
        });
        Ok(self)
    }

    /// Builds a table from configured `pattern -> role name` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRole` for an empty role name and
    /// `ConfigError::UnknownRole` for a name outside the three roles, in
    /// addition to the errors of [`protect`](Self::protect).
    pub fn from_config(routes: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        routes.iter().try_fold(Self::new(), |table, (pattern, role)| {
            if role.trim().is_empty() {
                return Err(ConfigError::MissingRole(pattern.clone()));
            }
            table.protect(pattern, role.parse()?)
        })
    }

    /// Role required by `path`, or `None` if the path is public.
    ///
    /// Query string and fragment are ignored.
    pub fn required_role(&self, path: &str) -> Option<Role> {
        let path = trim_trailing_slash(strip_query(path));

        if let Some(route) = self
            .routes
            .iter()
            .find(|r| matches!(&r.pattern, Pattern::Exact(p) if p == path))
        {
            return Some(route.role);
        }

        self.routes
            .iter()
            .filter(|r| matches!(r.pattern, Pattern::Prefix(_)))
            .filter_map(|r| r.pattern.matches(path).map(|len| (len, r.role)))
            .max_by_key(|(len, _)| *len)
            .map(|(_, role)| role)
    }

    /// Declared patterns with their roles, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Role)> {
        self.routes.iter().map(|r| (r.raw.as_str(), r.role))
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true when no route is declared.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
