use std::fmt;

/// Everything the guard knows about one navigation attempt.
///
/// Built fresh for each attempt by the router integration and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// Path being navigated to, possibly with query or fragment
    pub requested_path: String,
    /// `document.referrer`; empty on first visit or direct browser open
    pub referrer: String,
    /// Origin of the running app, e.g. `https://app.example.com`
    pub current_origin: String,
}

impl NavigationContext {
    /// Creates a context with an empty referrer.
    pub fn new(requested_path: impl Into<String>, current_origin: impl Into<String>) -> Self {
        Self {
            requested_path: requested_path.into(),
            referrer: String::new(),
            current_origin: current_origin.into(),
        }
    }

    /// Sets the referrer.
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    /// The requested path without query string or fragment.
    pub fn path(&self) -> &str {
        strip_query(&self.requested_path)
    }
}

/// Identifier of one navigation attempt.
///
/// Every (re-)navigation gets a fresh, strictly increasing id; a verification
/// result is applied only while its id is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav-{}", self.0)
    }
}

pub(crate) fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_strips_query_and_fragment() {
        let ctx = NavigationContext::new("/customer/orders?page=2#top", "https://app.test");
        assert_eq!(ctx.path(), "/customer/orders");

        let ctx = NavigationContext::new("/admin#users", "https://app.test");
        assert_eq!(ctx.path(), "/admin");
    }

    #[test]
    fn builder_sets_referrer() {
        let ctx = NavigationContext::new("/admin", "https://app.test")
            .with_referrer("https://app.test/login");
        assert_eq!(ctx.referrer, "https://app.test/login");
    }

    #[test]
    fn attempt_id_display() {
        assert_eq!(AttemptId::new(7).to_string(), "nav-7");
        assert!(AttemptId::new(1) < AttemptId::new(2));
    }
}
