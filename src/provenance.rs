//! Referrer-based provenance heuristic.
//!
//! This check catches accidental deep links from external sites into
//! role-gated views before the backend round trip. It is NOT a security
//! boundary: a stripped or forged referrer looks exactly like a first visit.
//! The guard always follows it with the backend session check, and only that
//! check can produce an `Allow`.

use crate::navigation::NavigationContext;

/// Auth-page paths whose referrers are always considered internal.
///
/// Every `origin + page` prefix also starts with the origin, so the origin
/// check already admits these referrers. The list stays explicit so the
/// accepted set reads in one place.
pub const DEFAULT_AUTH_PAGES: [&str; 3] = ["/login", "/signup", "/company-signup"];

/// Result of classifying one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provenance {
    /// Whether the navigation looks like it came from inside the app
    pub trusted: bool,
}

/// Classifies navigations as internal or suspicious external.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvenanceClassifier;

impl ProvenanceClassifier {
    /// Creates a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Referrer prefixes accepted for the given origin.
    ///
    /// `origin + page` for every auth page, then `origin + "/"`, the empty
    /// referrer and the bare origin.
    pub fn allowed_prefixes(&self, origin: &str) -> Vec<String> {
        let mut prefixes: Vec<String> = DEFAULT_AUTH_PAGES
            .iter()
            .map(|page| format!("{}{}", origin, page))
            .collect();
        prefixes.push(format!("{}/", origin));
        prefixes.push(String::new());
        prefixes.push(origin.to_string());
        prefixes
    }

    /// Classifies a navigation.
    ///
    /// Trusted when the referrer is empty or starts with the current origin,
    /// which covers every entry of [`allowed_prefixes`](Self::allowed_prefixes).
    /// Everything else is suspicious.
    pub fn classify(&self, ctx: &NavigationContext) -> Provenance {
        let referrer = ctx.referrer.as_str();
        let origin = ctx.current_origin.as_str();

        let trusted = if referrer.is_empty() {
            true
        } else if origin.is_empty() {
            // without a known origin every prefix degenerates to ""
            false
        } else {
            referrer.starts_with(origin)
        };
        Provenance { trusted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://pickup.example";

    fn classify(referrer: &str) -> bool {
        let ctx = NavigationContext::new("/customer/dashboard", ORIGIN).with_referrer(referrer);
        ProvenanceClassifier::default().classify(&ctx).trusted
    }

    #[test]
    fn empty_referrer_is_trusted() {
        assert!(classify(""));
    }

    #[test]
    fn same_origin_referrers_are_trusted() {
        assert!(classify(ORIGIN));
        assert!(classify("https://pickup.example/"));
        assert!(classify("https://pickup.example/login"));
        assert!(classify("https://pickup.example/signup?step=2"));
        assert!(classify("https://pickup.example/company-signup"));
        assert!(classify("https://pickup.example/customer/orders"));
    }

    #[test]
    fn external_referrers_are_suspicious() {
        assert!(!classify("https://evil.example/login"));
        assert!(!classify("http://pickup.example/login"));
        assert!(!classify("https://google.com/search?q=pickup"));
        assert!(!classify("/login"));
    }

    #[test]
    fn unknown_origin_only_trusts_empty_referrer() {
        let classifier = ProvenanceClassifier::default();
        let ctx = NavigationContext::new("/admin", "").with_referrer("https://anything");
        assert!(!classifier.classify(&ctx).trusted);

        let ctx = NavigationContext::new("/admin", "");
        assert!(classifier.classify(&ctx).trusted);
    }

    #[test]
    fn allowed_prefixes_cover_auth_pages() {
        let prefixes = ProvenanceClassifier::default().allowed_prefixes(ORIGIN);
        assert_eq!(
            prefixes,
            vec![
                "https://pickup.example/login".to_string(),
                "https://pickup.example/signup".to_string(),
                "https://pickup.example/company-signup".to_string(),
                "https://pickup.example/".to_string(),
                String::new(),
                ORIGIN.to_string(),
            ]
        );
    }

    #[test]
    fn auth_page_on_another_host_is_suspicious() {
        assert!(!classify("https://idp.example/login"));
        assert!(!classify("https://idp.example/company-signup"));
    }

    #[test]
    fn every_allowed_prefix_is_trusted() {
        let classifier = ProvenanceClassifier::new();
        for prefix in classifier.allowed_prefixes(ORIGIN) {
            let ctx = NavigationContext::new("/admin", ORIGIN).with_referrer(prefix.clone());
            assert!(classifier.classify(&ctx).trusted, "{prefix}");
        }
    }
}
