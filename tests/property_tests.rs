//! Property tests for the provenance heuristic, the role gate and the guard.

use futures::executor::block_on;
use proptest::prelude::*;
use route_guard::testing::{MemoryCredentialStore, StaticVerifier};
use route_guard::{
    AccessGuard, DenyKind, Landing, NavigationContext, ProvenanceClassifier, Role, RoleGate,
    RouteTable, SessionCheck, TransportError, User, Verdict,
};

const ORIGIN: &str = "https://pickup.example";

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Customer), Just(Role::Company), Just(Role::Admin)]
}

fn arb_response() -> impl Strategy<Value = Result<SessionCheck, TransportError>> {
    prop_oneof![
        Just(Ok(SessionCheck::valid())),
        "[A-Za-z ]{0,20}".prop_map(|m| Ok(SessionCheck::rejected(m))),
        Just(Err(TransportError::Status(500))),
        Just(Err(TransportError::Network("reset".to_string()))),
    ]
}

fn routes() -> RouteTable {
    RouteTable::new()
        .protect("/customer/*", Role::Customer)
        .unwrap()
        .protect("/company/*", Role::Company)
        .unwrap()
        .protect("/admin/*", Role::Admin)
        .unwrap()
}

fn page_for(role: Role) -> &'static str {
    match role {
        Role::Customer => "/customer/orders",
        Role::Company => "/company/jobs",
        Role::Admin => "/admin/users",
    }
}

proptest! {
    /// Property: referrers inside the origin (or empty) are trusted
    #[test]
    fn same_origin_referrers_are_trusted(suffix in "(/[a-z0-9-]{0,12}){0,3}(\\?[a-z=&]{0,10})?") {
        let classifier = ProvenanceClassifier::default();
        let ctx = NavigationContext::new("/customer", ORIGIN)
            .with_referrer(format!("{}{}", ORIGIN, suffix));
        prop_assert!(classifier.classify(&ctx).trusted);
    }

    /// Property: any other non-empty referrer is suspicious
    #[test]
    fn foreign_referrers_are_suspicious(referrer in "[ -~]{1,40}") {
        prop_assume!(!referrer.starts_with(ORIGIN));
        let classifier = ProvenanceClassifier::default();
        let ctx = NavigationContext::new("/customer", ORIGIN).with_referrer(referrer);
        prop_assert!(!classifier.classify(&ctx).trusted);
    }

    /// Property: the role gate allows exactly matching roles and never
    /// redirects back to the refused page
    #[test]
    fn role_gate_is_total(actual in arb_role(), required in arb_role()) {
        let gate = RoleGate::new(Landing::default(), "/login");
        let path = page_for(required);
        match gate.check(actual, required, path) {
            Verdict::Allow => prop_assert_eq!(actual, required),
            Verdict::Deny(denial) => {
                prop_assert_ne!(actual, required);
                prop_assert_ne!(denial.redirect.target.as_str(), path);
                prop_assert_eq!(denial.redirect.from.as_str(), path);
            }
        }
    }

    /// Property: Allow requires a confirmed session, a trusted referrer and
    /// a matching role; every other combination denies without panicking
    #[test]
    fn allow_only_with_confirmed_session(
        signed_in in any::<bool>(),
        role in arb_role(),
        page_role in arb_role(),
        external in any::<bool>(),
        response in arb_response(),
    ) {
        let store = if signed_in {
            MemoryCredentialStore::signed_in(
                "tok",
                User { id: "u".into(), role, display_name: String::new() },
            )
        } else {
            MemoryCredentialStore::new()
        };
        let confirmed = matches!(response, Ok(SessionCheck { valid: true, .. }));
        let guard = AccessGuard::new(store, StaticVerifier::new(response), routes());

        let referrer = if external { "https://elsewhere.example/" } else { "" };
        let nav = NavigationContext::new(page_for(page_role), ORIGIN).with_referrer(referrer);
        let outcome = block_on(guard.evaluate(&nav));
        let verdict = outcome.verdict().expect("protected pages always get a verdict");

        let expect_allow = signed_in && !external && confirmed && role == page_role;
        prop_assert_eq!(verdict.is_allow(), expect_allow);

        if !signed_in {
            prop_assert_eq!(&verdict.denial().unwrap().kind, &DenyKind::MissingCredential);
            prop_assert_eq!(guard.verifier().calls(), 0);
        }
        if signed_in && external {
            prop_assert_eq!(guard.store().clear_count(), 1);
            prop_assert_eq!(guard.verifier().calls(), 0);
        }
    }
}
