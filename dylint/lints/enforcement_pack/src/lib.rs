//! Enforcement pack: custom lints for route-guard invariants.
//!
//! This lint library enforces architectural invariants at compile time,
//! keeping every diagnostic on the structured, token-redacting log path.
//!
//! ## Implemented Lints
//!
//! - `NO_PRINTLN`: Forbids println!, eprintln!, and dbg! macros to enforce
//!   structured logging via `tracing` / `AttemptLog` and keep session tokens out of stdout.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Expr, ExprKind, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass};
use rustc_session::{declare_lint_pass, declare_tool_lint};

declare_tool_lint! {
    /// **What it does:** Forbids use of `println!`, `eprintln!`, and `dbg!` macros in library code.
    ///
    /// **Why is this bad?** In a guard running inside a browser these macros
    /// write to the console with no attempt id, no path and no level:
    /// - They bypass `AttemptLog`, so a denial cannot be traced to its attempt
    /// - `dbg!` on a credential prints whatever its `Debug` shows, and nothing
    ///   stops it being called on the raw token string
    /// - Their output never reaches the tracing subscriber or its filters
    ///
    /// **Known problems:** None.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad - bypasses AttemptLog
    /// println!("denied {}", path);
    /// eprintln!("session check failed: {}", err);
    /// dbg!(token.expose_secret());
    ///
    /// // Good - structured, tagged with the attempt
    /// log.denied(&DenyKind::TransportFailure, format_args!("session check failed: {}", err));
    /// ```
    pub enforcement_pack::NO_PRINTLN,
    Deny,
    "use of println!, eprintln!, or dbg! macros; use tracing or AttemptLog instead"
}

declare_lint_pass!(NoPrintln => [NO_PRINTLN]);

impl EarlyLintPass for NoPrintln {
    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::MacCall(mac) = &expr.kind {
            check_macro(cx, mac, expr.span);
        }
    }
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: rustc_span::Span) {
    let path = &mac.path;

    // Check if this is a single-segment macro call (println, eprintln, dbg)
    if path.segments.len() != 1 {
        return;
    }

    let macro_name = path.segments[0].ident.name.as_str();

    match macro_name {
        "println" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::info!` or `AttemptLog` for structured logging");
                diag.note("`println!` bypasses the tracing subscriber and may leak session tokens");
            });
        }
        "eprintln" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::error!` or `AttemptLog` for structured logging");
                diag.note("`eprintln!` bypasses the tracing subscriber and may leak session tokens");
            });
        }
        "dbg" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::debug!` or `AttemptLog` for structured logging");
                diag.note("`dbg!` bypasses the tracing subscriber and may leak session tokens");
            });
        }
        _ => {}
    }
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PRINTLN]);
    lint_store.register_early_pass(|| Box::new(NoPrintln));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
