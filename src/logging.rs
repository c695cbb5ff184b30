//! Structured logging for guard evaluations.
//!
//! Every event emitted while evaluating a navigation carries the attempt id
//! and the requested path, so a single attempt can be followed end to end.
//! Tokens never appear in log fields: they are [`SessionToken`]s, which
//! format as `[REDACTED]`.
//!
//! [`SessionToken`]: crate::SessionToken

use std::fmt;

use crate::error::DenyKind;
use crate::navigation::AttemptId;

/// Logger bound to one navigation attempt.
///
/// Borrowed from the attempt's path so it cannot outlive the evaluation.
#[derive(Debug, Clone, Copy)]
pub struct AttemptLog<'a> {
    attempt: AttemptId,
    path: &'a str,
}

impl<'a> AttemptLog<'a> {
    pub(crate) fn new(attempt: AttemptId, path: &'a str) -> Self {
        Self { attempt, path }
    }

    /// Attempt this logger reports for.
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(attempt_id = %self.attempt, path = %self.path, "{}", args);
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(attempt_id = %self.attempt, path = %self.path, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(attempt_id = %self.attempt, path = %self.path, "{}", args);
    }

    /// Logs an error-level message.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(attempt_id = %self.attempt, path = %self.path, "{}", args);
    }

    /// Logs a denial with a `deny_kind` field.
    ///
    /// Transport failures go out at error level so they stand apart from
    /// ordinary sign-outs; everything else is a warning.
    pub fn denied(&self, kind: &DenyKind, args: fmt::Arguments<'_>) {
        match kind {
            DenyKind::TransportFailure => tracing::error!(
                attempt_id = %self.attempt,
                path = %self.path,
                deny_kind = kind.label(),
                "{}",
                args
            ),
            _ => tracing::warn!(
                attempt_id = %self.attempt,
                path = %self.path,
                deny_kind = kind.label(),
                "{}",
                args
            ),
        }
    }
}

/// Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`
/// (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "subscriber")]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_reports_its_attempt() {
        let log = AttemptLog::new(AttemptId::new(3), "/admin");
        assert_eq!(log.attempt(), AttemptId::new(3));
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        let log = AttemptLog::new(AttemptId::new(1), "/company/jobs");
        log.debug(format_args!("state -> {}", "checking_credential"));
        log.info(format_args!("allowed"));
        log.denied(&DenyKind::TransportFailure, format_args!("backend unreachable"));
        log.denied(&DenyKind::MissingCredential, format_args!("no credential"));
    }

    #[test]
    fn logging_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let log = AttemptLog::new(AttemptId::new(9), "/customer/orders");
            log.warn(format_args!("stale verification discarded"));
            log.error(format_args!("boom"));
        });
    }
}
