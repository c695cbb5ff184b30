use std::fmt;

/// The opaque session token issued by the backend at login or signup.
///
/// The token is a bearer credential: anyone holding it can impersonate the
/// user until the backend revokes it. `SessionToken` keeps it out of logs and
/// `Debug` output. The raw value is only reachable through
/// [`expose_secret`](Self::expose_secret), which the verifier calls when it
/// builds the `Authorization` header.
///
/// # Examples
///
/// ```
/// use route_guard::SessionToken;
///
/// let token = SessionToken::new("eyJhbGciOi.payload.sig");
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "eyJhbGciOi.payload.sig");
/// ```
// Do NOT derive Clone, Copy, Default or Serialize: each one is a way to
// duplicate or emit the token without going through expose_secret().
pub struct SessionToken {
    inner: String,
}

impl SessionToken {
    /// Wraps a raw token.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Returns the raw token.
    ///
    /// Only transport code should call this; never format the result.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// True when the stored token is empty or whitespace.
    ///
    /// An empty token is treated the same as no token at all.
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_redacts_debug() {
        let token = SessionToken::new("hunter2-token");
        let out = format!("{:?}", token);

        assert_eq!(out, "[REDACTED]");
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("String"));
    }

    #[test]
    fn token_redacts_display() {
        let token = SessionToken::new("sk-1234567890");
        assert_eq!(token.to_string(), "[REDACTED]");
    }

    #[test]
    fn token_exposes_when_explicit() {
        let token = SessionToken::new("abc");
        assert_eq!(token.expose_secret(), "abc");
    }

    #[test]
    fn blank_tokens() {
        assert!(SessionToken::new("").is_blank());
        assert!(SessionToken::new("  ").is_blank());
        assert!(!SessionToken::new("t").is_blank());
    }
}
