//! Pluggable token verification.

/// A pluggable token-verification policy.
///
/// Implementations are stateless per call. The gate consults [`is_active`]
/// before [`verify`], so an inactive strategy is never asked to verify by the
/// gate itself; it should still answer `false` if called directly.
///
/// [`is_active`]: VerificationStrategy::is_active
/// [`verify`]: VerificationStrategy::verify
pub trait VerificationStrategy: Send + Sync {
    /// Whether token checking is currently enabled at all.
    fn is_active(&self) -> bool;

    /// Whether `candidate` is a valid token.
    fn verify(&self, candidate: &str) -> bool;
}

/// Reference strategy: equality against a single shared secret.
#[derive(Debug, Clone)]
pub struct SharedSecretStrategy {
    secret: Option<String>,
}

impl SharedSecretStrategy {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    /// A strategy with no configured secret: reports inactive and verifies
    /// nothing.
    pub fn disabled() -> Self {
        Self { secret: None }
    }
}

impl VerificationStrategy for SharedSecretStrategy {
    fn is_active(&self) -> bool {
        self.secret.is_some()
    }

    fn verify(&self, candidate: &str) -> bool {
        match &self.secret {
            Some(secret) => constant_time_eq(secret.as_bytes(), candidate.as_bytes()),
            None => false,
        }
    }
}

/// Constant-time byte comparison; timing depends only on the input lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_strategy_is_active() {
        let strategy = SharedSecretStrategy::new("abc123");
        assert!(strategy.is_active());
    }

    #[test]
    fn disabled_strategy_is_inactive_and_verifies_nothing() {
        let strategy = SharedSecretStrategy::disabled();
        assert!(!strategy.is_active());
        assert!(!strategy.verify("abc123"));
        assert!(!strategy.verify(""));
    }

    #[test]
    fn verify_matches_only_the_configured_secret() {
        let strategy = SharedSecretStrategy::new("abc123");
        assert!(strategy.verify("abc123"));
        assert!(!strategy.verify("wrong"));
        assert!(!strategy.verify("abc1234"));
        assert!(!strategy.verify(""));
    }

    #[test]
    fn constant_time_eq_handles_edges() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hello2"));
        assert!(!constant_time_eq(b"", b"a"));
        assert!(constant_time_eq(b"", b""));
    }
}
