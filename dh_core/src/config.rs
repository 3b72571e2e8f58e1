//! Default parameters and search limits.

use crate::error::{DhError, Result};

/// Miller-Rabin rounds used when the caller does not choose any.
/// A composite survives all rounds with probability at most 4^-40.
pub const DEFAULT_ROUNDS: usize = 40;

/// Bit length of primes printed by the `miller_rabin` tool.
pub const DEFAULT_PRIME_BITS: u64 = 512;

/// Bit length of `q` when searching Diffie-Hellman domain parameters.
pub const DEFAULT_DH_BITS: u64 = 1024;

/// Smallest bit length that leaves room for both forced bits of a candidate.
pub const MIN_CANDIDATE_BITS: u64 = 2;

/// Controls how hard a prime or generator search tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Witness rounds per candidate.
    pub rounds: usize,
    /// Optional cap on rejected candidates. `None` retries until success.
    pub max_attempts: Option<u64>,
}

impl SearchConfig {
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Rejects a zero attempt budget, which could never test a candidate.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            Err(DhError::InvalidInput(
                "max_attempts must be at least 1".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// True once `attempts` rejected draws have used up the budget.
    pub(crate) fn exhausted(&self, attempts: u64) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config = SearchConfig::default();
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.max_attempts, None);
        assert!(!config.exhausted(u64::MAX));
    }

    #[test]
    fn test_bounded_config() {
        let config = SearchConfig::new(10).with_max_attempts(3);
        assert_eq!(config.rounds, 10);
        assert!(!config.exhausted(2));
        assert!(config.exhausted(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_budget_is_invalid() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(matches!(
            SearchConfig::new(1).with_max_attempts(0).validate(),
            Err(DhError::InvalidInput(_))
        ));
    }
}
