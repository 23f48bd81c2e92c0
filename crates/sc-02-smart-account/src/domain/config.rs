//! Account configuration.

use crate::errors::CastError;
use std::env;

/// Default upper bound on spells per batch.
pub const DEFAULT_MAX_SPELLS_PER_CAST: usize = 32;

/// Per-account execution limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountConfig {
    /// Largest batch accepted by `cast`.
    pub max_spells_per_cast: usize,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            max_spells_per_cast: DEFAULT_MAX_SPELLS_PER_CAST,
        }
    }
}

impl AccountConfig {
    /// Reads `SC_MAX_SPELLS_PER_CAST`, keeping the default when the variable
    /// is missing, unparsable or zero.
    pub fn from_env() -> Self {
        let max_spells_per_cast = env::var("SC_MAX_SPELLS_PER_CAST")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_MAX_SPELLS_PER_CAST);

        Self {
            max_spells_per_cast,
        }
    }

    /// Rejects empty and oversized batches.
    pub fn check_batch(&self, count: usize) -> Result<(), CastError> {
        if count == 0 {
            return Err(CastError::EmptyBatch);
        }
        if count > self.max_spells_per_cast {
            return Err(CastError::TooManySpells {
                count,
                max: self.max_spells_per_cast,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(AccountConfig::default().max_spells_per_cast, 32);
    }

    #[test]
    fn test_check_batch() {
        let config = AccountConfig {
            max_spells_per_cast: 2,
        };
        assert_eq!(config.check_batch(0), Err(CastError::EmptyBatch));
        assert!(config.check_batch(1).is_ok());
        assert!(config.check_batch(2).is_ok());
        assert_eq!(
            config.check_batch(3),
            Err(CastError::TooManySpells { count: 3, max: 2 })
        );
    }
}
