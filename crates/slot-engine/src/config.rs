//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum strip length the engine accepts
pub const MIN_STRIP_LENGTH: usize = 100;

/// Configuration validation / import errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("strip length {0} is below the minimum of 100")]
    StripTooShort(usize),
    #[error("win chance bounds {base}..{max} are not a valid probability range")]
    InvalidWinChance { base: f64, max: f64 },
    #[error("bet divisor must be positive, got {0}")]
    InvalidBetDivisor(f64),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine configuration
///
/// Defaults reproduce the production tuning: 128-entry strips and an
/// engineered win chance of `min(0.35 + bet/1000, 0.45)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Entries per reel strip
    pub strip_length: usize,
    /// Engineered win chance at zero bet
    pub base_win_chance: f64,
    /// Hard cap on the engineered win chance
    pub max_win_chance: f64,
    /// Bet divisor feeding the win chance ramp (`chance += bet / divisor`)
    pub bet_divisor: f64,
    /// Attempts allowed when suppressing a natural win
    pub loss_retry_budget: u32,
    /// Attempts allowed when promoting a natural loss
    pub win_retry_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strip_length: 128,
            base_win_chance: 0.35,
            max_win_chance: 0.45,
            bet_divisor: 1000.0,
            loss_retry_budget: 20,
            win_retry_budget: 15,
        }
    }
}

impl EngineConfig {
    /// Engineered win chance for a bet, bounded to `[base, max]`.
    ///
    /// This is a target for the bias controller, not a realized probability;
    /// retry budgets and reel content pull the observed rate off it.
    pub fn win_chance(&self, bet: f64) -> f64 {
        (self.base_win_chance + bet / self.bet_divisor)
            .clamp(self.base_win_chance, self.max_win_chance)
    }

    /// Validate invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strip_length < MIN_STRIP_LENGTH {
            return Err(ConfigError::StripTooShort(self.strip_length));
        }
        if !(0.0..=1.0).contains(&self.base_win_chance)
            || !(0.0..=1.0).contains(&self.max_win_chance)
            || self.max_win_chance < self.base_win_chance
        {
            return Err(ConfigError::InvalidWinChance {
                base: self.base_win_chance,
                max: self.max_win_chance,
            });
        }
        if self.bet_divisor <= 0.0 {
            return Err(ConfigError::InvalidBetDivisor(self.bet_divisor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_win_chance_band() {
        let config = EngineConfig::default();
        assert!((config.win_chance(0.0) - 0.35).abs() < 1e-12);
        assert!((config.win_chance(50.0) - 0.40).abs() < 1e-12);
        // Soft cap at 45% no matter the stake.
        assert!((config.win_chance(1_000_000.0) - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_short_strip_rejected() {
        let config = EngineConfig {
            strip_length: 64,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StripTooShort(64))
        ));
    }

    #[test]
    fn test_inverted_win_chance_rejected() {
        let config = EngineConfig {
            base_win_chance: 0.5,
            max_win_chance: 0.4,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
