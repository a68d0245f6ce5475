//! League configuration.
//!
//! Consolidates league-wide defaults for series length and lineup rules and
//! reads them from environment variables.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::bracket::{BestOf, TournamentConfig};
use crate::lineup::{LineupValidator, PositionQuota};

/// League-wide defaults applied to new tournaments and lineup checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    /// Series length for regular rounds
    pub default_best_of: BestOf,
    /// Series length for the championship round, if different
    pub finals_best_of: Option<BestOf>,
    /// Players per lineup
    pub lineup_size: usize,
    /// Per-position maxima
    pub quota: PositionQuota,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            default_best_of: BestOf::ONE,
            finals_best_of: None,
            lineup_size: 5,
            quota: PositionQuota::default(),
        }
    }
}

impl LeagueConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `HOOPS_BEST_OF`: Series length for regular rounds (default: 1)
    /// - `HOOPS_FINALS_BEST_OF`: Series length for the championship (optional)
    /// - `HOOPS_LINEUP_SIZE`: Players per lineup (default: 5)
    /// - `HOOPS_POSITION_QUOTA`: Per-position maxima (default: `G:2,F:2,C:1`)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but malformed, or if the resulting
    /// configuration fails [`validate`](Self::validate)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_best_of = match parse_var::<u8>(&lookup, "HOOPS_BEST_OF")? {
            Some(games) => best_of("HOOPS_BEST_OF", games)?,
            None => defaults.default_best_of,
        };

        let finals_best_of = parse_var::<u8>(&lookup, "HOOPS_FINALS_BEST_OF")?
            .map(|games| best_of("HOOPS_FINALS_BEST_OF", games))
            .transpose()?;

        let config = Self {
            default_best_of,
            finals_best_of,
            lineup_size: parse_var(&lookup, "HOOPS_LINEUP_SIZE")?.unwrap_or(defaults.lineup_size),
            quota: parse_var(&lookup, "HOOPS_POSITION_QUOTA")?.unwrap_or(defaults.quota),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lineup_size == 0 {
            return Err(ConfigError::Invalid {
                var: "HOOPS_LINEUP_SIZE".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.quota.capacity() < self.lineup_size {
            return Err(ConfigError::Invalid {
                var: "HOOPS_POSITION_QUOTA".to_string(),
                reason: format!(
                    "Quota {} admits only {} players, lineup needs {}",
                    self.quota,
                    self.quota.capacity(),
                    self.lineup_size
                ),
            });
        }

        Ok(())
    }

    /// Tournament settings with the league's series lengths applied
    pub fn tournament_config(
        &self,
        name: impl Into<String>,
        capacity: usize,
        lineup_cutoff: DateTime<Utc>,
        reveal_at: DateTime<Utc>,
    ) -> TournamentConfig {
        let config = TournamentConfig::new(
            name,
            capacity,
            self.default_best_of,
            lineup_cutoff,
            reveal_at,
        );

        match (self.finals_best_of, capacity.checked_ilog2()) {
            (Some(finals), Some(rounds)) if rounds > 0 => {
                config.with_round_best_of(rounds as usize - 1, finals)
            }
            _ => config,
        }
    }

    /// Lineup validator enforcing the league's roster rules
    pub fn validator(&self) -> LineupValidator {
        LineupValidator::new(self.quota, self.lineup_size)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parse a variable if present; a present but malformed value is an error
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn best_of(key: &str, games: u8) -> ConfigResult<BestOf> {
    BestOf::new(games).map_err(|e| ConfigError::Invalid {
        var: key.to_string(),
        reason: e.to_string(),
    })
}
