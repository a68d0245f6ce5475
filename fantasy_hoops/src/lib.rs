//! # Fantasy Hoops
//!
//! The competitive structure behind a fantasy basketball client: tournament
//! brackets and lineup rules.
//!
//! ## Architecture
//!
//! Two independent components, with no shared global state:
//!
//! - **Bracket engine**: owns a single-elimination tournament (rounds, best-of-N
//!   series, games) and reacts to recorded game results. Every mutation goes
//!   through [`BracketEngine`], which returns updated records for the caller to
//!   persist.
//! - **Lineup validator**: a pure function deciding whether a player selection
//!   satisfies position quotas, lineup size, uniqueness and eligibility.
//!
//! Rendering, persistence, networking and sessions live in the surrounding
//! application.
//!
//! ## Core Modules
//!
//! - [`bracket`]: Bracket data model, engine and record codecs
//! - [`lineup`]: Lineup data model and validator
//! - [`config`]: League-wide defaults loaded from the environment
//!
//! ## Example
//!
//! ```
//! use fantasy_hoops::LeagueConfig;
//!
//! let league = LeagueConfig::default();
//! let validator = league.validator();
//! assert_eq!(validator.required_size(), 5);
//! ```

/// Tournament brackets, series and games.
pub mod bracket;
pub use bracket::{BracketEngine, BracketError, BracketResult, TeamRef, Tournament};

/// Lineup construction rules.
pub mod lineup;
pub use lineup::{Lineup, LineupRejection, LineupValidator, LineupViolation, validate_lineup};

/// League configuration.
pub mod config;
pub use config::{ConfigError, LeagueConfig};
