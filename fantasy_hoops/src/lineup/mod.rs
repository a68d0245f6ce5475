//! Lineup construction rules.
//!
//! This module decides whether a user's player selection may be submitted
//! into a game:
//! - Position quotas (e.g. at most two guards)
//! - Fixed lineup size
//! - No player selected twice
//! - Every player in the caller-supplied eligible set
//!
//! Validation is a pure function of its inputs and keeps no state. A rejected
//! lineup comes back as a [`LineupRejection`] listing every violation, so the
//! UI can show a complete correction list.
//!
//! ## Example
//!
//! ```
//! use fantasy_hoops::lineup::{
//!     validate_lineup, Player, PlayerSource, Position, PositionQuota,
//! };
//! use std::collections::HashSet;
//!
//! let candidates = vec![
//!     Player::new(1, "A", Position::Guard, PlayerSource::MyRoster),
//!     Player::new(2, "B", Position::Guard, PlayerSource::MyRoster),
//!     Player::new(3, "C", Position::Forward, PlayerSource::FreeAgent),
//!     Player::new(4, "D", Position::Forward, PlayerSource::MyRoster),
//!     Player::new(5, "E", Position::Center, PlayerSource::Autopopulated),
//! ];
//! let eligible: HashSet<u64> = (1..=5).collect();
//!
//! let lineup = validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible).unwrap();
//! assert_eq!(lineup.counts().guard, 2);
//! ```

pub mod errors;
pub mod models;
pub mod validator;

pub use errors::{LineupRejection, LineupViolation, QuotaParseError};
pub use models::{Lineup, Player, PlayerId, PlayerSource, Position, PositionCounts, PositionQuota};
pub use validator::{LineupValidator, ValidationResult, validate_lineup};
