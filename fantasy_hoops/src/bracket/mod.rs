//! Single-elimination tournament brackets.
//!
//! This module provides:
//! - Bracket seeding with byes for partially filled fields
//! - Best-of-N series scoring from recorded game results
//! - Round advancement by index pairing
//! - Lineup submission windows (cutoff and reveal)
//! - Record codecs for persistence
//!
//! The engine never invents results: every game outcome comes from the caller.
//!
//! ## Example
//!
//! ```
//! use fantasy_hoops::bracket::{BestOf, BracketEngine, GameScore, TeamRef, TournamentConfig};
//! use chrono::{Duration, Utc};
//!
//! let cutoff = Utc::now() + Duration::hours(2);
//! let config = TournamentConfig::new("Playoffs", 4, BestOf::ONE, cutoff, cutoff);
//! let entrants = vec![TeamRef::new("Ballers"), TeamRef::new("Dunkers"), TeamRef::new("Hoopers")];
//!
//! let mut engine = BracketEngine::initialize_bracket(config, entrants)?;
//! let series_id = engine.tournament().rounds[0].series[0].id;
//!
//! let game = engine.schedule_game(series_id)?;
//! let series =
//!     engine.record_game_result(series_id, game.id, TeamRef::new("Dunkers"), GameScore::new(88, 97))?;
//! assert_eq!(series.winner, Some(TeamRef::new("Dunkers")));
//!
//! // The second opening series was a bye, so the round is complete.
//! let championship = engine.advance_round(0)?;
//! assert!(championship.series[0].is_playable());
//! # Ok::<(), fantasy_hoops::bracket::BracketError>(())
//! ```

pub mod engine;
pub mod errors;
pub mod models;
pub mod snapshot;

pub use engine::{BracketEngine, MAX_CAPACITY, MIN_ENTRANTS};
pub use errors::{BracketError, BracketResult};
pub use models::{
    BestOf, Game, GameId, GameResult, GameScore, MatchStatus, Round, Series, SeriesId, Slot,
    TeamRef, Tournament, TournamentConfig, TournamentId, TournamentState,
};
