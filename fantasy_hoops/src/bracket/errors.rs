//! Bracket error types.
//!
//! Every variant is an integrity fault: a caller or data bug to surface to an
//! operator, never to retry or patch over automatically.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::models::{GameId, MatchStatus, SeriesId, TeamRef, TournamentId};

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// Capacity must be a power of two, at least 2
    #[error("Invalid capacity: {0} (must be a power of two >= 2)")]
    InvalidCapacity(usize),

    /// Series length must be odd
    #[error("Invalid series length: best of {0} (must be odd)")]
    InvalidBestOf(u8),

    #[error("Insufficient entrants: need {needed}, have {actual}")]
    InsufficientEntrants { needed: usize, actual: usize },

    #[error("Too many entrants: capacity {capacity}, have {actual}")]
    TooManyEntrants { capacity: usize, actual: usize },

    #[error("Team entered twice: {0}")]
    DuplicateEntrant(TeamRef),

    /// Lineups would be revealed before submissions close
    #[error("Reveal time {reveal_at} is before lineup cutoff {lineup_cutoff}")]
    InvalidSchedule {
        lineup_cutoff: DateTime<Utc>,
        reveal_at: DateTime<Utc>,
    },

    #[error("Series not found: {0}")]
    UnknownSeries(SeriesId),

    #[error("Game not found: {0}")]
    UnknownGame(GameId),

    #[error("Round not found: {0}")]
    UnknownRound(usize),

    #[error("Series {0} is already finished")]
    SeriesAlreadyFinished(SeriesId),

    /// Blocked until an administrator overrides the result
    #[error("Series {0} is errored and awaits administrative correction")]
    SeriesErrored(SeriesId),

    /// One side is still unresolved or a bye
    #[error("Series {0} does not have two teams yet")]
    SeriesNotReady(SeriesId),

    #[error("Series {series_id} already has {games} game(s) scheduled")]
    SeriesGameLimit { series_id: SeriesId, games: u8 },

    #[error("Game {0} is already finished")]
    GameAlreadyFinished(GameId),

    #[error("Team {team} does not play in series {series_id}")]
    TeamNotInSeries { series_id: SeriesId, team: TeamRef },

    /// Winner's score must be strictly higher than the loser's
    #[error("Score for game {0} does not agree with the reported winner")]
    ScoreMismatch(GameId),

    #[error("Illegal status change: {from} -> {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("Round {0} is not complete")]
    RoundNotComplete(usize),

    #[error("Round {0} has already been advanced")]
    RoundAlreadyAdvanced(usize),

    /// The championship round has nothing to advance into
    #[error("Round {0} is the final round")]
    NoNextRound(usize),

    #[error("Lineups locked at {0}")]
    LineupLocked(DateTime<Utc>),

    #[error("Tournament {0} is closed")]
    TournamentClosed(TournamentId),

    #[error("Tournament {0} has no champion yet")]
    TournamentNotFinished(TournamentId),

    /// Persisted record breaks a structural invariant
    #[error("Corrupt bracket: {0}")]
    CorruptBracket(String),

    #[error("Snapshot encoding error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Snapshot decoding error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot too large: {0} bytes")]
    SnapshotTooLarge(usize),
}

impl BracketError {
    /// Get a client-safe error message
    ///
    /// Storage and codec failures are reported generically; everything else
    /// describes a bracket rule and is safe to show.
    pub fn client_message(&self) -> String {
        match self {
            BracketError::CorruptBracket(_)
            | BracketError::Encode(_)
            | BracketError::Decode(_)
            | BracketError::Serialization(_)
            | BracketError::SnapshotTooLarge(_) => "Internal bracket error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_storage_details() {
        let err = BracketError::CorruptBracket("round 2 has 3 series".to_string());
        assert_eq!(err.client_message(), "Internal bracket error");
    }

    #[test]
    fn test_client_message_keeps_rule_violations() {
        let err = BracketError::RoundNotComplete(1);
        assert_eq!(err.client_message(), "Round 1 is not complete");
    }
}
