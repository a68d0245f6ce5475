//! Lineup validation rejections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{PlayerId, Position};

/// One reason a candidate lineup cannot be submitted.
///
/// These are expected user-facing outcomes, safe to retry once the selection
/// is corrected.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum LineupViolation {
    #[error("player {0} is selected more than once")]
    DuplicatePlayer(PlayerId),

    #[error("lineup needs {expected} players, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("too many at {position}: max {max}, got {actual}")]
    PositionQuotaExceeded {
        position: Position,
        max: u8,
        actual: usize,
    },

    #[error("player {0} is not eligible for this lineup")]
    IneligiblePlayer(PlayerId),
}

/// Complete list of violations found in a rejected lineup
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[error("lineup rejected with {} violation(s)", .violations.len())]
pub struct LineupRejection {
    pub violations: Vec<LineupViolation>,
}

impl LineupRejection {
    pub fn contains(&self, violation: &LineupViolation) -> bool {
        self.violations.contains(violation)
    }

    /// One human-readable line per violation, for a correction list in the UI
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Errors parsing a quota string such as `G:2,F:2,C:1`
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum QuotaParseError {
    #[error("unknown position: {0}")]
    UnknownPosition(String),

    #[error("malformed quota entry: {0}")]
    MalformedEntry(String),

    #[error("position {0} listed more than once")]
    RepeatedPosition(Position),

    #[error("no quota given for position {0}")]
    MissingPosition(Position),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let rejection = LineupRejection {
            violations: vec![
                LineupViolation::DuplicatePlayer(7),
                LineupViolation::PositionQuotaExceeded {
                    position: Position::Guard,
                    max: 2,
                    actual: 3,
                },
            ],
        };

        assert_eq!(rejection.to_string(), "lineup rejected with 2 violation(s)");
        assert_eq!(
            rejection.messages(),
            vec![
                "player 7 is selected more than once".to_string(),
                "too many at G: max 2, got 3".to_string(),
            ]
        );
    }
}
