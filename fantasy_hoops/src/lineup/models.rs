//! Lineup data models: players, positions, quotas and normalized lineups.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::QuotaParseError;

/// Player ID type
pub type PlayerId = u64;

/// Court position a player is rostered at.
///
/// The declaration order is the display order of a normalized lineup.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Position {
    Guard,
    Forward,
    Center,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Guard, Position::Forward, Position::Center];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Guard => "G",
            Self::Forward => "F",
            Self::Center => "C",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Position {
    type Err = QuotaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "guard" => Ok(Self::Guard),
            "f" | "forward" => Ok(Self::Forward),
            "c" | "center" => Ok(Self::Center),
            other => Err(QuotaParseError::UnknownPosition(other.to_string())),
        }
    }
}

/// Where a player in a candidate selection came from
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSource {
    /// Owned by the user
    MyRoster,
    /// Filled in by the client on the user's behalf
    Autopopulated,
    /// Unowned player picked from free agency
    FreeAgent,
}

impl fmt::Display for PlayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSource::MyRoster => write!(f, "my roster"),
            PlayerSource::Autopopulated => write!(f, "autopopulated"),
            PlayerSource::FreeAgent => write!(f, "free agent"),
        }
    }
}

/// A player reference as selected by the user
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    /// Player ID
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Rostered position
    pub position: Position,
    /// Selection source
    pub source: PlayerSource,
}

impl Player {
    /// Create a new player reference
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        source: PlayerSource,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            source,
        }
    }
}

/// Maximum number of players allowed at each position in one lineup.
///
/// Every position carries an explicit maximum; there is no fallback for a
/// position the caller forgot to configure.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PositionQuota {
    pub guard: u8,
    pub forward: u8,
    pub center: u8,
}

impl PositionQuota {
    /// Create a quota from explicit per-position maxima
    pub fn new(guard: u8, forward: u8, center: u8) -> Self {
        Self {
            guard,
            forward,
            center,
        }
    }

    /// Maximum allowed count for a position
    pub fn max_for(&self, position: Position) -> u8 {
        match position {
            Position::Guard => self.guard,
            Position::Forward => self.forward,
            Position::Center => self.center,
        }
    }

    /// Largest lineup this quota can ever admit
    pub fn capacity(&self) -> usize {
        self.guard as usize + self.forward as usize + self.center as usize
    }
}

/// Standard basketball quota: two guards, two forwards, one center.
impl Default for PositionQuota {
    fn default() -> Self {
        Self::new(2, 2, 1)
    }
}

impl fmt::Display for PositionQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G:{},F:{},C:{}", self.guard, self.forward, self.center)
    }
}

/// Parses the `G:2,F:2,C:1` form. All three positions must appear exactly once.
impl FromStr for PositionQuota {
    type Err = QuotaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut limits: [Option<u8>; 3] = [None; 3];

        for entry in s.split(',').filter(|e| !e.trim().is_empty()) {
            let (position, max) = entry
                .split_once(':')
                .ok_or_else(|| QuotaParseError::MalformedEntry(entry.trim().to_string()))?;
            let position: Position = position.parse()?;
            let max: u8 = max
                .trim()
                .parse()
                .map_err(|_| QuotaParseError::MalformedEntry(entry.trim().to_string()))?;

            let slot = &mut limits[position as usize];
            if slot.is_some() {
                return Err(QuotaParseError::RepeatedPosition(position));
            }
            *slot = Some(max);
        }

        let take = |position: Position| {
            limits[position as usize].ok_or(QuotaParseError::MissingPosition(position))
        };

        Ok(Self {
            guard: take(Position::Guard)?,
            forward: take(Position::Forward)?,
            center: take(Position::Center)?,
        })
    }
}

/// Per-position head count of a lineup, for display
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PositionCounts {
    pub guard: usize,
    pub forward: usize,
    pub center: usize,
}

impl PositionCounts {
    /// Count positions across a player list
    pub fn tally<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut counts = Self::default();
        for player in players {
            match player.position {
                Position::Guard => counts.guard += 1,
                Position::Forward => counts.forward += 1,
                Position::Center => counts.center += 1,
            }
        }
        counts
    }

    /// Count for a single position
    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Guard => self.guard,
            Position::Forward => self.forward,
            Position::Center => self.center,
        }
    }

    /// Total players counted
    pub fn total(&self) -> usize {
        self.guard + self.forward + self.center
    }
}

/// A lineup that passed validation, ordered by position then player ID.
///
/// Only [`validate_lineup`](super::validate_lineup) builds one.
///
/// Stored lineups carry only their players; ordering and counts are rebuilt
/// on load.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "LineupRecord", into = "LineupRecord")]
pub struct Lineup {
    players: Vec<Player>,
    counts: PositionCounts,
}

#[derive(Deserialize, Serialize)]
struct LineupRecord {
    players: Vec<Player>,
}

impl From<LineupRecord> for Lineup {
    fn from(record: LineupRecord) -> Self {
        Self::normalized(record.players)
    }
}

impl From<Lineup> for LineupRecord {
    fn from(lineup: Lineup) -> Self {
        Self {
            players: lineup.players,
        }
    }
}

impl Lineup {
    pub(crate) fn normalized(mut players: Vec<Player>) -> Self {
        players.sort_by_key(|p| (p.position, p.id));
        let counts = PositionCounts::tally(&players);
        Self { players, counts }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn counts(&self) -> PositionCounts {
        self.counts
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
