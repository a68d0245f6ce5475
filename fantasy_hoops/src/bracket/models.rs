//! Bracket data models for single-elimination tournaments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use uuid::Uuid;

use super::errors::{BracketError, BracketResult};
use crate::lineup::Lineup;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Series ID type, unique within a tournament
pub type SeriesId = u32;

/// Game ID type, unique within a tournament
pub type GameId = u32;

/// Reference to a fantasy team entered in a tournament
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TeamRef(String);

impl TeamRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One side of a series
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Slot {
    /// Waiting on the previous round
    Unresolved,
    /// A team is seated
    Team(TeamRef),
    /// No opponent will ever fill this side
    Bye,
}

impl Slot {
    pub fn team(&self) -> Option<&TeamRef> {
        match self {
            Slot::Team(team) => Some(team),
            _ => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Slot::Unresolved)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Unresolved => write!(f, "TBD"),
            Slot::Team(team) => write!(f, "{team}"),
            Slot::Bye => write!(f, "BYE"),
        }
    }
}

/// Lifecycle of a series or game
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    NotStarted,
    Started,
    Finished,
    /// Inconsistent results; needs an administrative correction
    Errored,
}

impl MatchStatus {
    /// Allowed moves: `NotStarted -> Started -> {Finished, Errored}`
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::NotStarted, MatchStatus::Started)
                | (MatchStatus::Started, MatchStatus::Finished)
                | (MatchStatus::Started, MatchStatus::Errored)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Errored)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::NotStarted => write!(f, "NOT_STARTED"),
            MatchStatus::Started => write!(f, "STARTED"),
            MatchStatus::Finished => write!(f, "FINISHED"),
            MatchStatus::Errored => write!(f, "ERRORED"),
        }
    }
}

/// Series length. Always odd, so a series that runs its full length has a
/// majority winner.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BestOf(u8);

impl BestOf {
    pub const ONE: BestOf = BestOf(1);

    pub fn new(games: u8) -> BracketResult<Self> {
        if games % 2 == 0 {
            return Err(BracketError::InvalidBestOf(games));
        }
        Ok(Self(games))
    }

    pub fn games(self) -> u8 {
        self.0
    }

    /// Wins needed to take the series, `ceil(N / 2)`
    pub fn wins_required(self) -> u8 {
        self.0 / 2 + 1
    }
}

impl TryFrom<u8> for BestOf {
    type Error = BracketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BestOf> for u8 {
    fn from(value: BestOf) -> Self {
        value.0
    }
}

impl fmt::Display for BestOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "best of {}", self.0)
    }
}

/// Fantasy points scored by each side of a game
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameScore {
    pub team_1: u32,
    pub team_2: u32,
}

impl GameScore {
    pub fn new(team_1: u32, team_2: u32) -> Self {
        Self { team_1, team_2 }
    }
}

/// Final result of a game
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameResult {
    pub winner: TeamRef,
    pub score: GameScore,
}

/// A single game within a series
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub series_id: SeriesId,
    pub status: MatchStatus,
    /// Lineup submitted by `team_1` of the series
    pub lineup_1: Option<Lineup>,
    /// Lineup submitted by `team_2` of the series
    pub lineup_2: Option<Lineup>,
    pub result: Option<GameResult>,
}

impl Game {
    pub fn new(id: GameId, series_id: SeriesId) -> Self {
        Self {
            id,
            series_id,
            status: MatchStatus::NotStarted,
            lineup_1: None,
            lineup_2: None,
            result: None,
        }
    }

    pub fn winner(&self) -> Option<&TeamRef> {
        self.result.as_ref().map(|r| &r.winner)
    }
}

/// A best-of-N matchup between two bracket slots
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Series {
    pub id: SeriesId,
    /// Round index (0 is the opening round)
    pub round: usize,
    /// Index within the round; positions `2k` and `2k + 1` feed position `k`
    /// of the next round
    pub position: usize,
    pub team_1: Slot,
    pub team_2: Slot,
    pub best_of: BestOf,
    pub games: Vec<Game>,
    pub status: MatchStatus,
    pub winner: Option<TeamRef>,
    /// Winner set by an administrator to unblock an errored series
    pub override_winner: Option<TeamRef>,
}

impl Series {
    pub fn new(id: SeriesId, round: usize, position: usize, best_of: BestOf) -> Self {
        Self {
            id,
            round,
            position,
            team_1: Slot::Unresolved,
            team_2: Slot::Unresolved,
            best_of,
            games: Vec::new(),
            status: MatchStatus::NotStarted,
            winner: None,
            override_winner: None,
        }
    }

    /// Both sides hold real teams, so games can be played
    pub fn is_playable(&self) -> bool {
        self.team_1.team().is_some() && self.team_2.team().is_some()
    }

    /// Both sides are known and at least one is a bye
    pub fn is_bye(&self) -> bool {
        self.team_1.is_resolved()
            && self.team_2.is_resolved()
            && (self.team_1.is_bye() || self.team_2.is_bye())
    }

    pub fn has_team(&self, team: &TeamRef) -> bool {
        self.team_1.team() == Some(team) || self.team_2.team() == Some(team)
    }

    /// Finished, or errored with an administrative override in place
    pub fn is_complete(&self) -> bool {
        match self.status {
            MatchStatus::Finished => true,
            MatchStatus::Errored => self.override_winner.is_some(),
            _ => false,
        }
    }

    /// What this series sends to the next round, once complete
    pub fn advancing_slot(&self) -> Option<Slot> {
        match self.status {
            MatchStatus::Finished => Some(
                self.winner
                    .clone()
                    .map_or(Slot::Bye, Slot::Team),
            ),
            MatchStatus::Errored => self.override_winner.clone().map(Slot::Team),
            _ => None,
        }
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == game_id)
    }

    /// Finished games
    pub fn games_played(&self) -> usize {
        self.games
            .iter()
            .filter(|g| g.status == MatchStatus::Finished)
            .count()
    }

    /// Win counts for `(team_1, team_2)` over finished games
    pub fn wins(&self) -> (usize, usize) {
        let count = |slot: &Slot| {
            slot.team().map_or(0, |team| {
                self.games
                    .iter()
                    .filter(|g| g.status == MatchStatus::Finished && g.winner() == Some(team))
                    .count()
            })
        };
        (count(&self.team_1), count(&self.team_2))
    }

    /// Derive status and winner from the recorded games.
    ///
    /// Games whose winner is neither team still count as played, which is how
    /// corrupted records surface as `Errored`.
    pub(crate) fn evaluate(&self) -> (MatchStatus, Option<TeamRef>) {
        if self.is_bye() {
            return (MatchStatus::Finished, self.bye_winner());
        }

        let needed = self.best_of.wins_required() as usize;
        let played = self.games_played();
        let (wins_1, wins_2) = self.wins();

        if played > self.best_of.games() as usize || (wins_1 >= needed && wins_2 >= needed) {
            (MatchStatus::Errored, None)
        } else if wins_1 >= needed {
            (MatchStatus::Finished, self.team_1.team().cloned())
        } else if wins_2 >= needed {
            (MatchStatus::Finished, self.team_2.team().cloned())
        } else if played == self.best_of.games() as usize {
            (MatchStatus::Errored, None)
        } else if self.games.is_empty() {
            (MatchStatus::NotStarted, None)
        } else {
            (MatchStatus::Started, None)
        }
    }

    fn bye_winner(&self) -> Option<TeamRef> {
        self.team_1
            .team()
            .or_else(|| self.team_2.team())
            .cloned()
    }

    /// Award the series to the side facing a bye. Two byes finish with no
    /// winner and forward a bye.
    pub(crate) fn award_bye(&mut self) {
        self.status = MatchStatus::Finished;
        self.winner = self.bye_winner();
    }
}

/// One column of the bracket
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Round {
    pub index: usize,
    pub series: Vec<Series>,
    /// Winners have been moved into the next round
    pub advanced: bool,
}

impl Round {
    pub fn is_complete(&self) -> bool {
        self.series.iter().all(Series::is_complete)
    }

    /// Display label given the total number of rounds
    pub fn label(&self, total_rounds: usize) -> String {
        match total_rounds.saturating_sub(self.index) {
            1 => "Championship".to_string(),
            2 => "Semifinals".to_string(),
            3 => "Quarterfinals".to_string(),
            remaining => format!("Round of {}", 1usize << remaining),
        }
    }
}

/// Tournament lifecycle
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentState {
    /// Games are being played
    Active,
    /// Archived; no further mutation
    Closed,
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Tournament name
    pub name: String,
    /// Entrant capacity, a power of two
    pub capacity: usize,
    /// Series length for every round without an override
    pub best_of: BestOf,
    /// Per-round series length overrides, keyed by round index
    pub round_best_of: BTreeMap<usize, BestOf>,
    /// Lineups may not be submitted at or after this instant
    pub lineup_cutoff: DateTime<Utc>,
    /// Submitted lineups become visible to opponents at this instant
    pub reveal_at: DateTime<Utc>,
}

impl TournamentConfig {
    pub fn new(
        name: impl Into<String>,
        capacity: usize,
        best_of: BestOf,
        lineup_cutoff: DateTime<Utc>,
        reveal_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            best_of,
            round_best_of: BTreeMap::new(),
            lineup_cutoff,
            reveal_at,
        }
    }

    /// Use a different series length for one round
    pub fn with_round_best_of(mut self, round: usize, best_of: BestOf) -> Self {
        self.round_best_of.insert(round, best_of);
        self
    }

    /// Series length for a round
    pub fn best_of_for(&self, round: usize) -> BestOf {
        self.round_best_of
            .get(&round)
            .copied()
            .unwrap_or(self.best_of)
    }
}

/// A single-elimination tournament and its full bracket
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub capacity: usize,
    pub lineup_cutoff: DateTime<Utc>,
    pub reveal_at: DateTime<Utc>,
    pub rounds: Vec<Round>,
    pub next_game_id: GameId,
    pub state: TournamentState,
}

impl Tournament {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// First round whose winners have not moved on yet
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.iter().find(|r| !r.advanced)
    }

    pub fn series(&self, series_id: SeriesId) -> Option<&Series> {
        self.rounds
            .iter()
            .flat_map(|r| r.series.iter())
            .find(|s| s.id == series_id)
    }

    pub(crate) fn series_mut(&mut self, series_id: SeriesId) -> Option<&mut Series> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.series.iter_mut())
            .find(|s| s.id == series_id)
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.rounds
            .iter()
            .flat_map(|r| r.series.iter())
            .find_map(|s| s.game(game_id))
    }

    /// Winner of the championship series, or its administrative override
    /// when the series errored
    pub fn champion(&self) -> Option<&TeamRef> {
        let final_series = self.rounds.last()?.series.first()?;
        match final_series.status {
            MatchStatus::Finished => final_series.winner.as_ref(),
            MatchStatus::Errored => final_series.override_winner.as_ref(),
            _ => None,
        }
    }

    pub fn is_lineup_locked(&self, now: DateTime<Utc>) -> bool {
        now >= self.lineup_cutoff
    }

    pub fn is_revealed(&self, now: DateTime<Utc>) -> bool {
        now >= self.reveal_at
    }

    /// A team's lineup for a game, hidden until the reveal time
    pub fn visible_lineup(
        &self,
        game_id: GameId,
        team: &TeamRef,
        now: DateTime<Utc>,
    ) -> Option<&Lineup> {
        if !self.is_revealed(now) {
            return None;
        }
        let game = self.game(game_id)?;
        let series = self.series(game.series_id)?;
        if series.team_1.team() == Some(team) {
            game.lineup_1.as_ref()
        } else if series.team_2.team() == Some(team) {
            game.lineup_2.as_ref()
        } else {
            None
        }
    }
}
