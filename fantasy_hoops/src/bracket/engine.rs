//! Bracket engine: seeding, series progression and round advancement.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use super::errors::{BracketError, BracketResult};
use super::models::{
    Game, GameId, GameScore, GameResult, MatchStatus, Round, Series, SeriesId, Slot, TeamRef,
    Tournament, TournamentConfig, TournamentState,
};
use crate::lineup::Lineup;

/// Minimum number of real teams a bracket accepts
pub const MIN_ENTRANTS: usize = 2;

/// Largest bracket the engine builds
pub const MAX_CAPACITY: usize = 1024;

/// Owns a tournament aggregate and applies every mutation to it.
///
/// Mutations on the same series must be serialized by the caller; the engine
/// takes `&mut self`, so sharing one across threads already forces that.
#[derive(Debug, Clone)]
pub struct BracketEngine {
    tournament: Tournament,
}

impl BracketEngine {
    /// Build a new bracket and seed the opening round.
    ///
    /// Entrants are placed in input order. When there are fewer entrants than
    /// slots, byes are spread so each opening series holds at most one bye
    /// while entrants remain; bye series are awarded immediately with no games.
    pub fn initialize_bracket(
        config: TournamentConfig,
        entrants: Vec<TeamRef>,
    ) -> BracketResult<Self> {
        let capacity = config.capacity;
        if capacity < 2 || capacity > MAX_CAPACITY || !capacity.is_power_of_two() {
            return Err(BracketError::InvalidCapacity(capacity));
        }

        if entrants.len() < MIN_ENTRANTS {
            return Err(BracketError::InsufficientEntrants {
                needed: MIN_ENTRANTS,
                actual: entrants.len(),
            });
        }

        if entrants.len() > capacity {
            return Err(BracketError::TooManyEntrants {
                capacity,
                actual: entrants.len(),
            });
        }

        let mut seen = HashSet::with_capacity(entrants.len());
        if let Some(dup) = entrants.iter().find(|team| !seen.insert(*team)) {
            return Err(BracketError::DuplicateEntrant(dup.clone()));
        }

        if config.reveal_at < config.lineup_cutoff {
            return Err(BracketError::InvalidSchedule {
                lineup_cutoff: config.lineup_cutoff,
                reveal_at: config.reveal_at,
            });
        }

        let entrant_count = entrants.len();
        let mut rounds = build_rounds(&config);
        seed_opening_round(&mut rounds[0], entrants);

        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: config.name,
            capacity,
            lineup_cutoff: config.lineup_cutoff,
            reveal_at: config.reveal_at,
            rounds,
            next_game_id: 1,
            state: TournamentState::Active,
        };

        log::info!(
            "Initialized bracket {} '{}': {} entrants, capacity {}, {} rounds",
            tournament.id,
            tournament.name,
            entrant_count,
            capacity,
            tournament.round_count()
        );

        Ok(Self { tournament })
    }

    /// Load a persisted tournament, re-deriving every series status from its
    /// games.
    ///
    /// This is where inconsistent records become `Errored` series. Records
    /// that cannot be repaired that way (an override naming a team outside
    /// its series, games in a bye series) fail with `CorruptBracket`.
    pub fn restore(mut tournament: Tournament) -> BracketResult<Self> {
        check_structure(&tournament)?;

        for series in tournament.rounds.iter_mut().flat_map(|r| r.series.iter_mut()) {
            if let Some(team) = series
                .override_winner
                .as_ref()
                .filter(|team| !series.has_team(team))
            {
                return Err(BracketError::CorruptBracket(format!(
                    "series {} overridden to {} which is not in the series",
                    series.id, team
                )));
            }

            if series.is_bye() {
                if !series.games.is_empty() {
                    return Err(BracketError::CorruptBracket(format!(
                        "bye series {} has games",
                        series.id
                    )));
                }
                series.award_bye();
                continue;
            }

            if !series.is_playable() {
                if !series.games.is_empty() {
                    return Err(BracketError::CorruptBracket(format!(
                        "series {} has games but no opponent",
                        series.id
                    )));
                }
                series.status = MatchStatus::NotStarted;
                series.winner = None;
                continue;
            }

            let (status, winner) = series.evaluate();
            if status == MatchStatus::Errored {
                log::warn!(
                    "Series {} in tournament {} restored as errored",
                    series.id,
                    tournament.id
                );
            }
            series.status = status;
            series.winner = winner;
        }

        Ok(Self { tournament })
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn into_tournament(self) -> Tournament {
        self.tournament
    }

    /// Champion once the final series is finished
    pub fn champion(&self) -> Option<&TeamRef> {
        self.tournament.champion()
    }

    /// Add an unplayed game to a series. The first game starts the series.
    pub fn schedule_game(&mut self, series_id: SeriesId) -> BracketResult<Game> {
        self.ensure_active()?;
        let game_id = self.tournament.next_game_id;

        let series = self
            .tournament
            .series_mut(series_id)
            .ok_or(BracketError::UnknownSeries(series_id))?;
        ensure_open(series)?;

        if !series.is_playable() {
            return Err(BracketError::SeriesNotReady(series_id));
        }

        if series.games.len() >= series.best_of.games() as usize {
            return Err(BracketError::SeriesGameLimit {
                series_id,
                games: series.best_of.games(),
            });
        }

        if series.status == MatchStatus::NotStarted {
            transition(&mut series.status, MatchStatus::Started)?;
        }

        let game = Game::new(game_id, series_id);
        series.games.push(game.clone());
        self.tournament.next_game_id += 1;

        log::debug!("Scheduled game {} in series {}", game_id, series_id);
        Ok(game)
    }

    /// Attach a validated lineup to one side of a game.
    ///
    /// The game starts once both sides have a lineup.
    pub fn submit_lineup(
        &mut self,
        series_id: SeriesId,
        game_id: GameId,
        team: &TeamRef,
        lineup: Lineup,
        now: DateTime<Utc>,
    ) -> BracketResult<Game> {
        self.ensure_active()?;
        if self.tournament.is_lineup_locked(now) {
            return Err(BracketError::LineupLocked(self.tournament.lineup_cutoff));
        }

        let series = self
            .tournament
            .series_mut(series_id)
            .ok_or(BracketError::UnknownSeries(series_id))?;
        ensure_open(series)?;

        let first_side = if series.team_1.team() == Some(team) {
            true
        } else if series.team_2.team() == Some(team) {
            false
        } else {
            return Err(BracketError::TeamNotInSeries {
                series_id,
                team: team.clone(),
            });
        };

        let game = series
            .games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or(BracketError::UnknownGame(game_id))?;

        if game.status.is_terminal() {
            return Err(BracketError::GameAlreadyFinished(game_id));
        }

        if first_side {
            game.lineup_1 = Some(lineup);
        } else {
            game.lineup_2 = Some(lineup);
        }

        if game.status == MatchStatus::NotStarted
            && game.lineup_1.is_some()
            && game.lineup_2.is_some()
        {
            transition(&mut game.status, MatchStatus::Started)?;
        }

        Ok(game.clone())
    }

    /// Record the outcome of a game and re-derive the series state.
    ///
    /// The series finishes when a team reaches `ceil(N / 2)` wins and errors
    /// if all N games are played without a majority. An errored series is
    /// never resolved here.
    pub fn record_game_result(
        &mut self,
        series_id: SeriesId,
        game_id: GameId,
        winner: TeamRef,
        score: GameScore,
    ) -> BracketResult<Series> {
        self.ensure_active()?;

        let series = self
            .tournament
            .series_mut(series_id)
            .ok_or(BracketError::UnknownSeries(series_id))?;

        let game_index = series
            .games
            .iter()
            .position(|g| g.id == game_id)
            .ok_or(BracketError::UnknownGame(game_id))?;

        ensure_open(series)?;

        let winner_is_team_1 = if series.team_1.team() == Some(&winner) {
            true
        } else if series.team_2.team() == Some(&winner) {
            false
        } else {
            return Err(BracketError::TeamNotInSeries {
                series_id,
                team: winner,
            });
        };

        let score_agrees = if winner_is_team_1 {
            score.team_1 > score.team_2
        } else {
            score.team_2 > score.team_1
        };
        if !score_agrees {
            return Err(BracketError::ScoreMismatch(game_id));
        }

        let game = &mut series.games[game_index];
        if game.status.is_terminal() {
            return Err(BracketError::GameAlreadyFinished(game_id));
        }
        if game.status == MatchStatus::NotStarted {
            transition(&mut game.status, MatchStatus::Started)?;
        }
        transition(&mut game.status, MatchStatus::Finished)?;
        game.result = Some(GameResult { winner, score });

        let (status, series_winner) = series.evaluate();
        if status != series.status {
            transition(&mut series.status, status)?;
        }
        series.winner = series_winner;

        let (wins_1, wins_2) = series.wins();
        log::debug!(
            "Game {} recorded in series {}: {} {}-{} {}",
            game_id,
            series_id,
            series.team_1,
            wins_1,
            wins_2,
            series.team_2
        );

        match series.status {
            MatchStatus::Finished => {
                if let Some(team) = &series.winner {
                    log::info!("Series {} won by {}", series_id, team);
                }
            }
            MatchStatus::Errored => {
                log::warn!(
                    "Series {} errored after {} game(s) without a majority",
                    series_id,
                    series.games_played()
                );
            }
            _ => {}
        }

        let updated = series.clone();
        if updated.status == MatchStatus::Finished {
            self.announce_champion();
        }
        Ok(updated)
    }

    /// Move the winners of a completed round into the next one.
    ///
    /// Series `2k` and `2k + 1` feed the two sides of series `k` in the next
    /// round. Next-round series facing a bye are awarded on the spot. Returns
    /// the next round as populated.
    pub fn advance_round(&mut self, round_index: usize) -> BracketResult<Round> {
        self.ensure_active()?;

        let total = self.tournament.rounds.len();
        if round_index >= total {
            return Err(BracketError::UnknownRound(round_index));
        }
        if round_index + 1 == total {
            return Err(BracketError::NoNextRound(round_index));
        }

        let (done, pending) = self.tournament.rounds.split_at_mut(round_index + 1);
        let current = &mut done[round_index];
        let next = &mut pending[0];

        if current.advanced {
            return Err(BracketError::RoundAlreadyAdvanced(round_index));
        }

        let advancing = current
            .series
            .iter()
            .map(Series::advancing_slot)
            .collect::<Option<Vec<Slot>>>()
            .ok_or(BracketError::RoundNotComplete(round_index))?;

        for (position, slot) in advancing.into_iter().enumerate() {
            let target = next
                .series
                .get_mut(position / 2)
                .ok_or_else(|| {
                    BracketError::CorruptBracket(format!(
                        "round {} has no series for position {}",
                        round_index + 1,
                        position / 2
                    ))
                })?;
            if position % 2 == 0 {
                target.team_1 = slot;
            } else {
                target.team_2 = slot;
            }
        }

        for series in next.series.iter_mut().filter(|s| s.is_bye()) {
            series.award_bye();
            log::debug!("Series {} resolved by bye", series.id);
        }

        current.advanced = true;
        let populated = next.clone();

        log::info!(
            "Advanced round {} of tournament {}",
            round_index,
            self.tournament.id
        );
        self.announce_champion();

        Ok(populated)
    }

    /// Archive the tournament once the championship is decided
    pub fn close(&mut self) -> BracketResult<()> {
        self.ensure_active()?;

        let decided = self
            .tournament
            .rounds
            .last()
            .and_then(|r| r.series.first())
            .is_some_and(Series::is_complete);
        if !decided {
            return Err(BracketError::TournamentNotFinished(self.tournament.id));
        }

        self.tournament.state = TournamentState::Closed;
        log::info!("Closed tournament {}", self.tournament.id);
        Ok(())
    }

    fn ensure_active(&self) -> BracketResult<()> {
        match self.tournament.state {
            TournamentState::Active => Ok(()),
            TournamentState::Closed => Err(BracketError::TournamentClosed(self.tournament.id)),
        }
    }

    fn announce_champion(&self) {
        if let Some(champion) = self.tournament.champion() {
            log::info!(
                "Tournament {} '{}' won by {}",
                self.tournament.id,
                self.tournament.name,
                champion
            );
        }
    }
}

fn transition(status: &mut MatchStatus, next: MatchStatus) -> BracketResult<()> {
    if !status.can_transition_to(next) {
        return Err(BracketError::InvalidTransition {
            from: *status,
            to: next,
        });
    }
    *status = next;
    Ok(())
}

fn ensure_open(series: &Series) -> BracketResult<()> {
    match series.status {
        MatchStatus::Finished => Err(BracketError::SeriesAlreadyFinished(series.id)),
        MatchStatus::Errored => Err(BracketError::SeriesErrored(series.id)),
        _ => Ok(()),
    }
}

fn build_rounds(config: &TournamentConfig) -> Vec<Round> {
    let round_count = config.capacity.trailing_zeros() as usize;
    let mut next_id: SeriesId = 1;
    let mut rounds = Vec::with_capacity(round_count);

    for index in 0..round_count {
        let series_count = config.capacity >> (index + 1);
        let best_of = config.best_of_for(index);
        let mut series = Vec::with_capacity(series_count);
        for position in 0..series_count {
            series.push(Series::new(next_id, index, position, best_of));
            next_id += 1;
        }
        rounds.push(Round {
            index,
            series,
            advanced: false,
        });
    }

    rounds
}

fn seed_opening_round(opening: &mut Round, entrants: Vec<TeamRef>) {
    let series_count = opening.series.len();
    let mut entrants = entrants.into_iter();

    for (position, series) in opening.series.iter_mut().enumerate() {
        series.team_1 = entrants.next().map_or(Slot::Bye, Slot::Team);

        // Take a second entrant only if the rest can still give every
        // remaining series a team.
        series.team_2 = if entrants.len() >= series_count - position {
            entrants.next().map_or(Slot::Bye, Slot::Team)
        } else {
            Slot::Bye
        };

        if series.is_bye() {
            series.award_bye();
        }
    }
}

fn check_structure(tournament: &Tournament) -> BracketResult<()> {
    let capacity = tournament.capacity;
    if capacity < 2 || capacity > MAX_CAPACITY || !capacity.is_power_of_two() {
        return Err(BracketError::CorruptBracket(format!(
            "capacity {capacity} is not a power of two up to {MAX_CAPACITY}"
        )));
    }

    let expected_rounds = capacity.trailing_zeros() as usize;
    if tournament.rounds.len() != expected_rounds {
        return Err(BracketError::CorruptBracket(format!(
            "expected {} rounds, found {}",
            expected_rounds,
            tournament.rounds.len()
        )));
    }

    let mut series_ids = HashSet::new();
    let mut game_ids = HashSet::new();

    for (index, round) in tournament.rounds.iter().enumerate() {
        let expected_series = capacity >> (index + 1);
        if round.index != index || round.series.len() != expected_series {
            return Err(BracketError::CorruptBracket(format!(
                "round {index} should hold {expected_series} series"
            )));
        }

        for (position, series) in round.series.iter().enumerate() {
            if series.round != index || series.position != position {
                return Err(BracketError::CorruptBracket(format!(
                    "series {} is out of place",
                    series.id
                )));
            }
            if !series_ids.insert(series.id) {
                return Err(BracketError::CorruptBracket(format!(
                    "series id {} repeats",
                    series.id
                )));
            }

            for game in &series.games {
                if game.series_id != series.id
                    || !game_ids.insert(game.id)
                    || game.id >= tournament.next_game_id
                {
                    return Err(BracketError::CorruptBracket(format!(
                        "game {} does not belong to series {}",
                        game.id, series.id
                    )));
                }
            }
        }
    }

    Ok(())
}
