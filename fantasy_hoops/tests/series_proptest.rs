/// Property-based tests for best-of-N series scoring using proptest
///
/// These tests check that a series finishes exactly when one team reaches a
/// majority of N, whatever order the wins arrive in.
use chrono::{Duration, Utc};
use fantasy_hoops::bracket::{
    BestOf, BracketEngine, BracketError, GameScore, MatchStatus, TeamRef, TournamentConfig,
};
use proptest::prelude::*;

// Strategy to generate an odd series length
fn best_of_strategy() -> impl Strategy<Value = u8> {
    (0u8..=4).prop_map(|k| 2 * k + 1)
}

// Strategy to generate a series length and a sequence of game winners
// (true = team 1). The sequence is as long as the series can possibly run.
fn series_outcomes_strategy() -> impl Strategy<Value = (u8, Vec<bool>)> {
    best_of_strategy().prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(any::<bool>(), n as usize..=n as usize),
        )
    })
}

fn head_to_head(best_of: u8) -> BracketEngine {
    let cutoff = Utc::now() + Duration::hours(1);
    let config = TournamentConfig::new(
        "Property Cup",
        2,
        BestOf::new(best_of).unwrap(),
        cutoff,
        cutoff,
    );
    BracketEngine::initialize_bracket(config, vec![TeamRef::new("Home"), TeamRef::new("Away")])
        .unwrap()
}

proptest! {
    #[test]
    fn test_series_finishes_exactly_at_majority((n, outcomes) in series_outcomes_strategy()) {
        let mut engine = head_to_head(n);
        let series_id = engine.tournament().rounds[0].series[0].id;
        let needed = BestOf::new(n).unwrap().wins_required() as usize;

        let (mut home, mut away) = (0usize, 0usize);
        for home_wins in outcomes {
            let game = engine.schedule_game(series_id).unwrap();
            let (winner, score) = if home_wins {
                home += 1;
                (TeamRef::new("Home"), GameScore::new(101, 99))
            } else {
                away += 1;
                (TeamRef::new("Away"), GameScore::new(99, 101))
            };

            let series = engine
                .record_game_result(series_id, game.id, winner, score)
                .unwrap();

            let decided = home >= needed || away >= needed;
            prop_assert_eq!(series.status == MatchStatus::Finished, decided);
            prop_assert_ne!(series.status, MatchStatus::Errored);
            prop_assert_eq!(series.wins(), (home, away));

            if decided {
                let expected = if home >= needed { "Home" } else { "Away" };
                prop_assert_eq!(series.winner.as_ref().map(TeamRef::as_str), Some(expected));
                break;
            }
        }

        // An odd-length series always produces a winner within N games
        prop_assert!(engine.champion().is_some());
        let is_finished = matches!(
            engine.schedule_game(series_id),
            Err(BracketError::SeriesAlreadyFinished(_))
        );
        prop_assert!(is_finished);
    }

    #[test]
    fn test_even_series_length_rejected(k in 0u8..=127) {
        let n = 2 * k;
        prop_assert!(matches!(BestOf::new(n), Err(BracketError::InvalidBestOf(v)) if v == n));
    }

    #[test]
    fn test_odd_series_length_majority(n in best_of_strategy()) {
        let best_of = BestOf::new(n).unwrap();
        let needed = best_of.wins_required();
        prop_assert!(2 * needed > n);
        prop_assert!(2 * (needed - 1) < n);
    }
}
