//! Lineup validation against position quotas, size and eligibility.

use std::collections::HashSet;

use super::{
    errors::{LineupRejection, LineupViolation},
    models::{Lineup, Player, PlayerId, Position, PositionCounts, PositionQuota},
};

/// Outcome of a validation attempt
pub type ValidationResult = Result<Lineup, LineupRejection>;

/// Decide whether a candidate selection may be submitted as a lineup.
///
/// Every check runs on every call, so a rejection lists all violations at
/// once in a fixed order:
///
/// 1. duplicated player IDs, in first-occurrence order
/// 2. size mismatch
/// 3. position quota violations, guard to center
/// 4. players missing from `eligible`, in candidate order
///
/// Inputs are never mutated. On success the lineup is sorted by position then
/// player ID.
pub fn validate_lineup(
    candidates: &[Player],
    quota: &PositionQuota,
    required_size: usize,
    eligible: &HashSet<PlayerId>,
) -> ValidationResult {
    let mut violations = Vec::new();

    let mut seen = HashSet::with_capacity(candidates.len());
    let mut reported = HashSet::new();
    for player in candidates {
        if !seen.insert(player.id) && reported.insert(player.id) {
            violations.push(LineupViolation::DuplicatePlayer(player.id));
        }
    }

    if candidates.len() != required_size {
        violations.push(LineupViolation::SizeMismatch {
            expected: required_size,
            actual: candidates.len(),
        });
    }

    let counts = PositionCounts::tally(candidates);
    for position in Position::ALL {
        let max = quota.max_for(position);
        let actual = counts.get(position);
        if actual > max as usize {
            violations.push(LineupViolation::PositionQuotaExceeded {
                position,
                max,
                actual,
            });
        }
    }

    let mut flagged = HashSet::new();
    for player in candidates {
        if !eligible.contains(&player.id) && flagged.insert(player.id) {
            violations.push(LineupViolation::IneligiblePlayer(player.id));
        }
    }

    if violations.is_empty() {
        Ok(Lineup::normalized(candidates.to_vec()))
    } else {
        log::debug!(
            "Rejected lineup of {} candidates with {} violation(s)",
            candidates.len(),
            violations.len()
        );
        Err(LineupRejection { violations })
    }
}

/// Lineup rules bundled for callers that validate many submissions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineupValidator {
    quota: PositionQuota,
    required_size: usize,
}

impl LineupValidator {
    pub fn new(quota: PositionQuota, required_size: usize) -> Self {
        Self {
            quota,
            required_size,
        }
    }

    pub fn quota(&self) -> &PositionQuota {
        &self.quota
    }

    pub fn required_size(&self) -> usize {
        self.required_size
    }

    pub fn validate(&self, candidates: &[Player], eligible: &HashSet<PlayerId>) -> ValidationResult {
        validate_lineup(candidates, &self.quota, self.required_size, eligible)
    }
}

/// Five-player lineup under the standard quota
impl Default for LineupValidator {
    fn default() -> Self {
        Self::new(PositionQuota::default(), 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::models::PlayerSource;

    fn player(id: PlayerId, position: Position) -> Player {
        Player::new(id, format!("Player {id}"), position, PlayerSource::MyRoster)
    }

    fn all_eligible(players: &[Player]) -> HashSet<PlayerId> {
        players.iter().map(|p| p.id).collect()
    }

    fn standard_candidates() -> Vec<Player> {
        vec![
            player(1, Position::Guard),
            player(2, Position::Guard),
            player(3, Position::Forward),
            player(4, Position::Forward),
            player(5, Position::Center),
        ]
    }

    #[test]
    fn test_valid_lineup_is_normalized() {
        let candidates = vec![
            player(5, Position::Center),
            player(4, Position::Forward),
            player(2, Position::Guard),
            player(3, Position::Forward),
            player(1, Position::Guard),
        ];
        let eligible = all_eligible(&candidates);

        let lineup = validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible).unwrap();

        assert_eq!(lineup.player_ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            lineup.counts(),
            PositionCounts {
                guard: 2,
                forward: 2,
                center: 1
            }
        );
    }

    #[test]
    fn test_three_guards_reports_only_guard_quota() {
        let candidates = vec![
            player(1, Position::Guard),
            player(2, Position::Guard),
            player(3, Position::Guard),
            player(4, Position::Forward),
            player(5, Position::Center),
        ];
        let eligible = all_eligible(&candidates);

        let rejection =
            validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible).unwrap_err();

        assert_eq!(
            rejection.violations,
            vec![LineupViolation::PositionQuotaExceeded {
                position: Position::Guard,
                max: 2,
                actual: 3,
            }]
        );
    }

    #[test]
    fn test_duplicate_player_still_runs_other_checks() {
        let mut candidates = standard_candidates();
        candidates[1] = player(1, Position::Guard);
        candidates.push(player(6, Position::Center));
        let eligible = all_eligible(&candidates);

        let rejection =
            validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible).unwrap_err();

        assert_eq!(
            rejection.violations,
            vec![
                LineupViolation::DuplicatePlayer(1),
                LineupViolation::SizeMismatch {
                    expected: 5,
                    actual: 6
                },
                LineupViolation::PositionQuotaExceeded {
                    position: Position::Center,
                    max: 1,
                    actual: 2,
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_reported_once_per_player() {
        let candidates = vec![
            player(1, Position::Guard),
            player(1, Position::Guard),
            player(1, Position::Guard),
        ];
        let eligible = all_eligible(&candidates);
        let quota = PositionQuota::new(3, 0, 0);

        let rejection = validate_lineup(&candidates, &quota, 3, &eligible).unwrap_err();

        assert_eq!(rejection.violations, vec![LineupViolation::DuplicatePlayer(1)]);
    }

    #[test]
    fn test_ineligible_players_reported() {
        let candidates = standard_candidates();
        let eligible: HashSet<PlayerId> = [1, 2, 3].into_iter().collect();

        let rejection =
            validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible).unwrap_err();

        assert_eq!(
            rejection.violations,
            vec![
                LineupViolation::IneligiblePlayer(4),
                LineupViolation::IneligiblePlayer(5),
            ]
        );
    }

    #[test]
    fn test_empty_candidates() {
        let rejection =
            validate_lineup(&[], &PositionQuota::default(), 5, &HashSet::new()).unwrap_err();

        assert_eq!(
            rejection.violations,
            vec![LineupViolation::SizeMismatch {
                expected: 5,
                actual: 0
            }]
        );
    }

    #[test]
    fn test_validation_does_not_mutate_inputs() {
        let candidates = vec![
            player(5, Position::Center),
            player(1, Position::Guard),
            player(3, Position::Forward),
            player(2, Position::Guard),
            player(4, Position::Forward),
        ];
        let before = candidates.clone();
        let eligible = all_eligible(&candidates);

        let first = validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible);
        let second = validate_lineup(&candidates, &PositionQuota::default(), 5, &eligible);

        assert_eq!(candidates, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_validator_uses_bundled_rules() {
        let validator = LineupValidator::new(PositionQuota::new(1, 1, 1), 3);
        let candidates = vec![
            player(1, Position::Guard),
            player(2, Position::Forward),
            player(3, Position::Center),
        ];

        let lineup = validator.validate(&candidates, &all_eligible(&candidates)).unwrap();
        assert_eq!(lineup.len(), 3);
        assert_eq!(validator.required_size(), 3);
    }
}
