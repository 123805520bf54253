//! Win Evaluation
//!
//! A team is *alive* while at least one registered member is unfrozen, and
//! *eliminated* otherwise (an empty team is eliminated too).
//!
//! | alive teams | on tick                         | on timeout          |
//! |-------------|---------------------------------|---------------------|
//! | exactly 1   | winner                          | winner              |
//! | 0           | no winner (all frozen)          | no winner           |
//! | >= 2        | keep playing                    | no winner           |

use crate::models::{EndReason, Player, RoundOutcome, Team, TeamId};

use super::state::RoundState;

/// Head count for one team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStatus {
    pub team: TeamId,
    pub members: u32,
    pub unfrozen: u32,
}

impl TeamStatus {
    pub fn is_alive(&self) -> bool {
        self.unfrozen > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinStatus {
    /// Two or more teams still have an unfrozen member
    Contested { alive: Vec<TeamId> },
    /// Exactly one team has an unfrozen member
    Winner(TeamId),
    /// No team has an unfrozen member
    NoneAlive,
}

/// Per-team counts, in `teams` order. Players of unregistered teams are ignored.
pub fn team_statuses<'a>(
    teams: &[Team],
    players: impl IntoIterator<Item = &'a Player>,
) -> Vec<TeamStatus> {
    let mut statuses: Vec<TeamStatus> =
        teams.iter().map(|t| TeamStatus { team: t.id, members: 0, unfrozen: 0 }).collect();
    for player in players {
        if let Some(status) = statuses.iter_mut().find(|s| s.team == player.team) {
            status.members += 1;
            if !player.frozen {
                status.unfrozen += 1;
            }
        }
    }
    statuses
}

pub fn evaluate<'a>(teams: &[Team], players: impl IntoIterator<Item = &'a Player>) -> WinStatus {
    let alive: Vec<TeamId> =
        team_statuses(teams, players).into_iter().filter(|s| s.is_alive()).map(|s| s.team).collect();
    match alive.as_slice() {
        [] => WinStatus::NoneAlive,
        [only] => WinStatus::Winner(*only),
        _ => WinStatus::Contested { alive },
    }
}

/// The unique team with an unfrozen member, if there is exactly one.
pub fn winner<'a>(teams: &[Team], players: impl IntoIterator<Item = &'a Player>) -> Option<TeamId> {
    match evaluate(teams, players) {
        WinStatus::Winner(team) => Some(team),
        _ => None,
    }
}

/// Periodic check. `Some` means the round ends now.
///
/// An empty roster keeps playing.
pub fn decide_on_tick(state: &RoundState) -> Option<(RoundOutcome, EndReason)> {
    match evaluate(&state.teams, state.players.values()) {
        WinStatus::Winner(team) => {
            Some((RoundOutcome::Winner(team), EndReason::LastTeamStanding))
        }
        WinStatus::NoneAlive if !state.players.is_empty() => {
            Some((RoundOutcome::NoWinner, EndReason::AllFrozen))
        }
        _ => None,
    }
}

/// Round clock ran out; always resolves.
pub fn decide_on_timeout(state: &RoundState) -> (RoundOutcome, EndReason) {
    match evaluate(&state.teams, state.players.values()) {
        WinStatus::Winner(team) => (RoundOutcome::Winner(team), EndReason::Timeout),
        WinStatus::NoneAlive | WinStatus::Contested { .. } => {
            (RoundOutcome::NoWinner, EndReason::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::test_support::*;
    use super::*;
    use crate::models::PlayerId;
    use proptest::prelude::*;

    fn freeze_flag(state: &mut RoundState, id: u32) {
        state.players.get_mut(&PlayerId(id)).unwrap().frozen = true;
    }

    /// Two teams of two: 1,2 on Red(0), 3,4 on Blue(1)
    fn two_by_two() -> RoundState {
        let mut state = two_team_state();
        add_player(&mut state, 1, 0, (0.0, 0.0, 0.0));
        add_player(&mut state, 2, 0, (0.0, 0.0, 0.0));
        add_player(&mut state, 3, 1, (0.0, 0.0, 0.0));
        add_player(&mut state, 4, 1, (0.0, 0.0, 0.0));
        state
    }

    #[test]
    fn test_one_survivor_wins() {
        let mut state = two_by_two();
        for id in [2, 3, 4] {
            freeze_flag(&mut state, id);
        }
        assert_eq!(evaluate(&state.teams, state.players.values()), WinStatus::Winner(TeamId(0)));
        assert_eq!(
            decide_on_tick(&state),
            Some((RoundOutcome::Winner(TeamId(0)), EndReason::LastTeamStanding))
        );
    }

    #[test]
    fn test_all_frozen_is_no_winner() {
        let mut state = two_by_two();
        for id in 1..=4 {
            freeze_flag(&mut state, id);
        }
        assert_eq!(evaluate(&state.teams, state.players.values()), WinStatus::NoneAlive);
        assert_eq!(decide_on_tick(&state), Some((RoundOutcome::NoWinner, EndReason::AllFrozen)));
        assert_eq!(winner(&state.teams, state.players.values()), None);
    }

    #[test]
    fn test_contested_keeps_playing() {
        let mut state = two_by_two();
        freeze_flag(&mut state, 1);
        freeze_flag(&mut state, 3);
        assert_eq!(decide_on_tick(&state), None);
        assert_eq!(decide_on_timeout(&state), (RoundOutcome::NoWinner, EndReason::Timeout));
    }

    #[test]
    fn test_timeout_with_single_alive_team() {
        let mut state = two_by_two();
        freeze_flag(&mut state, 3);
        freeze_flag(&mut state, 4);
        assert_eq!(decide_on_timeout(&state), (RoundOutcome::Winner(TeamId(0)), EndReason::Timeout));
    }

    #[test]
    fn test_lone_team_wins_on_tick() {
        let mut state = two_team_state();
        state.teams.truncate(1);
        add_player(&mut state, 1, 0, (0.0, 0.0, 0.0));
        assert_eq!(
            decide_on_tick(&state),
            Some((RoundOutcome::Winner(TeamId(0)), EndReason::LastTeamStanding))
        );
    }

    #[test]
    fn test_empty_roster_keeps_playing() {
        let state = two_team_state();
        assert_eq!(decide_on_tick(&state), None);
        assert_eq!(decide_on_timeout(&state).0, RoundOutcome::NoWinner);
    }

    #[test]
    fn test_empty_team_counts_as_eliminated() {
        let mut state = two_team_state();
        add_player(&mut state, 1, 0, (0.0, 0.0, 0.0));
        let statuses = team_statuses(&state.teams, state.players.values());
        assert_eq!(statuses[1], TeamStatus { team: TeamId(1), members: 0, unfrozen: 0 });
        assert_eq!(evaluate(&state.teams, state.players.values()), WinStatus::Winner(TeamId(0)));
    }

    proptest! {
        /// Winner exists iff exactly one team has an unfrozen member, and it is that team.
        #[test]
        fn prop_winner_is_unique_alive_team(
            roster in prop::collection::vec((0u32..4, any::<bool>()), 0..24)
        ) {
            let mut state = two_team_state();
            state.teams.push(crate::models::Team::new(TeamId(2), "Green"));
            state.teams.push(crate::models::Team::new(TeamId(3), "Gold"));
            for (i, (team, frozen)) in roster.iter().enumerate() {
                add_player(&mut state, i as u32, *team, (0.0, 0.0, 0.0));
                state.players.get_mut(&PlayerId(i as u32)).unwrap().frozen = *frozen;
            }

            let mut alive: Vec<u32> = roster.iter().filter(|(_, f)| !f).map(|(t, _)| *t).collect();
            alive.sort_unstable();
            alive.dedup();

            let expected = if alive.len() == 1 { Some(TeamId(alive[0])) } else { None };
            prop_assert_eq!(winner(&state.teams, state.players.values()), expected);
        }
    }
}
