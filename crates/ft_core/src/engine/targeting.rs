//! Bot Targeting
//!
//! Greedy nearest-target steering, recomputed from scratch on every update
//! tick. No path planning and no memory of the previous target: each live
//! bot is sent toward whichever chaseable runner is closest right now.
//!
//! Ties keep the first candidate in ascending `PlayerId` order.

use nalgebra::distance;

use crate::models::{PlayerId, Position};

use super::commands::HostCommand;
use super::state::RoundState;

/// Candidate picked by [`nearest_target`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetChoice {
    pub player: PlayerId,
    pub position: Position,
    pub distance: f32,
}

/// Closest candidate to `from` by straight-line distance.
pub fn nearest_target<I>(from: &Position, candidates: I) -> Option<TargetChoice>
where
    I: IntoIterator<Item = (PlayerId, Position)>,
{
    let mut best: Option<TargetChoice> = None;
    for (player, position) in candidates {
        let d = distance(from, &position);
        if best.map_or(true, |b| d < b.distance) {
            best = Some(TargetChoice { player, position, distance: d });
        }
    }
    best
}

/// Point every live bot at its nearest chaseable runner.
///
/// Returns how many `MoveToward` commands were issued. Bots with nothing to
/// chase get no command and their `target` is cleared.
pub fn retarget_bots(state: &mut RoundState) -> usize {
    let candidates: Vec<(PlayerId, Position)> = state
        .players
        .values()
        .filter(|p| p.is_chaseable())
        .filter_map(|p| p.position.map(|pos| (p.id, pos)))
        .collect();

    let mut moves = Vec::new();
    for bot in state.bots.values_mut().filter(|b| b.alive) {
        match nearest_target(&bot.position, candidates.iter().copied()) {
            Some(choice) => {
                bot.target = Some(choice.player);
                moves.push(HostCommand::MoveToward { bot: bot.id, position: choice.position });
            }
            None => bot.target = None,
        }
    }

    let issued = moves.len();
    for cmd in moves {
        state.push_command(cmd);
    }
    issued
}
