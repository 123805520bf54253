//! Freeze Tracker
//!
//! `freeze` / `unfreeze` are the only writers of `Player::frozen`.
//!
//! ## Rules
//! - freeze: no-op when already frozen or when the player has no live avatar
//! - unfreeze(toucher, target): toucher must be live and unfrozen, target
//!   frozen, both on the same team; anything else is a silent no-op
//! - a thaw restores the round's baseline capabilities, so attacks stay off
//!   when the round disabled punching

use crate::models::{ActorCapabilities, ActorRef, BotId, PlayerId, RoundEventKind};

use super::commands::HostCommand;
use super::state::RoundState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeOutcome {
    Frozen,
    AlreadyFrozen,
    UnknownPlayer,
    NotSpawned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThawOutcome {
    Thawed,
    UnknownPlayer,
    /// Toucher has no live avatar
    ToucherNotSpawned,
    ToucherFrozen,
    TargetNotFrozen,
    DifferentTeam,
    SelfTouch,
}

impl ThawOutcome {
    pub fn is_thawed(&self) -> bool {
        matches!(self, ThawOutcome::Thawed)
    }
}

/// Freeze `player` after a touch from `by`.
pub fn freeze(state: &mut RoundState, player: PlayerId, by: BotId) -> FreezeOutcome {
    let now_ms = state.now_ms;
    let Some(p) = state.players.get_mut(&player) else {
        return FreezeOutcome::UnknownPlayer;
    };
    if p.frozen {
        return FreezeOutcome::AlreadyFrozen;
    }
    if !p.spawned {
        return FreezeOutcome::NotSpawned;
    }

    p.frozen = true;
    p.frozen_at_ms = Some(now_ms);
    p.capabilities = ActorCapabilities::frozen();
    p.stats.times_frozen += 1;
    let name = p.name.clone();

    let actor = ActorRef::Player(player);
    state.push_command(HostCommand::StopMotion { actor });
    state.push_command(HostCommand::SetMovementEnabled { actor, enabled: false });
    state.push_command(HostCommand::SetAttackEnabled { actor, enabled: false });
    state.push_command(HostCommand::SetInvulnerable { actor, invulnerable: true });
    let note = state.notifier().player_frozen(&name);
    state.notify(note);
    state.record(RoundEventKind::Frozen { player, by });

    log::debug!("{} frozen by {} at {}ms", player, by, now_ms);
    FreezeOutcome::Frozen
}

/// Thaw `target` on behalf of `toucher`.
pub fn unfreeze(state: &mut RoundState, toucher: PlayerId, target: PlayerId) -> ThawOutcome {
    if toucher == target {
        return ThawOutcome::SelfTouch;
    }
    let (Some(t), Some(f)) = (state.players.get(&toucher), state.players.get(&target)) else {
        return ThawOutcome::UnknownPlayer;
    };
    if !t.spawned {
        return ThawOutcome::ToucherNotSpawned;
    }
    if t.frozen {
        return ThawOutcome::ToucherFrozen;
    }
    if !f.frozen {
        return ThawOutcome::TargetNotFrozen;
    }
    if t.team != f.team {
        return ThawOutcome::DifferentTeam;
    }

    let toucher_name = t.name.clone();
    let team = f.team;
    let target_name = thaw(state, target);

    if let Some(t) = state.players.get_mut(&toucher) {
        t.stats.thaws_given += 1;
    }
    let note = state.notifier().player_thawed(&target_name, &toucher_name, state.team_color(team));
    state.notify(note);
    state.record(RoundEventKind::Thawed { player: target, by: toucher });

    log::debug!("{} thawed by {} at {}ms", target, toucher, state.now_ms);
    ThawOutcome::Thawed
}

/// Resolve a player/player touch in whichever direction can thaw.
pub fn resolve_contact(state: &mut RoundState, a: PlayerId, b: PlayerId) -> ThawOutcome {
    let a_frozen = state.players.get(&a).is_some_and(|p| p.frozen);
    let b_frozen = state.players.get(&b).is_some_and(|p| p.frozen);
    if a_frozen && !b_frozen {
        unfreeze(state, b, a)
    } else {
        unfreeze(state, a, b)
    }
}

/// Thaw every player whose timed freeze ran out. No-op under `UntilThawed`.
pub fn expire_timed_freezes(state: &mut RoundState) -> Vec<PlayerId> {
    let Some(limit_ms) = state.rules.freeze_policy.thaw_after_ms() else {
        return Vec::new();
    };
    let now_ms = state.now_ms;
    let expired: Vec<PlayerId> = state
        .players
        .values()
        .filter(|p| p.frozen && p.frozen_at_ms.is_some_and(|at| now_ms >= at + limit_ms))
        .map(|p| p.id)
        .collect();

    for &player in &expired {
        let Some(team) = state.players.get(&player).map(|p| p.team) else {
            continue;
        };
        let name = thaw(state, player);
        let note = state.notifier().player_auto_thawed(&name, state.team_color(team));
        state.notify(note);
        state.record(RoundEventKind::AutoThawed { player });
        log::debug!("{} auto-thawed at {}ms", player, now_ms);
    }
    expired
}

/// Re-send a player's capability flags after the host (re)creates its avatar.
pub fn sync_capabilities(state: &mut RoundState, player: PlayerId) {
    let Some(p) = state.players.get(&player) else {
        return;
    };
    if !p.spawned {
        return;
    }
    let caps = p.capabilities;
    let actor = ActorRef::Player(player);
    if !caps.attack {
        state.push_command(HostCommand::SetAttackEnabled { actor, enabled: false });
    }
    if !caps.movement {
        state.push_command(HostCommand::StopMotion { actor });
        state.push_command(HostCommand::SetMovementEnabled { actor, enabled: false });
    }
    if caps.invulnerable {
        state.push_command(HostCommand::SetInvulnerable { actor, invulnerable: true });
    }
}

/// Clear the flag and restore baseline capabilities; returns the player's name.
fn thaw(state: &mut RoundState, player: PlayerId) -> String {
    let attacks_enabled = state.rules.attacks_enabled;
    let Some(p) = state.players.get_mut(&player) else {
        return String::new();
    };
    p.frozen = false;
    p.frozen_at_ms = None;
    p.capabilities = ActorCapabilities::runner(attacks_enabled);
    let name = p.name.clone();

    if p.spawned {
        let actor = ActorRef::Player(player);
        state.push_command(HostCommand::SetMovementEnabled { actor, enabled: true });
        state.push_command(HostCommand::SetAttackEnabled { actor, enabled: attacks_enabled });
        state.push_command(HostCommand::SetInvulnerable { actor, invulnerable: false });
    }
    name
}
