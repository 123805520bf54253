//! Frozen Tag Activity
//!
//! Round lifecycle on top of [`RoundState`]. The host drives everything:
//!
//! ```text
//!   host                               FrozenTagActivity
//!   ────                               ─────────────────
//!   new(config, settings, map, teams)  validate, build RoundState
//!   handle(PlayerJoined ..)            roster before start
//!   start()                            spawn bots, disable punching, arm timers
//!   handle(BotContact / PlayerContact) freeze / thaw
//!   advance_ms(dt)                     update ticks (retarget + win check), deadline
//!   drain_commands()                   HostCommand list to apply
//!   result()                           RoundResult once Ended
//! ```
//!
//! Only one round runs per activity. After `Ended`, every call is a no-op.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ActivityConfig, RoundSettings};
use crate::error::{FrozenTagError, Result};
use crate::models::{
    Bot, BotId, EndReason, Player, PlayerId, Position, RoundEventKind, RoundOutcome, RoundResult,
    Team, TeamId, TeamStanding,
};
use crate::notify::Notifier;

use super::commands::HostCommand;
use super::events::ActivityEvent;
use super::freeze::{self, FreezeOutcome, ThawOutcome};
use super::info::{ActivityInfo, ArenaMap, MapCatalog};
use super::state::{RoundRules, RoundState};
use super::targeting;
use super::timer::{CountdownTimer, RepeatingTimer};
use super::win;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityPhase {
    Waiting,
    Running,
    Ended,
}

pub struct FrozenTagActivity {
    config: ActivityConfig,
    settings: RoundSettings,
    map: ArenaMap,
    phase: ActivityPhase,
    state: RoundState,
    round_timer: CountdownTimer,
    update_timer: RepeatingTimer,
    rng: ChaCha8Rng,
    next_bot_id: u32,
    /// Sub-millisecond remainder from `advance(dt_secs)`
    carry_ms: f64,
    round_id: Uuid,
    started_at: DateTime<Utc>,
    result: Option<RoundResult>,
}

impl FrozenTagActivity {
    /// Registration info against the builtin map catalog
    pub fn info() -> ActivityInfo {
        ActivityInfo::for_catalog(MapCatalog::builtin())
    }

    /// Build a round. `seed` drives bot spawn point selection.
    pub fn new(
        config: ActivityConfig,
        settings: RoundSettings,
        map: ArenaMap,
        teams: Vec<Team>,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        settings.validate_settings()?;
        if teams.is_empty() {
            return Err(FrozenTagError::NoTeams);
        }
        for (i, team) in teams.iter().enumerate() {
            if teams[..i].iter().any(|t| t.id == team.id) {
                return Err(FrozenTagError::DuplicateTeam(team.id.0));
            }
        }
        if map.spawn_points.is_empty() {
            return Err(FrozenTagError::NoSpawnPoints { map: map.name.clone() });
        }

        let notifier = Notifier::new(&config.locale)?;
        let rules = RoundRules {
            attacks_enabled: !settings.disable_attacks,
            freeze_policy: config.freeze.policy,
        };

        Ok(Self {
            round_timer: CountdownTimer::new(settings.round_length_ms()),
            update_timer: RepeatingTimer::new(config.timing.update_interval_ms),
            state: RoundState::new(teams, rules, notifier),
            config,
            settings,
            map,
            phase: ActivityPhase::Waiting,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_bot_id: 0,
            carry_ms: 0.0,
            round_id: Uuid::new_v4(),
            started_at: Utc::now(),
            result: None,
        })
    }

    pub fn phase(&self) -> ActivityPhase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn map(&self) -> &ArenaMap {
        &self.map
    }

    pub fn now_ms(&self) -> u64 {
        self.state.now_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.round_timer.remaining_ms(self.state.now_ms)
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        self.state.drain_commands()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin the round: spawn freezers, disable punching, arm the clock.
    pub fn start(&mut self) -> Result<()> {
        self.expect_phase(ActivityPhase::Waiting)?;

        self.started_at = Utc::now();
        self.state.now_ms = 0;
        self.phase = ActivityPhase::Running;

        let bot_count = self.config.bots.bot_count(self.state.players.len());
        self.state.record(RoundEventKind::RoundStarted {
            bots: bot_count,
            round_length_ms: self.settings.round_length_ms(),
        });
        for _ in 0..bot_count {
            self.spawn_bot();
        }

        let player_ids: Vec<PlayerId> = self.state.players.keys().copied().collect();
        for id in player_ids {
            self.apply_baseline(id);
        }

        let note = self.state.notifier().round_start(self.settings.round_length_secs);
        self.state.notify(note);

        log::info!(
            "Frozen Tag round {} started on '{}': {} players, {} bots, {}s",
            self.round_id,
            self.map.name,
            self.state.players.len(),
            bot_count,
            self.settings.round_length_secs
        );
        Ok(())
    }

    /// End the round early (host teardown or manual stop).
    ///
    /// Only `Aborted` (never a winner) and `Timeout` (resolved as if the
    /// clock ran out) are accepted; the other reasons come from the tick.
    pub fn end(&mut self, reason: EndReason) -> Result<&RoundResult> {
        self.expect_phase(ActivityPhase::Running)?;
        let (outcome, reason) = match reason {
            EndReason::Aborted => (RoundOutcome::NoWinner, EndReason::Aborted),
            EndReason::Timeout => win::decide_on_timeout(&self.state),
            EndReason::LastTeamStanding | EndReason::AllFrozen => {
                return Err(FrozenTagError::InvalidSetting {
                    name: "reason",
                    reason: format!("{:?} is decided by the round, not the host", reason),
                });
            }
        };
        self.finish(outcome, reason);
        self.result.as_ref().ok_or(FrozenTagError::InvalidPhase {
            expected: ActivityPhase::Ended,
            found: self.phase,
        })
    }

    // =========================================================================
    // Host messages
    // =========================================================================

    pub fn handle(&mut self, event: ActivityEvent) {
        if self.phase == ActivityPhase::Ended {
            return;
        }
        log::trace!("event {} at {}ms", event.kind(), self.state.now_ms);

        match event {
            ActivityEvent::PlayerJoined { player, name, team } => {
                self.on_player_joined(player, name, team)
            }
            ActivityEvent::PlayerLeft { player } => self.on_player_left(player),
            ActivityEvent::PlayerSpawned { player, position } => {
                self.on_player_spawned(player, position)
            }
            ActivityEvent::PlayerDied { player } => self.on_player_died(player),
            ActivityEvent::PlayerMoved { player, position } => {
                self.on_player_moved(player, position)
            }
            ActivityEvent::BotMoved { bot, position } => self.on_bot_moved(bot, position),
            ActivityEvent::BotDied { bot } => self.on_bot_died(bot),
            ActivityEvent::BotContact { bot, player } => {
                self.on_bot_contact(bot, player);
            }
            ActivityEvent::PlayerContact { toucher, target } => {
                self.on_player_contact(toucher, target);
            }
        }
    }

    fn on_player_joined(&mut self, id: PlayerId, name: String, team: TeamId) {
        if self.state.team(team).is_none() {
            log::debug!("{} joined unknown {}; ignored", id, team);
            return;
        }
        if self.state.players.contains_key(&id) {
            return;
        }
        let mut player = Player::new(id, name, team);
        player.capabilities.attack = self.state.rules.attacks_enabled;
        self.state.players.insert(id, player);
        if self.phase == ActivityPhase::Running {
            self.state.record(RoundEventKind::PlayerJoined { player: id, team });
        }
    }

    fn on_player_left(&mut self, id: PlayerId) {
        if self.state.players.remove(&id).is_none() {
            return;
        }
        for bot in self.state.bots.values_mut() {
            if bot.target == Some(id) {
                bot.target = None;
            }
        }
        if self.phase == ActivityPhase::Running {
            self.state.record(RoundEventKind::PlayerLeft { player: id });
        }
    }

    fn on_player_spawned(&mut self, id: PlayerId, position: Position) {
        let Some(player) = self.state.players.get_mut(&id) else {
            return;
        };
        player.spawned = true;
        player.position = Some(position);
        if self.phase == ActivityPhase::Running {
            freeze::sync_capabilities(&mut self.state, id);
        }
    }

    fn on_player_died(&mut self, id: PlayerId) {
        if let Some(player) = self.state.players.get_mut(&id) {
            player.spawned = false;
            player.position = None;
        }
    }

    fn on_player_moved(&mut self, id: PlayerId, position: Position) {
        if let Some(player) = self.state.players.get_mut(&id) {
            if player.spawned {
                player.position = Some(position);
            }
        }
    }

    fn on_bot_moved(&mut self, id: BotId, position: Position) {
        if let Some(bot) = self.state.bots.get_mut(&id) {
            if bot.alive {
                bot.position = position;
            }
        }
    }

    fn on_bot_died(&mut self, id: BotId) {
        let Some(bot) = self.state.bots.get_mut(&id) else {
            return;
        };
        if !bot.alive {
            return;
        }
        bot.alive = false;
        bot.target = None;
        self.state.record(RoundEventKind::BotLost { bot: id });
        log::debug!("{} lost at {}ms", id, self.state.now_ms);
    }

    fn on_bot_contact(&mut self, bot: BotId, player: PlayerId) -> Option<FreezeOutcome> {
        if self.phase != ActivityPhase::Running {
            return None;
        }
        if !self.state.bots.get(&bot).is_some_and(|b| b.alive) {
            return None;
        }
        Some(freeze::freeze(&mut self.state, player, bot))
    }

    fn on_player_contact(&mut self, toucher: PlayerId, target: PlayerId) -> Option<ThawOutcome> {
        if self.phase != ActivityPhase::Running {
            return None;
        }
        Some(freeze::resolve_contact(&mut self.state, toucher, target))
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Advance by a host frame delta in seconds.
    pub fn advance(&mut self, dt_secs: f32) {
        if self.phase != ActivityPhase::Running {
            return;
        }
        let total = self.carry_ms + (dt_secs.max(0.0) as f64) * 1000.0;
        let whole = total.floor();
        self.carry_ms = total - whole;
        self.advance_ms(whole as u64);
    }

    /// Advance the round clock, firing every update tick due before the
    /// deadline in order, then the deadline itself.
    pub fn advance_ms(&mut self, dt_ms: u64) {
        if self.phase != ActivityPhase::Running {
            return;
        }
        let target_ms = self.state.now_ms.saturating_add(dt_ms);
        let deadline_ms = self.round_timer.deadline_ms();

        while self.update_timer.next_fire_ms() < deadline_ms {
            let Some(tick_ms) = self.update_timer.pop_due(target_ms) else {
                break;
            };
            self.state.now_ms = tick_ms;
            self.update_tick();
            if self.phase != ActivityPhase::Running {
                return;
            }
        }

        if self.round_timer.poll(target_ms) {
            self.state.now_ms = deadline_ms;
            let (outcome, reason) = win::decide_on_timeout(&self.state);
            self.finish(outcome, reason);
        } else {
            self.state.now_ms = target_ms;
        }
    }

    fn update_tick(&mut self) {
        freeze::expire_timed_freezes(&mut self.state);
        targeting::retarget_bots(&mut self.state);
        if let Some((outcome, reason)) = win::decide_on_tick(&self.state) {
            self.finish(outcome, reason);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn expect_phase(&self, expected: ActivityPhase) -> Result<()> {
        if self.phase != expected {
            return Err(FrozenTagError::InvalidPhase { expected, found: self.phase });
        }
        Ok(())
    }

    fn spawn_bot(&mut self) {
        let idx = self.rng.gen_range(0..self.map.spawn_points.len());
        let position = self.map.spawn_points[idx];
        let id = BotId(self.next_bot_id);
        self.next_bot_id += 1;

        let kind = self.config.bots.bot_kind.clone();
        self.state.bots.insert(id, Bot::new(id, kind.clone(), position));
        self.state.push_command(HostCommand::SpawnBot { bot: id, kind, position });
        self.state.record(RoundEventKind::BotSpawned { bot: id });
    }

    /// Round-start capabilities for an existing player.
    fn apply_baseline(&mut self, id: PlayerId) {
        let attacks_enabled = self.state.rules.attacks_enabled;
        if let Some(player) = self.state.players.get_mut(&id) {
            player.capabilities.attack = attacks_enabled && !player.frozen;
        }
        freeze::sync_capabilities(&mut self.state, id);
    }

    fn finish(&mut self, outcome: RoundOutcome, reason: EndReason) {
        if self.phase == ActivityPhase::Ended {
            return;
        }
        self.phase = ActivityPhase::Ended;

        let note = match outcome {
            RoundOutcome::Winner(team) => {
                let name = self.state.team(team).map(|t| t.name.clone()).unwrap_or_default();
                self.state.notifier().team_wins(&name, self.state.team_color(team))
            }
            RoundOutcome::NoWinner => self.state.notifier().no_winner(reason),
        };
        self.state.notify(note);
        self.state.push_command(HostCommand::EndRound { outcome });
        self.state.record(RoundEventKind::RoundEnded { outcome, reason });

        let result = RoundResult {
            round_id: self.round_id,
            started_at: self.started_at,
            duration_ms: self.state.now_ms,
            outcome,
            reason,
            teams: self.standings(),
            events: self.state.take_events(),
        };
        log::info!(
            "Frozen Tag round {} ended after {}ms: {:?} ({:?})",
            self.round_id,
            result.duration_ms,
            outcome,
            reason
        );
        self.result = Some(result);
    }

    fn standings(&self) -> Vec<TeamStanding> {
        self.state
            .teams
            .iter()
            .map(|team| {
                let members: Vec<&Player> = self.state.members(team.id).collect();
                TeamStanding {
                    team: team.id,
                    name: team.name.clone(),
                    members: members.len() as u32,
                    unfrozen: members.iter().filter(|p| !p.frozen).count() as u32,
                    times_frozen: members.iter().map(|p| p.stats.times_frozen).sum(),
                    thaws: members.iter().map(|p| p.stats.thaws_given).sum(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FreezePolicy;
    use crate::models::ActorRef;

    fn arena() -> ArenaMap {
        MapCatalog::builtin().get("Frost Plaza").cloned().unwrap()
    }

    fn teams() -> Vec<Team> {
        vec![Team::new(TeamId(0), "Red"), Team::new(TeamId(1), "Blue")]
    }

    /// Two teams of two, all spawned; round not started.
    fn lobby(settings: RoundSettings, config: ActivityConfig) -> FrozenTagActivity {
        let mut activity = FrozenTagActivity::new(config, settings, arena(), teams(), 7).unwrap();
        for (id, team) in [(1, 0), (2, 0), (3, 1), (4, 1)] {
            activity.handle(ActivityEvent::PlayerJoined {
                player: PlayerId(id),
                name: format!("P{id}"),
                team: TeamId(team),
            });
            activity.handle(ActivityEvent::PlayerSpawned {
                player: PlayerId(id),
                position: Position::new(id as f32, 0.0, 0.0),
            });
        }
        activity
    }

    fn running() -> FrozenTagActivity {
        let mut a = lobby(RoundSettings::default(), ActivityConfig::default());
        a.start().unwrap();
        a.drain_commands();
        a
    }

    fn tag(a: &mut FrozenTagActivity, player: u32) {
        a.handle(ActivityEvent::BotContact { bot: BotId(0), player: PlayerId(player) });
    }

    #[test]
    fn test_new_rejects_bad_setup() {
        let bad = RoundSettings::with_round_length(10);
        assert!(FrozenTagActivity::new(ActivityConfig::default(), bad, arena(), teams(), 0).is_err());

        let err = FrozenTagActivity::new(
            ActivityConfig::default(),
            RoundSettings::default(),
            arena(),
            vec![],
            0,
        )
        .err()
        .unwrap();
        assert!(matches!(err, FrozenTagError::NoTeams));

        let mut empty_map = arena();
        empty_map.spawn_points.clear();
        assert!(matches!(
            FrozenTagActivity::new(
                ActivityConfig::default(),
                RoundSettings::default(),
                empty_map,
                teams(),
                0
            ),
            Err(FrozenTagError::NoSpawnPoints { .. })
        ));

        let dup = vec![Team::new(TeamId(0), "A"), Team::new(TeamId(0), "B")];
        assert!(matches!(
            FrozenTagActivity::new(ActivityConfig::default(), RoundSettings::default(), arena(), dup, 0),
            Err(FrozenTagError::DuplicateTeam(0))
        ));
    }

    #[test]
    fn test_start_spawns_bots_and_disables_punching() {
        let mut a = lobby(RoundSettings::default(), ActivityConfig::default());
        assert!(a.state().players.values().all(|p| !p.frozen));
        a.start().unwrap();
        assert_eq!(a.phase(), ActivityPhase::Running);
        assert_eq!(a.state().bots.len(), 1, "4 players -> 1 bot");

        let cmds = a.drain_commands();
        assert!(cmds.iter().any(|c| matches!(c, HostCommand::SpawnBot { .. })));
        for id in 1..=4 {
            let actor = ActorRef::Player(PlayerId(id));
            assert!(cmds.contains(&HostCommand::SetAttackEnabled { actor, enabled: false }));
        }
        assert!(a.start().is_err(), "only one round per activity");
    }

    #[test]
    fn test_punching_left_alone_when_allowed() {
        let settings = RoundSettings { disable_attacks: false, ..RoundSettings::default() };
        let mut a = lobby(settings, ActivityConfig::default());
        a.start().unwrap();
        assert!(!a
            .drain_commands()
            .iter()
            .any(|c| matches!(c, HostCommand::SetAttackEnabled { .. })));
    }

    #[test]
    fn test_late_joiner_gets_punching_disabled() {
        let mut a = running();
        a.handle(ActivityEvent::PlayerJoined {
            player: PlayerId(9),
            name: "Late".into(),
            team: TeamId(0),
        });
        a.handle(ActivityEvent::PlayerSpawned { player: PlayerId(9), position: Position::origin() });
        let actor = ActorRef::Player(PlayerId(9));
        assert!(a
            .drain_commands()
            .contains(&HostCommand::SetAttackEnabled { actor, enabled: false }));
        assert!(!a.state().players[&PlayerId(9)].frozen);
    }

    #[test]
    fn test_contacts_ignored_before_start() {
        let mut a = lobby(RoundSettings::default(), ActivityConfig::default());
        tag(&mut a, 1);
        assert!(!a.state().players[&PlayerId(1)].frozen);
    }

    #[test]
    fn test_last_team_standing_ends_on_next_tick() {
        let mut a = running();
        tag(&mut a, 3);
        tag(&mut a, 4);
        assert_eq!(a.phase(), ActivityPhase::Running, "win is checked on the update tick");

        a.advance_ms(500);
        assert_eq!(a.phase(), ActivityPhase::Ended);
        let result = a.result().unwrap();
        assert_eq!(result.outcome, RoundOutcome::Winner(TeamId(0)));
        assert_eq!(result.reason, EndReason::LastTeamStanding);
        assert_eq!(result.duration_ms, 500);
        assert!(a
            .drain_commands()
            .contains(&HostCommand::EndRound { outcome: RoundOutcome::Winner(TeamId(0)) }));
    }

    #[test]
    fn test_thaw_keeps_round_alive() {
        let mut a = running();
        tag(&mut a, 3);
        a.handle(ActivityEvent::PlayerContact { toucher: PlayerId(4), target: PlayerId(3) });
        tag(&mut a, 1);
        a.advance_ms(2000);
        assert_eq!(a.phase(), ActivityPhase::Running);
        assert!(!a.state().players[&PlayerId(3)].frozen);
    }

    #[test]
    fn test_everyone_frozen_is_no_winner() {
        let mut a = running();
        for id in 1..=4 {
            tag(&mut a, id);
        }
        a.advance_ms(500);
        let result = a.result().unwrap();
        assert_eq!(result.outcome, RoundOutcome::NoWinner);
        assert_eq!(result.reason, EndReason::AllFrozen);
    }

    #[test]
    fn test_timeout_with_two_alive_teams() {
        let mut a = running();
        tag(&mut a, 1);
        a.advance_ms(89_999);
        assert_eq!(a.phase(), ActivityPhase::Running);
        assert_eq!(a.remaining_ms(), 1);
        a.advance_ms(1);
        let result = a.result().unwrap();
        assert_eq!(result.outcome, RoundOutcome::NoWinner);
        assert_eq!(result.reason, EndReason::Timeout);
        assert_eq!(result.duration_ms, 90_000);
    }

    #[test]
    fn test_large_step_stops_at_deadline() {
        let mut a = running();
        a.advance_ms(10 * 60 * 1000);
        assert_eq!(a.now_ms(), 90_000);
        assert_eq!(a.result().unwrap().reason, EndReason::Timeout);
    }

    #[test]
    fn test_tick_inside_large_step_can_end_round_early() {
        let mut a = running();
        tag(&mut a, 1);
        tag(&mut a, 2);
        a.advance_ms(60_000);
        let result = a.result().unwrap();
        assert_eq!(result.reason, EndReason::LastTeamStanding);
        assert_eq!(result.duration_ms, 500);
    }

    #[test]
    fn test_frame_deltas_accumulate_exactly() {
        let mut a = running();
        for _ in 0..60 {
            a.advance(1.0 / 60.0);
        }
        assert!((999..=1000).contains(&a.now_ms()));
    }

    #[test]
    fn test_ended_round_ignores_everything() {
        let mut a = running();
        a.end(EndReason::Aborted).unwrap();
        a.drain_commands();

        tag(&mut a, 1);
        a.advance_ms(1000);
        assert!(!a.state().players[&PlayerId(1)].frozen);
        assert!(a.drain_commands().is_empty());
        assert!(a.end(EndReason::Aborted).is_err());
        assert_eq!(a.result().unwrap().outcome, RoundOutcome::NoWinner);
    }

    #[test]
    fn test_end_rejects_tick_only_reasons() {
        let mut a = running();
        tag(&mut a, 3);
        for reason in [EndReason::LastTeamStanding, EndReason::AllFrozen] {
            assert!(matches!(a.end(reason), Err(FrozenTagError::InvalidSetting { .. })));
        }
        assert_eq!(a.phase(), ActivityPhase::Running);

        let result = a.end(EndReason::Timeout).unwrap();
        assert_eq!(result.outcome, RoundOutcome::NoWinner);
        assert_eq!(result.reason, EndReason::Timeout);
    }

    #[test]
    fn test_all_frozen_notification_names_cause() {
        let mut a = running();
        for id in 1..=4 {
            tag(&mut a, id);
        }
        a.drain_commands();
        a.advance_ms(500);
        let texts: Vec<String> = a
            .drain_commands()
            .into_iter()
            .filter_map(|c| match c {
                HostCommand::Notify { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Everyone is frozen. Nobody wins.".to_string()]);
    }

    #[test]
    fn test_single_team_with_mobile_runner_wins_on_tick() {
        let teams = vec![Team::new(TeamId(0), "Solo")];
        let mut a = FrozenTagActivity::new(
            ActivityConfig::default(),
            RoundSettings::default(),
            arena(),
            teams,
            3,
        )
        .unwrap();
        a.handle(ActivityEvent::PlayerJoined {
            player: PlayerId(1),
            name: "Only".into(),
            team: TeamId(0),
        });
        a.handle(ActivityEvent::PlayerSpawned { player: PlayerId(1), position: Position::origin() });
        a.start().unwrap();

        a.advance_ms(5_000);
        assert_eq!(a.phase(), ActivityPhase::Ended);
        let result = a.result().unwrap();
        assert_eq!(result.outcome, RoundOutcome::Winner(TeamId(0)));
        assert_eq!(result.reason, EndReason::LastTeamStanding);
        assert_eq!(result.duration_ms, 500);
    }

    #[test]
    fn test_bots_chase_nearest_on_tick() {
        let mut a = running();
        a.handle(ActivityEvent::BotMoved { bot: BotId(0), position: Position::origin() });
        a.advance_ms(500);
        let cmds = a.drain_commands();
        assert!(cmds.contains(&HostCommand::MoveToward {
            bot: BotId(0),
            position: Position::new(1.0, 0.0, 0.0)
        }));
    }

    #[test]
    fn test_dead_bot_cannot_freeze() {
        let mut a = running();
        a.handle(ActivityEvent::BotDied { bot: BotId(0) });
        tag(&mut a, 1);
        assert!(!a.state().players[&PlayerId(1)].frozen);
        a.handle(ActivityEvent::BotContact { bot: BotId(99), player: PlayerId(1) });
        assert!(!a.state().players[&PlayerId(1)].frozen);
    }

    #[test]
    fn test_leaving_players_can_decide_round() {
        let mut a = running();
        a.handle(ActivityEvent::PlayerLeft { player: PlayerId(3) });
        a.handle(ActivityEvent::PlayerLeft { player: PlayerId(4) });
        a.advance_ms(500);
        assert_eq!(a.result().unwrap().winner(), Some(TeamId(0)));
    }

    #[test]
    fn test_freeze_survives_respawn() {
        let mut a = running();
        tag(&mut a, 1);
        a.handle(ActivityEvent::PlayerDied { player: PlayerId(1) });
        a.handle(ActivityEvent::PlayerSpawned { player: PlayerId(1), position: Position::origin() });
        assert!(a.state().players[&PlayerId(1)].frozen);
        let actor = ActorRef::Player(PlayerId(1));
        assert!(a
            .drain_commands()
            .contains(&HostCommand::SetMovementEnabled { actor, enabled: false }));
    }

    #[test]
    fn test_timed_policy_thaws_on_tick() {
        let mut config = ActivityConfig::default();
        config.freeze.policy = FreezePolicy::Timed { thaw_after_secs: 2 };
        let mut a = lobby(RoundSettings::default(), config);
        a.start().unwrap();
        tag(&mut a, 1);
        a.advance_ms(1500);
        assert!(a.state().players[&PlayerId(1)].frozen);
        a.advance_ms(500);
        assert!(!a.state().players[&PlayerId(1)].frozen);
    }

    #[test]
    fn test_result_standings_and_log() {
        let mut a = running();
        tag(&mut a, 3);
        a.handle(ActivityEvent::PlayerContact { toucher: PlayerId(3), target: PlayerId(4) });
        a.handle(ActivityEvent::PlayerContact { toucher: PlayerId(4), target: PlayerId(3) });
        let result = a.end(EndReason::Timeout).unwrap();

        let blue = result.teams.iter().find(|s| s.team == TeamId(1)).unwrap();
        assert_eq!(blue.times_frozen, 1);
        assert_eq!(blue.thaws, 1);
        assert_eq!(result.count_events(|k| matches!(k, RoundEventKind::Thawed { .. })), 1);
        assert!(matches!(
            result.events.first().map(|e| &e.kind),
            Some(RoundEventKind::RoundStarted { bots: 1, .. })
        ));
    }

    #[test]
    fn test_info_lists_round_length_setting() {
        let info = FrozenTagActivity::info();
        assert_eq!(info.settings[0].key(), "round_length_secs");
    }
}
