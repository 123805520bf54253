//! Round State
//!
//! The single mutable object every handler and timer callback receives.
//! Nothing in the engine keeps rosters or queues in globals; whoever owns a
//! `RoundState` owns the round.

use std::collections::BTreeMap;

use crate::config::FreezePolicy;
use crate::models::{
    Bot, BotId, Color, Player, PlayerId, RoundEvent, RoundEventKind, Team, TeamId,
};
use crate::notify::{Notification, Notifier};

use super::commands::{CommandQueue, HostCommand};

/// Rules fixed for the lifetime of a round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRules {
    pub attacks_enabled: bool,
    pub freeze_policy: FreezePolicy,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self { attacks_enabled: false, freeze_policy: FreezePolicy::UntilThawed }
    }
}

pub struct RoundState {
    /// Registration order; used for standings
    pub teams: Vec<Team>,
    pub players: BTreeMap<PlayerId, Player>,
    pub bots: BTreeMap<BotId, Bot>,
    pub rules: RoundRules,
    /// Milliseconds since round start
    pub now_ms: u64,
    commands: CommandQueue,
    events: Vec<RoundEvent>,
    notifier: Notifier,
}

impl RoundState {
    pub fn new(teams: Vec<Team>, rules: RoundRules, notifier: Notifier) -> Self {
        Self {
            teams,
            players: BTreeMap::new(),
            bots: BTreeMap::new(),
            rules,
            now_ms: 0,
            commands: CommandQueue::default(),
            events: Vec::new(),
            notifier,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_color(&self, id: TeamId) -> Color {
        self.team(id).map(|t| t.color).unwrap_or(crate::notify::NEUTRAL_COLOR)
    }

    pub fn members(&self, team: TeamId) -> impl Iterator<Item = &Player> {
        self.players.values().filter(move |p| p.team == team)
    }

    pub fn live_bots(&self) -> impl Iterator<Item = &Bot> {
        self.bots.values().filter(|b| b.alive)
    }

    pub fn frozen_count(&self) -> usize {
        self.players.values().filter(|p| p.frozen).count()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn push_command(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    pub fn notify(&mut self, note: Notification) {
        self.commands.push(HostCommand::Notify { text: note.text, color: note.color });
    }

    pub fn pending_commands(&self) -> &CommandQueue {
        &self.commands
    }

    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        self.commands.drain()
    }

    pub fn record(&mut self, kind: RoundEventKind) {
        self.events.push(RoundEvent { timestamp_ms: self.now_ms, kind });
    }

    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub(crate) fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::Position;

    /// Two teams (0 = "Red", 1 = "Blue"), English notifications.
    pub fn two_team_state() -> RoundState {
        let teams = vec![
            Team::new(TeamId(0), "Red").with_color((1.0, 0.2, 0.2)),
            Team::new(TeamId(1), "Blue").with_color((0.2, 0.2, 1.0)),
        ];
        RoundState::new(teams, RoundRules::default(), Notifier::new("en-US").unwrap())
    }

    /// Spawned player at `pos`
    pub fn add_player(state: &mut RoundState, id: u32, team: u32, pos: (f32, f32, f32)) {
        let mut player = Player::new(PlayerId(id), format!("P{id}"), TeamId(team));
        player.spawned = true;
        player.position = Some(Position::new(pos.0, pos.1, pos.2));
        player.capabilities.attack = state.rules.attacks_enabled;
        state.players.insert(player.id, player);
    }

    pub fn add_bot(state: &mut RoundState, id: u32, pos: (f32, f32, f32)) {
        let bot = Bot::new(BotId(id), "soldier", Position::new(pos.0, pos.1, pos.2));
        state.bots.insert(bot.id, bot);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_members_filter_by_team() {
        let mut state = two_team_state();
        add_player(&mut state, 1, 0, (0.0, 0.0, 0.0));
        add_player(&mut state, 2, 1, (0.0, 0.0, 0.0));
        add_player(&mut state, 3, 0, (0.0, 0.0, 0.0));
        let red: Vec<_> = state.members(TeamId(0)).map(|p| p.id).collect();
        assert_eq!(red, vec![PlayerId(1), PlayerId(3)]);
    }

    #[test]
    fn test_record_uses_round_clock() {
        let mut state = two_team_state();
        state.now_ms = 2500;
        state.record(RoundEventKind::PlayerLeft { player: PlayerId(9) });
        assert_eq!(state.events()[0].timestamp_ms, 2500);
    }

    #[test]
    fn test_unknown_team_color_is_neutral() {
        let state = two_team_state();
        assert_eq!(state.team_color(TeamId(7)), crate::notify::NEUTRAL_COLOR);
        assert_eq!(state.team_color(TeamId(1)), (0.2, 0.2, 1.0));
    }
}
