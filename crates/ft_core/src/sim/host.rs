//! Headless host: flat floor, straight-line kinematics, no physics.
//!
//! Each frame the runners pick a velocity (flee the closest bot inside the
//! danger radius, else walk to the closest frozen teammate, else wander),
//! bots walk toward the last `MoveToward` goal, and every touch inside the
//! contact radius is reported back as an [`ActivityEvent`].

use std::collections::BTreeMap;

use nalgebra::{distance, Vector3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{ActivityEvent, ArenaMap, HostCommand};
use crate::models::{ActorRef, BotId, PlayerId, Position, TeamId};

use super::steering::{arrive, clamp_to_arena, flee, seek};
use super::{SimConfig, TeamRoster};

/// Wander goals closer than this count as reached
const WANDER_REACHED: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SandboxRunner {
    pub id: PlayerId,
    pub team: TeamId,
    pub position: Position,
    pub movement_enabled: bool,
    wander_goal: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SandboxBot {
    pub id: BotId,
    pub kind: String,
    pub position: Position,
    pub goal: Option<Position>,
}

pub struct HeadlessHost {
    config: SimConfig,
    half_extents: (f32, f32),
    rng: ChaCha8Rng,
    runners: BTreeMap<PlayerId, SandboxRunner>,
    bots: BTreeMap<BotId, SandboxBot>,
    notifications: Vec<String>,
}

fn random_point(rng: &mut ChaCha8Rng, (hx, hz): (f32, f32)) -> Position {
    let x = if hx > 0.0 { rng.gen_range(-hx..hx) } else { 0.0 };
    let z = if hz > 0.0 { rng.gen_range(-hz..hz) } else { 0.0 };
    Position::new(x, 0.0, z)
}

impl HeadlessHost {
    pub fn new(arena: &ArenaMap, config: SimConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            half_extents: arena.half_extents,
            rng,
            runners: BTreeMap::new(),
            bots: BTreeMap::new(),
            notifications: Vec::new(),
        }
    }

    pub fn runners(&self) -> impl Iterator<Item = &SandboxRunner> {
        self.runners.values()
    }

    pub fn bots(&self) -> impl Iterator<Item = &SandboxBot> {
        self.bots.values()
    }

    /// Notification lines received so far, in order
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Join and spawn every roster member. Player ids are assigned from 1 in
    /// roster order.
    pub fn populate(&mut self, rosters: &[TeamRoster]) -> Vec<ActivityEvent> {
        let mut events = Vec::new();
        let mut next_id = self.runners.keys().last().map_or(1, |id| id.0 + 1);
        for roster in rosters {
            for name in &roster.players {
                let id = PlayerId(next_id);
                next_id += 1;
                let position = random_point(&mut self.rng, self.half_extents);
                self.runners.insert(
                    id,
                    SandboxRunner {
                        id,
                        team: roster.team.id,
                        position,
                        movement_enabled: true,
                        wander_goal: None,
                    },
                );
                events.push(ActivityEvent::PlayerJoined {
                    player: id,
                    name: name.clone(),
                    team: roster.team.id,
                });
                events.push(ActivityEvent::PlayerSpawned { player: id, position });
            }
        }
        events
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        for command in commands {
            match command {
                HostCommand::SpawnBot { bot, kind, position } => {
                    self.bots.insert(bot, SandboxBot { id: bot, kind, position, goal: None });
                }
                HostCommand::SetMovementEnabled { actor: ActorRef::Player(id), enabled } => {
                    if let Some(runner) = self.runners.get_mut(&id) {
                        runner.movement_enabled = enabled;
                    }
                }
                HostCommand::StopMotion { actor } => match actor {
                    ActorRef::Player(id) => {
                        if let Some(runner) = self.runners.get_mut(&id) {
                            runner.wander_goal = None;
                        }
                    }
                    ActorRef::Bot(id) => {
                        if let Some(bot) = self.bots.get_mut(&id) {
                            bot.goal = None;
                        }
                    }
                },
                HostCommand::MoveToward { bot, position } => {
                    if let Some(b) = self.bots.get_mut(&bot) {
                        b.goal = Some(position);
                    }
                }
                HostCommand::Notify { text, .. } => {
                    log::debug!("notify: {}", text);
                    self.notifications.push(text);
                }
                // No combat or damage in the sandbox
                HostCommand::SetMovementEnabled { .. }
                | HostCommand::SetAttackEnabled { .. }
                | HostCommand::SetInvulnerable { .. }
                | HostCommand::EndRound { .. } => {}
            }
        }
    }

    /// Move everything by `dt_ms` and report positions and contacts.
    pub fn step(&mut self, dt_ms: u64) -> Vec<ActivityEvent> {
        let dt = dt_ms as f32 / 1000.0;
        self.move_runners(dt);
        self.move_bots(dt);

        let mut events = Vec::new();
        for runner in self.runners.values().filter(|r| r.movement_enabled) {
            events.push(ActivityEvent::PlayerMoved { player: runner.id, position: runner.position });
        }
        for bot in self.bots.values() {
            events.push(ActivityEvent::BotMoved { bot: bot.id, position: bot.position });
        }
        self.collect_contacts(&mut events);
        events
    }

    fn move_runners(&mut self, dt: f32) {
        let cfg = self.config;
        let bot_positions: Vec<Position> = self.bots.values().map(|b| b.position).collect();
        let frozen: Vec<(TeamId, Position)> = self
            .runners
            .values()
            .filter(|r| !r.movement_enabled)
            .map(|r| (r.team, r.position))
            .collect();

        for runner in self.runners.values_mut().filter(|r| r.movement_enabled) {
            let here = runner.position;
            let threat = bot_positions
                .iter()
                .map(|b| (distance(&here, b), *b))
                .filter(|(d, _)| *d <= cfg.danger_radius)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            let rescue = frozen
                .iter()
                .filter(|(team, _)| *team == runner.team)
                .map(|(_, p)| (distance(&here, p), *p))
                .min_by(|a, b| a.0.total_cmp(&b.0));

            let velocity: Vector3<f32> = if let Some((_, bot)) = threat {
                flee(&here, &bot, cfg.runner_speed)
            } else if let Some((_, mate)) = rescue {
                arrive(&here, &mate, cfg.runner_speed, cfg.contact_radius)
            } else {
                let goal = match runner.wander_goal {
                    Some(goal) if distance(&here, &goal) > WANDER_REACHED => goal,
                    _ => random_point(&mut self.rng, self.half_extents),
                };
                runner.wander_goal = Some(goal);
                seek(&here, &goal, cfg.runner_speed * 0.5)
            };

            runner.position = clamp_to_arena(&(here + velocity * dt), self.half_extents);
        }
    }

    fn move_bots(&mut self, dt: f32) {
        let speed = self.config.bot_speed;
        for bot in self.bots.values_mut() {
            let Some(goal) = bot.goal else {
                continue;
            };
            let step = speed * dt;
            if distance(&bot.position, &goal) <= step {
                bot.position = goal;
            } else {
                bot.position += seek(&bot.position, &goal, speed) * dt;
            }
        }
    }

    fn collect_contacts(&self, events: &mut Vec<ActivityEvent>) {
        let radius = self.config.contact_radius;
        for bot in self.bots.values() {
            for runner in self.runners.values().filter(|r| r.movement_enabled) {
                if distance(&bot.position, &runner.position) <= radius {
                    events.push(ActivityEvent::BotContact { bot: bot.id, player: runner.id });
                }
            }
        }

        for mobile in self.runners.values().filter(|r| r.movement_enabled) {
            for frozen in self.runners.values().filter(|r| !r.movement_enabled) {
                if mobile.team == frozen.team
                    && distance(&mobile.position, &frozen.position) <= radius
                {
                    events.push(ActivityEvent::PlayerContact {
                        toucher: mobile.id,
                        target: frozen.id,
                    });
                }
            }
        }
    }
}
