//! Sandbox simulation
//!
//! Runs a full Frozen Tag round without a game engine: a [`HeadlessHost`]
//! stands in for the host, feeding [`ActivityEvent`]s to the activity and
//! applying the [`HostCommand`]s it returns, one fixed frame at a time.
//!
//! ```text
//!   populate ─▶ start ─▶ ┌─ host.step(frame) ─▶ handle(events)
//!                        │  advance_ms(frame)
//!                        └─ host.apply(drain_commands()) ◀─┘  until Ended
//! ```
//!
//! Both the activity and the host draw from seeded ChaCha8 streams, so the
//! same [`RoundSetup`] always produces the same
//! [`RoundResult::deterministic_view`].
//!
//! [`ActivityEvent`]: crate::engine::ActivityEvent
//! [`HostCommand`]: crate::engine::HostCommand

pub mod host;
pub mod steering;

pub use host::{HeadlessHost, SandboxBot, SandboxRunner};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ActivityConfig, RoundSettings};
use crate::engine::{ActivityPhase, ArenaMap, FrozenTagActivity};
use crate::error::{FrozenTagError, Result};
use crate::models::{Color, RoundResult, Team, TeamId};

/// Stream id for the host RNG, so host and activity never share draws
const HOST_RNG_STREAM: u64 = 1;

const TEAM_PALETTE: [(&str, Color); 4] = [
    ("Red", (1.0, 0.25, 0.25)),
    ("Blue", (0.25, 0.45, 1.0)),
    ("Green", (0.3, 0.9, 0.3)),
    ("Gold", (1.0, 0.8, 0.2)),
];

/// Sandbox tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed frame length
    pub frame_ms: u64,
    /// m/s
    pub runner_speed: f32,
    /// m/s
    pub bot_speed: f32,
    /// Touch distance for both freezing and thawing (m)
    pub contact_radius: f32,
    /// Runners flee bots closer than this (m)
    pub danger_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_ms: 100,
            runner_speed: 4.0,
            bot_speed: 5.0,
            contact_radius: 1.0,
            danger_radius: 4.0,
        }
    }
}

/// One team plus the display names of its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    #[serde(flatten)]
    pub team: Team,
    #[serde(default)]
    pub players: Vec<String>,
}

impl TeamRoster {
    /// `count` players named "<team> 1", "<team> 2", ...
    pub fn numbered(team: Team, count: usize) -> Self {
        let players = (1..=count).map(|i| format!("{} {}", team.name, i)).collect();
        Self { team, players }
    }
}

/// Up to four colored teams (cycling names past that) of equal size.
pub fn default_rosters(teams: usize, players_per_team: usize) -> Vec<TeamRoster> {
    (0..teams)
        .map(|i| {
            let (name, color) = TEAM_PALETTE[i % TEAM_PALETTE.len()];
            let name = if i < TEAM_PALETTE.len() {
                name.to_string()
            } else {
                format!("{} {}", name, i / TEAM_PALETTE.len() + 1)
            };
            let team = Team::new(TeamId(i as u32), name).with_color(color);
            TeamRoster::numbered(team, players_per_team)
        })
        .collect()
}

/// Everything needed to play one sandbox round
#[derive(Debug, Clone)]
pub struct RoundSetup {
    pub seed: u64,
    pub rosters: Vec<TeamRoster>,
    pub settings: RoundSettings,
    pub config: ActivityConfig,
    pub arena: ArenaMap,
    pub sim: SimConfig,
}

/// Play one round to completion.
pub fn simulate_round(setup: &RoundSetup) -> Result<RoundResult> {
    if setup.sim.frame_ms == 0 {
        return Err(FrozenTagError::InvalidSetting {
            name: "frame_ms",
            reason: "must be at least 1".to_string(),
        });
    }

    let teams: Vec<Team> = setup.rosters.iter().map(|r| r.team.clone()).collect();
    let mut activity = FrozenTagActivity::new(
        setup.config.clone(),
        setup.settings.clone(),
        setup.arena.clone(),
        teams,
        setup.seed,
    )?;

    let mut host_rng = ChaCha8Rng::seed_from_u64(setup.seed);
    host_rng.set_stream(HOST_RNG_STREAM);
    let mut host = HeadlessHost::new(&setup.arena, setup.sim, host_rng);

    for event in host.populate(&setup.rosters) {
        activity.handle(event);
    }
    activity.start()?;
    host.apply(activity.drain_commands());

    let mut frames = 0u64;
    while activity.phase() == ActivityPhase::Running {
        for event in host.step(setup.sim.frame_ms) {
            activity.handle(event);
        }
        activity.advance_ms(setup.sim.frame_ms);
        host.apply(activity.drain_commands());
        frames += 1;
    }
    log::debug!("sandbox round seed={} finished after {} frames", setup.seed, frames);

    activity.result().cloned().ok_or(FrozenTagError::InvalidPhase {
        expected: ActivityPhase::Ended,
        found: activity.phase(),
    })
}
