use serde::{Deserialize, Serialize};

use super::ids::{PlayerId, TeamId};
use super::Position;

/// Capability flags the mod has pushed to the host for one actor.
///
/// The host is the source of truth for physics; this is only the mod's view
/// of what it last requested, so freeze/thaw can restore the right baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCapabilities {
    pub movement: bool,
    pub attack: bool,
    pub invulnerable: bool,
}

impl ActorCapabilities {
    /// Capabilities of a runner while the round is live
    pub fn runner(attacks_enabled: bool) -> Self {
        Self { movement: true, attack: attacks_enabled, invulnerable: false }
    }

    /// Capabilities of a frozen runner
    pub fn frozen() -> Self {
        Self { movement: false, attack: false, invulnerable: true }
    }
}

impl Default for ActorCapabilities {
    fn default() -> Self {
        Self::runner(true)
    }
}

/// Per-round counters for the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub times_frozen: u32,
    pub thaws_given: u32,
}

/// A human runner as seen by the rules engine.
///
/// `frozen` lives here rather than on the host actor, so it survives
/// respawns: the host may recreate the avatar, the flag stays put.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamId,
    pub frozen: bool,
    /// Round clock when the current freeze started (timed thaw)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen_at_ms: Option<u64>,
    /// Whether the host currently has a live avatar for this player
    pub spawned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub capabilities: ActorCapabilities,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, team: TeamId) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            frozen: false,
            frozen_at_ms: None,
            spawned: false,
            position: None,
            capabilities: ActorCapabilities::default(),
            stats: PlayerStats::default(),
        }
    }

    /// Live, unfrozen and with a known position: a valid bot target
    pub fn is_chaseable(&self) -> bool {
        self.spawned && !self.frozen && self.position.is_some()
    }
}
