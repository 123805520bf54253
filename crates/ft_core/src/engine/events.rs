//! Host → activity messages
//!
//! One variant per message kind the host delivers. The activity matches on
//! the variant and calls a dedicated handler; there is no runtime type
//! inspection anywhere in the dispatch path.

use serde::{Deserialize, Serialize};

use crate::models::{BotId, PlayerId, Position, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// A player joined the session (before or during the round)
    PlayerJoined { player: PlayerId, name: String, team: TeamId },
    /// A player left the session
    PlayerLeft { player: PlayerId },
    /// The host created a live avatar for the player
    PlayerSpawned { player: PlayerId, position: Position },
    /// The player's avatar died; it may respawn later
    PlayerDied { player: PlayerId },
    PlayerMoved { player: PlayerId, position: Position },
    BotMoved { bot: BotId, position: Position },
    BotDied { bot: BotId },
    /// A freezer bot touched a player
    BotContact { bot: BotId, player: PlayerId },
    /// Two players touched; order is whatever the host reported
    PlayerContact { toucher: PlayerId, target: PlayerId },
}

impl ActivityEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityEvent::PlayerJoined { .. } => "player_joined",
            ActivityEvent::PlayerLeft { .. } => "player_left",
            ActivityEvent::PlayerSpawned { .. } => "player_spawned",
            ActivityEvent::PlayerDied { .. } => "player_died",
            ActivityEvent::PlayerMoved { .. } => "player_moved",
            ActivityEvent::BotMoved { .. } => "bot_moved",
            ActivityEvent::BotDied { .. } => "bot_died",
            ActivityEvent::BotContact { .. } => "bot_contact",
            ActivityEvent::PlayerContact { .. } => "player_contact",
        }
    }
}
