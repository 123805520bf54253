use serde::{Deserialize, Serialize};

use super::ids::{BotId, PlayerId};
use super::Position;

/// A freezer bot. The host runs its AI; the mod only steers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    /// Host bot class to spawn (e.g. "soldier")
    pub kind: String,
    pub position: Position,
    pub alive: bool,
    /// Player picked on the last retarget pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
}

impl Bot {
    pub fn new(id: BotId, kind: impl Into<String>, position: Position) -> Self {
        Self { id, kind: kind.into(), position, alive: true, target: None }
    }
}
