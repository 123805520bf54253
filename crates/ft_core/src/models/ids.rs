//! Entity identifiers
//!
//! The host owns the real actors; the rules engine only ever refers to them
//! through these small copyable ids. Ordering matters: rosters are stored in
//! `BTreeMap`s so iteration (and therefore tie-breaking) is deterministic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned player id
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Host-assigned team id
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct TeamId(pub u32);

/// Bot id, allocated by the activity when a freezer is spawned
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct BotId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team#{}", self.0)
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bot#{}", self.0)
    }
}

/// Reference to any actor the host simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ActorRef {
    Player(PlayerId),
    Bot(BotId),
}

impl From<PlayerId> for ActorRef {
    fn from(id: PlayerId) -> Self {
        ActorRef::Player(id)
    }
}

impl From<BotId> for ActorRef {
    fn from(id: BotId) -> Self {
        ActorRef::Bot(id)
    }
}
