//! Round Result Data Structures
//!
//! Output of a finished round. Everything the activity records while running
//! ends up here, so the host (or the CLI) can show a summary or archive it.
//!
//! ```text
//!  FrozenTagActivity ── events ──► RoundState.events ─┐
//!                    └─ end() ─────────────────────────┴─► RoundResult
//! ```
//!
//! `round_id` and `started_at` are wall-clock/random and are excluded from
//! [`RoundResult::deterministic_view`], which is what replay comparisons use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{BotId, PlayerId, TeamId};

/// How a round resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum RoundOutcome {
    Winner(TeamId),
    NoWinner,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<TeamId> {
        match self {
            RoundOutcome::Winner(team) => Some(*team),
            RoundOutcome::NoWinner => None,
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Exactly one team kept an unfrozen member
    LastTeamStanding,
    /// Nobody is left unfrozen
    AllFrozen,
    /// Round clock ran out
    Timeout,
    /// Host tore the activity down early
    Aborted,
}

/// One entry in the round log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEvent {
    /// Milliseconds since round start
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: RoundEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEventKind {
    RoundStarted { bots: u32, round_length_ms: u64 },
    BotSpawned { bot: BotId },
    BotLost { bot: BotId },
    PlayerJoined { player: PlayerId, team: TeamId },
    PlayerLeft { player: PlayerId },
    Frozen { player: PlayerId, by: BotId },
    Thawed { player: PlayerId, by: PlayerId },
    AutoThawed { player: PlayerId },
    RoundEnded { outcome: RoundOutcome, reason: EndReason },
}

/// Final per-team line in the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: TeamId,
    pub name: String,
    pub members: u32,
    pub unfrozen: u32,
    pub times_frozen: u32,
    pub thaws: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub outcome: RoundOutcome,
    pub reason: EndReason,
    pub teams: Vec<TeamStanding>,
    pub events: Vec<RoundEvent>,
}

impl RoundResult {
    pub fn winner(&self) -> Option<TeamId> {
        self.outcome.winner()
    }

    /// Count of log entries matching `pred`
    pub fn count_events(&self, pred: impl Fn(&RoundEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    /// JSON of everything that depends only on the round's inputs.
    pub fn deterministic_view(&self) -> serde_json::Value {
        serde_json::json!({
            "duration_ms": self.duration_ms,
            "outcome": self.outcome,
            "reason": self.reason,
            "teams": self.teams,
            "events": self.events,
        })
    }
}
