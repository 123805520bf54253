//! Activity → host directives
//!
//! Everything the activity wants the host to do is queued as a
//! [`HostCommand`]; the host drains the queue after each call into the
//! activity and applies the commands to its own actors.

use serde::{Deserialize, Serialize};

use crate::models::{ActorRef, BotId, Color, Position, RoundOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    SpawnBot { bot: BotId, kind: String, position: Position },
    SetAttackEnabled { actor: ActorRef, enabled: bool },
    SetMovementEnabled { actor: ActorRef, enabled: bool },
    SetInvulnerable { actor: ActorRef, invulnerable: bool },
    /// Zero the actor's velocity
    StopMotion { actor: ActorRef },
    MoveToward { bot: BotId, position: Position },
    Notify { text: String, color: Color },
    EndRound { outcome: RoundOutcome },
}

/// FIFO of pending commands
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: Vec<HostCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: HostCommand) {
        self.pending.push(command);
    }

    pub fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostCommand> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;

    #[test]
    fn test_drain_empties_queue() {
        let mut q = CommandQueue::default();
        q.push(HostCommand::StopMotion { actor: ActorRef::Player(PlayerId(1)) });
        q.push(HostCommand::EndRound { outcome: RoundOutcome::NoWinner });
        assert_eq!(q.len(), 2);

        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = HostCommand::SetMovementEnabled {
            actor: ActorRef::Player(PlayerId(2)),
            enabled: false,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "set_movement_enabled");
        assert_eq!(json["actor"]["kind"], "player");
        assert_eq!(json["enabled"], false);
    }
}
