//! Data model: ids, runners, teams, freezer bots and the round summary.

pub mod bot;
pub mod ids;
pub mod player;
pub mod round_result;
pub mod team;

pub use bot::Bot;
pub use ids::{ActorRef, BotId, PlayerId, TeamId};
pub use player::{ActorCapabilities, Player, PlayerStats};
pub use round_result::{
    EndReason, RoundEvent, RoundEventKind, RoundOutcome, RoundResult, TeamStanding,
};
pub use team::{Color, Team};

/// World-space position as reported by the host (meters)
pub type Position = nalgebra::Point3<f32>;
