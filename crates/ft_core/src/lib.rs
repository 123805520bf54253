//! # ft_core - Frozen Tag Game Mode
//!
//! Team-based tag against freezer bots. Bots chase the nearest mobile runner
//! and freeze it on touch; teammates thaw frozen runners by touching them.
//! The last team with a mobile player wins, or nobody does when the clock
//! runs out with several teams still moving.
//!
//! ## Features
//! - Host-agnostic round engine: events in, [`engine::HostCommand`]s out
//! - Localized notifications (en-US, ko-KR)
//! - Deterministic headless sandbox (same seed = same round)
//! - JSON API for the CLI and Godot integration

// Allow unused code for features under development
#![allow(dead_code)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod sim;

// Re-export main API functions
pub use api::{activity_info_json, simulate_batch, simulate_round_json, SimulationRequest};
pub use config::{ActivityConfig, RoundSettings};
pub use engine::{ActivityEvent, ActivityPhase, FrozenTagActivity, HostCommand};
pub use error::{FrozenTagError, Result};
pub use models::{RoundOutcome, RoundResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON request schema version
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
