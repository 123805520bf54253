use thiserror::Error;

use crate::engine::ActivityPhase;

/// Errors surfaced to whoever drives the activity.
///
/// Gameplay never fails: touching a missing entity or an invalid thaw is a
/// silent no-op. These cover setup and API misuse only.
#[derive(Error, Debug)]
pub enum FrozenTagError {
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("Settings validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Round is {found:?}, expected {expected:?}")]
    InvalidPhase { expected: ActivityPhase, found: ActivityPhase },

    #[error("Map '{map}' has no spawn points")]
    NoSpawnPoints { map: String },

    #[error("Duplicate team id {0}")]
    DuplicateTeam(u32),

    #[error("At least one team is required")]
    NoTeams,

    #[error("Unsupported schema version: {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Localization error: {0}")]
    Localization(String),

    #[error("Config file error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrozenTagError {
    /// Short machine-readable code for JSON responses
    pub fn code(&self) -> &'static str {
        match self {
            FrozenTagError::InvalidSetting { .. } | FrozenTagError::Validation(_) => {
                "INVALID_SETTINGS"
            }
            FrozenTagError::InvalidPhase { .. } => "INVALID_PHASE",
            FrozenTagError::NoSpawnPoints { .. } => "NO_SPAWN_POINTS",
            FrozenTagError::DuplicateTeam(_) | FrozenTagError::NoTeams => "INVALID_TEAMS",
            FrozenTagError::SchemaVersion { .. } => "SCHEMA_VERSION",
            FrozenTagError::Localization(_) => "LOCALIZATION",
            FrozenTagError::Config(_) => "CONFIG",
            FrozenTagError::Json(_) => "INVALID_JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, FrozenTagError>;
