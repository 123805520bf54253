//! Round Settings (host-visible)
//!
//! 호스트 커스텀 탭에 노출되는 설정. Ranges mirror what the settings UI allows.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{FrozenTagError, Result};

pub const ROUND_LENGTH_DEFAULT_SECS: u32 = 90;
pub const ROUND_LENGTH_MIN_SECS: u32 = 30;
pub const ROUND_LENGTH_MAX_SECS: u32 = 300;
pub const ROUND_LENGTH_INCREMENT_SECS: u32 = 15;

/// 라운드 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct RoundSettings {
    /// 라운드 길이 (초) (기본: 90, 30..=300, 15초 단위)
    #[validate(range(min = 30, max = 300))]
    #[serde(default = "default_round_length")]
    pub round_length_secs: u32,
    /// 펀치 비활성화 (기본: true)
    #[serde(default = "default_disable_attacks")]
    pub disable_attacks: bool,
}

fn default_round_length() -> u32 {
    ROUND_LENGTH_DEFAULT_SECS
}

fn default_disable_attacks() -> bool {
    true
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            round_length_secs: ROUND_LENGTH_DEFAULT_SECS,
            disable_attacks: true,
        }
    }
}

impl RoundSettings {
    pub fn with_round_length(secs: u32) -> Self {
        Self { round_length_secs: secs, ..Self::default() }
    }

    /// Range check plus the UI step (the host only ever offers 30, 45, 60, ...).
    pub fn validate_settings(&self) -> Result<()> {
        self.validate()?;
        if (self.round_length_secs - ROUND_LENGTH_MIN_SECS) % ROUND_LENGTH_INCREMENT_SECS != 0 {
            return Err(FrozenTagError::InvalidSetting {
                name: "round_length_secs",
                reason: format!(
                    "{} is not a multiple of {}s above {}s",
                    self.round_length_secs, ROUND_LENGTH_INCREMENT_SECS, ROUND_LENGTH_MIN_SECS
                ),
            });
        }
        Ok(())
    }

    pub fn round_length_ms(&self) -> u64 {
        self.round_length_secs as u64 * 1000
    }

    /// Setting descriptors in the order the host lists them
    pub fn descriptors() -> Vec<SettingDescriptor> {
        vec![
            SettingDescriptor::Int {
                key: "round_length_secs".into(),
                label: "Round Length".into(),
                default: ROUND_LENGTH_DEFAULT_SECS as i64,
                min: ROUND_LENGTH_MIN_SECS as i64,
                max: ROUND_LENGTH_MAX_SECS as i64,
                increment: ROUND_LENGTH_INCREMENT_SECS as i64,
            },
            SettingDescriptor::Bool {
                key: "disable_attacks".into(),
                label: "Disable Punching".into(),
                default: true,
            },
        ]
    }

    /// JSON Schema for hosts that build their settings UI from it
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(RoundSettings)).unwrap_or_default()
    }
}

/// One entry of the activity's configurable settings list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingDescriptor {
    Int { key: String, label: String, default: i64, min: i64, max: i64, increment: i64 },
    Bool { key: String, label: String, default: bool },
}

impl SettingDescriptor {
    pub fn key(&self) -> &str {
        match self {
            SettingDescriptor::Int { key, .. } | SettingDescriptor::Bool { key, .. } => key,
        }
    }
}
