//! # Activity Configuration
//!
//! 모든 튜닝 상수를 한 곳에서 관리.
//!
//! - [`RoundSettings`]: what the host's settings UI exposes (round length, punching)
//! - [`ActivityConfig`]: everything else (bot roster, freeze policy, tick rate, locale)
//!
//! ## 사용법
//! ```rust
//! use ft_core::config::ActivityConfig;
//!
//! let config = ActivityConfig::default();
//! let party = ActivityConfig::party();
//! assert!(party.validate().is_ok());
//! ```
//!
//! `ActivityConfig::from_env()` loads a JSON override from the file named by
//! `FT_CONFIG_PATH`, falling back to the defaults when the variable is unset.

mod bot_config;
mod freeze_config;
mod round_settings;

pub use bot_config::BotConfig;
pub use freeze_config::{FreezeConfig, FreezePolicy};
pub use round_settings::{
    RoundSettings, SettingDescriptor, ROUND_LENGTH_DEFAULT_SECS, ROUND_LENGTH_INCREMENT_SECS,
    ROUND_LENGTH_MAX_SECS, ROUND_LENGTH_MIN_SECS,
};

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::error::{FrozenTagError, Result};

pub const CONFIG_PATH_ENV: &str = "FT_CONFIG_PATH";

/// 주기 업데이트 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// 봇 재타겟 + 승리 판정 주기 (ms) (기본: 500)
    pub update_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { update_interval_ms: 500 }
    }
}

/// Non-UI activity configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default)]
    pub bots: BotConfig,
    #[serde(default)]
    pub freeze: FreezeConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Notification locale (기본: "en-US")
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            bots: BotConfig::default(),
            freeze: FreezeConfig::default(),
            timing: TimingConfig::default(),
            locale: default_locale(),
        }
    }
}

impl ActivityConfig {
    /// 클래식 (기본): freeze lasts until a teammate thaws you
    pub fn classic() -> Self {
        Self::default()
    }

    /// 파티 모드: denser bots, frozen players thaw by themselves after 20s
    pub fn party() -> Self {
        let mut cfg = Self::default();
        cfg.bots.players_per_bot = 3;
        cfg.freeze.policy = FreezePolicy::Timed { thaw_after_secs: 20 };
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `FT_CONFIG_PATH` if set, otherwise defaults.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_file(path)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FrozenTagError::Config(format!("Failed to read config file '{path}': {e}"))
        })?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        log::info!("Loaded activity config from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bots.players_per_bot == 0 {
            return Err(FrozenTagError::InvalidSetting {
                name: "bots.players_per_bot",
                reason: "must be at least 1".into(),
            });
        }
        if self.bots.min_bots == 0 {
            return Err(FrozenTagError::InvalidSetting {
                name: "bots.min_bots",
                reason: "a round needs at least one freezer".into(),
            });
        }
        if self.bots.min_bots > self.bots.max_bots {
            return Err(FrozenTagError::InvalidSetting {
                name: "bots.max_bots",
                reason: format!(
                    "need 1 <= min_bots ({}) <= max_bots ({})",
                    self.bots.min_bots, self.bots.max_bots
                ),
            });
        }
        if self.timing.update_interval_ms == 0 {
            return Err(FrozenTagError::InvalidSetting {
                name: "timing.update_interval_ms",
                reason: "must be positive".into(),
            });
        }
        if let FreezePolicy::Timed { thaw_after_secs: 0 } = self.freeze.policy {
            return Err(FrozenTagError::InvalidSetting {
                name: "freeze.policy.thaw_after_secs",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = ActivityConfig::default();
        assert_eq!(cfg.bots.players_per_bot, 4);
        assert_eq!(cfg.timing.update_interval_ms, 500);
        assert_eq!(cfg.freeze.policy, FreezePolicy::UntilThawed);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_party_preset_is_timed() {
        let party = ActivityConfig::party();
        assert!(party.freeze.policy.thaw_after_ms().is_some());
        assert!(party.bots.players_per_bot < ActivityConfig::classic().bots.players_per_bot);
        assert!(party.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = ActivityConfig::from_json(r#"{"locale":"ko-KR"}"#).unwrap();
        assert_eq!(cfg.locale, "ko-KR");
        assert_eq!(cfg.bots, BotConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = ActivityConfig::default();
        cfg.timing.update_interval_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = ActivityConfig::default();
        cfg.bots.min_bots = 5;
        cfg.bots.max_bots = 2;
        assert!(cfg.validate().is_err());

        let mut cfg = ActivityConfig::default();
        cfg.freeze.policy = FreezePolicy::Timed { thaw_after_secs: 0 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_min_bots_rejected() {
        let mut cfg = ActivityConfig::default();
        cfg.bots.min_bots = 0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, FrozenTagError::InvalidSetting { name: "bots.min_bots", .. }));

        let err = ActivityConfig::from_json(r#"{"bots": {"players_per_bot": 4, "min_bots": 0, "max_bots": 8, "bot_kind": "soldier"}}"#)
            .and_then(|cfg| cfg.validate())
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_SETTINGS");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timing":{{"update_interval_ms":250}}}}"#).unwrap();
        let cfg = ActivityConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.timing.update_interval_ms, 250);
    }

    #[test]
    fn test_from_file_missing() {
        let err = ActivityConfig::from_file("/nonexistent/ft_config.json").unwrap_err();
        assert!(matches!(err, FrozenTagError::Config(_)));
    }
}
