//! Freezer Bot Configuration

use serde::{Deserialize, Serialize};

/// 봇 로스터 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// 봇 1기당 플레이어 수 (기본: 4)
    pub players_per_bot: u32,
    /// 최소 봇 수 (기본: 1)
    pub min_bots: u32,
    /// 최대 봇 수 (기본: 8)
    pub max_bots: u32,
    /// 호스트 봇 클래스 (기본: "soldier")
    pub bot_kind: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            players_per_bot: 4,
            min_bots: 1,
            max_bots: 8,
            bot_kind: "soldier".to_string(),
        }
    }
}

impl BotConfig {
    /// ceil(players / players_per_bot), clamped to [min_bots, max_bots]
    pub fn bot_count(&self, players: usize) -> u32 {
        let per = self.players_per_bot.max(1) as usize;
        let wanted = players.div_ceil(per) as u32;
        wanted.clamp(self.min_bots, self.max_bots.max(self.min_bots))
    }
}
