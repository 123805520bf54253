//! User-facing notifications (frozen / thawed / round result).
//!
//! The activity never renders text itself. It asks [`Notifier`] for a
//! localized line and a tint, then hands both to the host as a
//! `HostCommand::Notify`.

mod localization;

pub use localization::{NotificationLocalizer, FALLBACK_LOCALE, SUPPORTED_LOCALES};

use crate::error::Result;
use crate::models::{Color, EndReason};

pub const FROZEN_COLOR: Color = (0.5, 0.8, 1.0);
pub const NEUTRAL_COLOR: Color = (1.0, 1.0, 1.0);

/// Localized notification ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub color: Color,
}

pub struct Notifier {
    localizer: NotificationLocalizer,
}

impl Notifier {
    pub fn new(locale: &str) -> Result<Self> {
        Ok(Self { localizer: NotificationLocalizer::new(locale)? })
    }

    pub fn locale(&self) -> &str {
        self.localizer.locale()
    }

    pub fn round_start(&self, seconds: u32) -> Notification {
        Notification {
            text: self.localizer.format("round-start", &[("seconds", seconds.to_string())]),
            color: NEUTRAL_COLOR,
        }
    }

    pub fn player_frozen(&self, player: &str) -> Notification {
        Notification {
            text: self.localizer.format("player-frozen", &[("player", player.to_string())]),
            color: FROZEN_COLOR,
        }
    }

    pub fn player_thawed(&self, player: &str, by: &str, team_color: Color) -> Notification {
        Notification {
            text: self.localizer.format(
                "player-thawed",
                &[("player", player.to_string()), ("by", by.to_string())],
            ),
            color: team_color,
        }
    }

    pub fn player_auto_thawed(&self, player: &str, team_color: Color) -> Notification {
        Notification {
            text: self.localizer.format("player-auto-thawed", &[("player", player.to_string())]),
            color: team_color,
        }
    }

    pub fn team_wins(&self, team: &str, team_color: Color) -> Notification {
        Notification {
            text: self.localizer.format("team-wins", &[("team", team.to_string())]),
            color: team_color,
        }
    }

    /// Round ended without a winner; the line names why.
    pub fn no_winner(&self, reason: EndReason) -> Notification {
        let key = match reason {
            EndReason::AllFrozen => "round-all-frozen",
            EndReason::Aborted => "round-aborted",
            EndReason::Timeout | EndReason::LastTeamStanding => "round-no-winner",
        };
        Notification { text: self.localizer.format(key, &[]), color: NEUTRAL_COLOR }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_notification_is_tinted() {
        let n = Notifier::new("en-US").unwrap();
        let note = n.player_frozen("Ann");
        assert_eq!(note.text, "Ann was frozen!");
        assert_eq!(note.color, FROZEN_COLOR);
    }

    #[test]
    fn test_round_start_mentions_seconds() {
        let n = Notifier::new("en-US").unwrap();
        assert!(n.round_start(90).text.contains("90"));
    }

    #[test]
    fn test_no_winner_text_follows_reason() {
        let n = Notifier::new("en-US").unwrap();
        assert_eq!(n.no_winner(EndReason::Timeout).text, "Time's up. Nobody wins.");
        assert_eq!(n.no_winner(EndReason::AllFrozen).text, "Everyone is frozen. Nobody wins.");
        assert_eq!(n.no_winner(EndReason::Aborted).text, "Round stopped. Nobody wins.");

        let ko = Notifier::new("ko-KR").unwrap();
        assert_eq!(ko.no_winner(EndReason::AllFrozen).text, "모두 얼어붙었습니다. 승자 없음.");
    }
}
