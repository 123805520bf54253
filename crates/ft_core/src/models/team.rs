use serde::{Deserialize, Serialize};

use super::ids::TeamId;

/// RGB color in 0.0..=1.0, the way the host tints names and notifications
pub type Color = (f32, f32, f32);

/// Host-managed team. Membership lives on [`super::Player::team`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default = "default_team_color")]
    pub color: Color,
}

fn default_team_color() -> Color {
    (0.8, 0.8, 0.8)
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), color: default_team_color() }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
