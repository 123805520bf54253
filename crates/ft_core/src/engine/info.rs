//! Activity registration data: name, description, settings, maps.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::{RoundSettings, SettingDescriptor};
use crate::models::Position;

pub const ACTIVITY_NAME: &str = "Frozen Tag";
pub const ACTIVITY_DESCRIPTION: &str = "Avoid the freezer-bots; touch your frozen teammates to \
     thaw them. Last team with a mobile player wins!";

/// Play type a map must support for this mode
pub const REQUIRED_PLAY_TYPE: &str = "melee";

/// A playable map as the activity sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMap {
    pub name: String,
    pub play_types: Vec<String>,
    pub spawn_points: Vec<Position>,
    /// Half extents of the playable floor (x, z), used by the sandbox host
    #[serde(default = "default_half_extents")]
    pub half_extents: (f32, f32),
}

fn default_half_extents() -> (f32, f32) {
    (12.0, 8.0)
}

impl ArenaMap {
    pub fn supports(&self, play_type: &str) -> bool {
        self.play_types.iter().any(|p| p == play_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    maps: Vec<ArenaMap>,
}

static BUILTIN_MAPS: Lazy<MapCatalog> = Lazy::new(|| {
    fn map(name: &str, play_types: &[&str], half: (f32, f32)) -> ArenaMap {
        let (hx, hz) = half;
        ArenaMap {
            name: name.to_string(),
            play_types: play_types.iter().map(|s| s.to_string()).collect(),
            spawn_points: vec![
                Position::new(-hx * 0.8, 0.0, -hz * 0.8),
                Position::new(hx * 0.8, 0.0, -hz * 0.8),
                Position::new(-hx * 0.8, 0.0, hz * 0.8),
                Position::new(hx * 0.8, 0.0, hz * 0.8),
                Position::new(0.0, 0.0, 0.0),
            ],
            half_extents: half,
        }
    }

    MapCatalog {
        maps: vec![
            map("Frost Plaza", &["melee", "team_flag"], (12.0, 8.0)),
            map("Glacier Yard", &["melee", "keep_away"], (16.0, 10.0)),
            map("Ice Rink", &["melee", "hockey"], (14.0, 7.0)),
            map("Snowfield", &["melee"], (20.0, 14.0)),
            map("Slalom Run", &["race"], (30.0, 4.0)),
        ],
    }
});

impl MapCatalog {
    pub fn builtin() -> &'static MapCatalog {
        &BUILTIN_MAPS
    }

    pub fn new(maps: Vec<ArenaMap>) -> Self {
        Self { maps }
    }

    pub fn get(&self, name: &str) -> Option<&ArenaMap> {
        self.maps.iter().find(|m| m.name == name)
    }

    pub fn names_for(&self, play_type: &str) -> Vec<String> {
        self.maps.iter().filter(|m| m.supports(play_type)).map(|m| m.name.clone()).collect()
    }
}

/// What the host's activity registry shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub name: String,
    pub description: String,
    pub settings: Vec<SettingDescriptor>,
    pub supported_maps: Vec<String>,
}

impl ActivityInfo {
    pub fn for_catalog(catalog: &MapCatalog) -> Self {
        Self {
            name: ACTIVITY_NAME.to_string(),
            description: ACTIVITY_DESCRIPTION.to_string(),
            settings: RoundSettings::descriptors(),
            supported_maps: catalog.names_for(REQUIRED_PLAY_TYPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_melee_maps_listed() {
        let info = ActivityInfo::for_catalog(MapCatalog::builtin());
        assert_eq!(info.name, "Frozen Tag");
        assert!(info.supported_maps.contains(&"Frost Plaza".to_string()));
        assert!(!info.supported_maps.contains(&"Slalom Run".to_string()));
    }

    #[test]
    fn test_builtin_maps_have_spawns() {
        let map = MapCatalog::builtin().get("Snowfield").unwrap();
        assert!(!map.spawn_points.is_empty());
        assert!(map.supports("melee"));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = MapCatalog::new(vec![]);
        assert!(ActivityInfo::for_catalog(&catalog).supported_maps.is_empty());
        assert!(catalog.get("Frost Plaza").is_none());
    }
}
