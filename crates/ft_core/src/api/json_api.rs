//! JSON API for sandbox rounds and activity registration
//!
//! String in, string out, so the CLI and the Godot bridge share one surface.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ActivityConfig, RoundSettings};
use crate::engine::{ArenaMap, FrozenTagActivity, MapCatalog};
use crate::error::{FrozenTagError, Result};
use crate::models::{EndReason, RoundResult, TeamId};
use crate::sim::{self, RoundSetup, SimConfig, TeamRoster};
use crate::SCHEMA_VERSION;

fn default_arena() -> String {
    "Frost Plaza".to_string()
}

/// Sandbox round request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub teams: Vec<TeamRoster>,
    #[serde(default)]
    pub settings: RoundSettings,
    #[serde(default)]
    pub config: ActivityConfig,
    /// Builtin map name
    #[serde(default = "default_arena")]
    pub arena: String,
    #[serde(default)]
    pub sim: SimConfig,
}

impl SimulationRequest {
    pub fn new(seed: u64, teams: Vec<TeamRoster>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            teams,
            settings: RoundSettings::default(),
            config: ActivityConfig::default(),
            arena: default_arena(),
            sim: SimConfig::default(),
        }
    }

    /// Resolve the arena and check the version.
    pub fn to_setup(&self) -> Result<RoundSetup> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(FrozenTagError::SchemaVersion {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        let arena = resolve_arena(&self.arena)?;
        Ok(RoundSetup {
            seed: self.seed,
            rosters: self.teams.clone(),
            settings: self.settings.clone(),
            config: self.config.clone(),
            arena,
            sim: self.sim,
        })
    }
}

/// Builtin map by name; only maps that support this mode are accepted.
pub fn resolve_arena(name: &str) -> Result<ArenaMap> {
    let catalog = MapCatalog::builtin();
    let supported = FrozenTagActivity::info().supported_maps;
    match catalog.get(name) {
        Some(map) if supported.iter().any(|m| m == name) => Ok(map.clone()),
        _ => Err(FrozenTagError::InvalidSetting {
            name: "arena",
            reason: format!("'{}' is not a Frozen Tag map (expected one of {:?})", name, supported),
        }),
    }
}

/// Structured API error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub success: bool,
    pub code: String,
    pub message: String,
}

impl From<&FrozenTagError> for ApiError {
    fn from(err: &FrozenTagError) -> Self {
        Self { success: false, code: err.code().to_string(), message: err.to_string() }
    }
}

/// `{"success": false, "code": ..., "message": ...}`
pub fn error_json(err: &FrozenTagError) -> String {
    serde_json::to_string(&ApiError::from(err)).unwrap_or_else(|_| {
        format!(r#"{{"success":false,"code":"{}","message":"serialization failed"}}"#, err.code())
    })
}

pub fn simulate_request(request: &SimulationRequest) -> Result<RoundResult> {
    let setup = request.to_setup()?;
    debug!(seed = request.seed, teams = request.teams.len(), arena = %request.arena, "simulating round");
    let result = sim::simulate_round(&setup)?;
    info!(
        seed = request.seed,
        duration_ms = result.duration_ms,
        reason = ?result.reason,
        "round simulated"
    );
    Ok(result)
}

/// Simulate one round from a [`SimulationRequest`] JSON payload; returns the
/// [`RoundResult`] as JSON.
pub fn simulate_round_json(request_json: &str) -> Result<String> {
    let request: SimulationRequest = serde_json::from_str(request_json).map_err(|e| {
        warn!("bad simulation request: {}", e);
        FrozenTagError::Json(e)
    })?;
    let result = simulate_request(&request)?;
    Ok(serde_json::to_string(&result)?)
}

/// Registration info (name, description, settings, maps) as JSON.
pub fn activity_info_json() -> Result<String> {
    Ok(serde_json::to_string(&FrozenTagActivity::info())?)
}

/// Aggregate over many sandbox rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub rounds: u32,
    pub failed: u32,
    /// (team, rounds won), ascending team id
    pub wins: Vec<(TeamId, u32)>,
    pub no_winner: u32,
    pub last_team_standing: u32,
    pub all_frozen: u32,
    pub timeouts: u32,
    pub avg_duration_ms: f64,
    pub avg_freezes: f64,
    pub avg_thaws: f64,
}

impl BatchSummary {
    fn from_results(results: &[Result<RoundResult>]) -> Self {
        let mut summary = BatchSummary { rounds: results.len() as u32, ..Default::default() };
        let mut wins = std::collections::BTreeMap::<TeamId, u32>::new();
        let (mut duration, mut freezes, mut thaws) = (0u64, 0u64, 0u64);
        let mut ok = 0u32;

        for result in results {
            let Ok(result) = result else {
                summary.failed += 1;
                continue;
            };
            ok += 1;
            match result.winner() {
                Some(team) => *wins.entry(team).or_default() += 1,
                None => summary.no_winner += 1,
            }
            match result.reason {
                EndReason::LastTeamStanding => summary.last_team_standing += 1,
                EndReason::AllFrozen => summary.all_frozen += 1,
                EndReason::Timeout => summary.timeouts += 1,
                EndReason::Aborted => {}
            }
            duration += result.duration_ms;
            freezes += result.teams.iter().map(|t| t.times_frozen as u64).sum::<u64>();
            thaws += result.teams.iter().map(|t| t.thaws as u64).sum::<u64>();
        }

        summary.wins = wins.into_iter().collect();
        if ok > 0 {
            summary.avg_duration_ms = duration as f64 / ok as f64;
            summary.avg_freezes = freezes as f64 / ok as f64;
            summary.avg_thaws = thaws as f64 / ok as f64;
        }
        summary
    }
}

/// Run every request in parallel and summarize.
pub fn simulate_batch(requests: &[SimulationRequest]) -> BatchSummary {
    let results: Vec<Result<RoundResult>> = requests.par_iter().map(simulate_request).collect();
    for (request, result) in requests.iter().zip(&results) {
        if let Err(e) = result {
            warn!(seed = request.seed, "batch round failed: {}", e);
        }
    }
    BatchSummary::from_results(&results)
}
