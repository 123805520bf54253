pub mod json_api;

pub use json_api::{
    activity_info_json, error_json, resolve_arena, simulate_batch, simulate_request,
    simulate_round_json, ApiError, BatchSummary, SimulationRequest,
};
