//! Godot bridge for the Frozen Tag activity
//!
//! One `FrozenTagBridge` owns at most one round. GDScript forwards world
//! events as JSON, ticks the round from `_process`, and applies the returned
//! host commands (spawn bots, toggle movement/attack, notifications).
//!
//! Every method returns a JSON string. Failures look like
//! `{"success": false, "code": "...", "message": "..."}`.

use std::cell::RefCell;
use std::sync::Once;

use godot::prelude::*;
use serde::Deserialize;
use serde_json::json;

use ft_core::api::{activity_info_json, error_json, resolve_arena};
use ft_core::config::{ActivityConfig, RoundSettings};
use ft_core::models::{EndReason, Team};
use ft_core::{ActivityEvent, FrozenTagActivity, FrozenTagError, HostCommand};

/// Set by build.rs
const GIT_HASH: &str = env!("GIT_HASH");
const BUILD_TIME_UTC: &str = env!("BUILD_TIME_UTC");

/// `create_round` payload
#[derive(Debug, Deserialize)]
struct CreateRoundRequest {
    teams: Vec<Team>,
    arena: String,
    #[serde(default)]
    settings: RoundSettings,
    #[serde(default)]
    config: Option<ActivityConfig>,
    #[serde(default)]
    seed: u64,
}

fn error_response(code: &str, message: &str) -> GString {
    GString::from(json!({ "success": false, "code": code, "message": message }).to_string().as_str())
}

fn core_error(err: &FrozenTagError) -> GString {
    godot_error!("FrozenTag: {}", err);
    GString::from(error_json(err).as_str())
}

fn commands_response(commands: Vec<HostCommand>, extra: serde_json::Value) -> GString {
    let mut body = json!({ "success": true, "commands": commands });
    if let (Some(body), serde_json::Value::Object(extra)) = (body.as_object_mut(), extra) {
        body.extend(extra);
    }
    GString::from(body.to_string().as_str())
}

fn parse_end_reason(reason: &str) -> Option<EndReason> {
    match reason {
        "" | "aborted" => Some(EndReason::Aborted),
        "timeout" => Some(EndReason::Timeout),
        _ => None,
    }
}

// Panic Hook
static PANIC_HOOK: Once = Once::new();
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(s) = info.payload().downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            let loc = match info.location() {
                Some(l) => format!("{}:{}:{}", l.file(), l.line(), l.column()),
                None => "unknown".to_string(),
            };
            godot_error!("Rust panic at {}: {}", loc, msg);
        }));
    });
}

struct FrozenTagExtension;

#[gdextension]
unsafe impl ExtensionLibrary for FrozenTagExtension {}

#[derive(GodotClass)]
#[class(base=RefCounted)]
pub struct FrozenTagBridge {
    base: Base<RefCounted>,
    activity: RefCell<Option<FrozenTagActivity>>,
}

#[godot_api]
impl IRefCounted for FrozenTagBridge {
    fn init(base: Base<RefCounted>) -> Self {
        install_panic_hook();
        Self { base, activity: RefCell::new(None) }
    }
}

#[godot_api]
impl FrozenTagBridge {
    /// Name, description, settings descriptors, supported maps
    #[func]
    pub fn activity_info(&self) -> GString {
        match activity_info_json() {
            Ok(info) => GString::from(info.as_str()),
            Err(e) => core_error(&e),
        }
    }

    #[func]
    pub fn build_info(&self) -> GString {
        GString::from(
            json!({
                "version": ft_core::VERSION,
                "git_hash": GIT_HASH,
                "build_time": BUILD_TIME_UTC,
            })
            .to_string()
            .as_str(),
        )
    }

    /// Create (and replace) the round. Players join afterwards via
    /// `push_event`.
    #[func]
    pub fn create_round(&self, request_json: GString) -> GString {
        let request: CreateRoundRequest = match serde_json::from_str(&request_json.to_string()) {
            Ok(r) => r,
            Err(e) => return core_error(&FrozenTagError::Json(e)),
        };
        let arena = match resolve_arena(&request.arena) {
            Ok(a) => a,
            Err(e) => return core_error(&e),
        };
        let config = match request.config {
            Some(config) => config,
            None => match ActivityConfig::from_env() {
                Ok(config) => config,
                Err(e) => return core_error(&e),
            },
        };

        match FrozenTagActivity::new(config, request.settings, arena, request.teams, request.seed) {
            Ok(activity) => {
                godot_print!("FrozenTag: round created on '{}'", activity.map().name);
                *self.activity.borrow_mut() = Some(activity);
                GString::from(json!({ "success": true, "phase": "waiting" }).to_string().as_str())
            }
            Err(e) => core_error(&e),
        }
    }

    #[func]
    pub fn start_round(&self) -> GString {
        let mut slot = self.activity.borrow_mut();
        let Some(activity) = slot.as_mut() else {
            return error_response("NO_ROUND", "create_round has not been called");
        };
        if let Err(e) = activity.start() {
            return core_error(&e);
        }
        commands_response(
            activity.drain_commands(),
            json!({ "remaining_ms": activity.remaining_ms() }),
        )
    }

    /// Forward one `ActivityEvent` (`{"type": "bot_contact", ...}`).
    #[func]
    pub fn push_event(&self, event_json: GString) -> GString {
        let event: ActivityEvent = match serde_json::from_str(&event_json.to_string()) {
            Ok(e) => e,
            Err(e) => return core_error(&FrozenTagError::Json(e)),
        };
        let mut slot = self.activity.borrow_mut();
        let Some(activity) = slot.as_mut() else {
            return error_response("NO_ROUND", "create_round has not been called");
        };
        activity.handle(event);
        commands_response(activity.drain_commands(), json!({ "phase": activity.phase() }))
    }

    /// Tick the round clock by `delta` seconds.
    #[func]
    pub fn advance(&self, delta: f64) -> GString {
        let mut slot = self.activity.borrow_mut();
        let Some(activity) = slot.as_mut() else {
            return error_response("NO_ROUND", "create_round has not been called");
        };
        activity.advance(delta as f32);
        commands_response(
            activity.drain_commands(),
            json!({ "phase": activity.phase(), "remaining_ms": activity.remaining_ms() }),
        )
    }

    /// Stop a running round. `reason` is `"aborted"` (default) or `"timeout"`.
    #[func]
    pub fn end_round(&self, reason: GString) -> GString {
        let Some(reason) = parse_end_reason(&reason.to_string()) else {
            return error_response("INVALID_REASON", "expected 'aborted' or 'timeout'");
        };
        let mut slot = self.activity.borrow_mut();
        let Some(activity) = slot.as_mut() else {
            return error_response("NO_ROUND", "create_round has not been called");
        };
        if let Err(e) = activity.end(reason) {
            return core_error(&e);
        }
        commands_response(activity.drain_commands(), json!({ "phase": activity.phase() }))
    }

    /// Final `RoundResult` once the round has ended.
    #[func]
    pub fn round_result(&self) -> GString {
        let slot = self.activity.borrow();
        let Some(result) = slot.as_ref().and_then(|a| a.result()) else {
            return error_response("NOT_ENDED", "no finished round");
        };
        match serde_json::to_string(result) {
            Ok(json) => GString::from(
                format!(r#"{{"success":true,"result":{}}}"#, json).as_str(),
            ),
            Err(e) => core_error(&FrozenTagError::Json(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stamp_is_injected() {
        assert!(!GIT_HASH.is_empty());
        assert!(!GIT_HASH.contains(char::is_whitespace));
        // RFC 3339, e.g. 2026-10-19T08:00:00.123+00:00
        assert_eq!(BUILD_TIME_UTC.as_bytes().get(10), Some(&b'T'));
        assert!(BUILD_TIME_UTC.ends_with("+00:00"));
    }

    #[test]
    fn test_end_reason_parsing() {
        assert_eq!(parse_end_reason(""), Some(EndReason::Aborted));
        assert_eq!(parse_end_reason("timeout"), Some(EndReason::Timeout));
        assert_eq!(parse_end_reason("all_frozen"), None);
    }
}
