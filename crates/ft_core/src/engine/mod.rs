//! Frozen Tag engine: round state, freeze rules, bot targeting, win checks.
//!
//! Everything here is host-agnostic. The host feeds [`ActivityEvent`]s in and
//! applies the [`HostCommand`]s that come back out.

pub mod activity;
pub mod commands;
pub mod events;
pub mod freeze;
pub mod info;
pub mod state;
pub mod targeting;
pub mod timer;
pub mod win;

pub use activity::{ActivityPhase, FrozenTagActivity};
pub use commands::{CommandQueue, HostCommand};
pub use events::ActivityEvent;
pub use freeze::{
    expire_timed_freezes, freeze, resolve_contact, sync_capabilities, unfreeze, FreezeOutcome,
    ThawOutcome,
};
pub use info::{
    ActivityInfo, ArenaMap, MapCatalog, ACTIVITY_DESCRIPTION, ACTIVITY_NAME, REQUIRED_PLAY_TYPE,
};
pub use state::{RoundRules, RoundState};
pub use targeting::{nearest_target, retarget_bots, TargetChoice};
pub use timer::{CountdownTimer, RepeatingTimer};
pub use win::{decide_on_tick, decide_on_timeout, evaluate, team_statuses, winner, TeamStatus, WinStatus};
