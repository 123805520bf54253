//! Freeze Policy Configuration

use serde::{Deserialize, Serialize};

/// How long a freeze lasts.
///
/// `UntilThawed` only ends on a teammate's touch. `Timed` additionally thaws
/// the player once `thaw_after_secs` of round time have passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FreezePolicy {
    #[default]
    UntilThawed,
    Timed { thaw_after_secs: u32 },
}

impl FreezePolicy {
    pub fn thaw_after_ms(&self) -> Option<u64> {
        match self {
            FreezePolicy::UntilThawed => None,
            FreezePolicy::Timed { thaw_after_secs } => Some(*thaw_after_secs as u64 * 1000),
        }
    }
}

/// 프리즈 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FreezeConfig {
    #[serde(default)]
    pub policy: FreezePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_serde() {
        let p: FreezePolicy =
            serde_json::from_str(r#"{"mode":"timed","thaw_after_secs":12}"#).unwrap();
        assert_eq!(p, FreezePolicy::Timed { thaw_after_secs: 12 });
        assert_eq!(p.thaw_after_ms(), Some(12_000));
        assert_eq!(FreezePolicy::default().thaw_after_ms(), None);
    }
}
