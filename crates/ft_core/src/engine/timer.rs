//! Round clock
//!
//! The host supplies wall time through `advance_ms`; these timers turn it
//! into the two schedules the mode needs:
//!
//! - a one-shot round deadline
//! - a repeating update tick (bot retarget + win check)
//!
//! All times are integer milliseconds since round start so replays are exact.

/// One-shot deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimer {
    deadline_ms: u64,
    fired: bool,
}

impl CountdownTimer {
    pub fn new(deadline_ms: u64) -> Self {
        Self { deadline_ms, fired: false }
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.deadline_ms.saturating_sub(now_ms)
    }

    /// True exactly once, the first time `now_ms` reaches the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.fired || now_ms < self.deadline_ms {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Fixed-interval tick, first fire one interval after start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatingTimer {
    interval_ms: u64,
    next_ms: u64,
}

impl RepeatingTimer {
    pub fn new(interval_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self { interval_ms, next_ms: interval_ms }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time of the next pending fire
    pub fn next_fire_ms(&self) -> u64 {
        self.next_ms
    }

    /// Pop the next fire time if it is due by `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<u64> {
        if self.next_ms > now_ms {
            return None;
        }
        let due = self.next_ms;
        self.next_ms += self.interval_ms;
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut t = CountdownTimer::new(1000);
        assert!(!t.poll(999));
        assert_eq!(t.remaining_ms(400), 600);
        assert!(t.poll(1000));
        assert!(!t.poll(2000));
        assert!(t.has_fired());
    }

    #[test]
    fn test_repeating_catches_up() {
        let mut t = RepeatingTimer::new(500);
        assert_eq!(t.pop_due(499), None);

        let fires: Vec<u64> = std::iter::from_fn(|| t.pop_due(1600)).collect();
        assert_eq!(fires, vec![500, 1000, 1500]);
        assert_eq!(t.next_fire_ms(), 2000);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut t = RepeatingTimer::new(0);
        assert_eq!(t.interval_ms(), 1);
        assert_eq!(t.pop_due(1), Some(1));
    }
}
