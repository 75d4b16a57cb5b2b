//! Upstream health state machine.
//!
//! # States
//! - Alive: upstream may serve work
//! - Sick: upstream excluded by the selection layer
//!
//! # State Transitions
//! ```text
//! Alive → Sick: consecutive failures >= FAIL_THRESHOLD
//! Sick → Alive: consecutive successes >= SUCCESS_THRESHOLD
//! ```
//!
//! Hysteresis prevents flapping: the thresholds are observed
//! independently per direction, so a lone success amid a failure streak
//! only resets the failure count, it never clears the sick flag.

use parking_lot::RwLock;

/// Consecutive failures that tip an alive upstream into sick.
pub const FAIL_THRESHOLD: u32 = 5;

/// Consecutive successes that bring a sick upstream back alive.
pub const SUCCESS_THRESHOLD: u32 = 5;

/// Point-in-time view of the health state, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub sick: bool,
    pub consecutive_failures: u32,
    pub consecutive_successes: u32,
}

#[derive(Debug, Default)]
struct Streaks {
    sick: bool,
    consecutive_failures: u32,
    consecutive_successes: u32,
}

/// Shared health state of one upstream. Mutated once per RPC round trip.
///
/// Reads take the read lock, the two `record_*` operations take the
/// write lock, and the lock is never held across an await point.
/// Invariant: after any mutation at most one streak counter is non-zero.
#[derive(Debug, Default)]
pub struct HealthState {
    inner: RwLock<Streaks>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the upstream is currently considered sick.
    pub fn is_sick(&self) -> bool {
        self.inner.read().sick
    }

    /// Record a failed round trip. Returns true when this failure tips
    /// the state from alive to sick, so the caller can log the
    /// transition with its own context.
    pub fn record_failure(&self) -> bool {
        let mut streaks = self.inner.write();
        streaks.consecutive_failures += 1;
        streaks.consecutive_successes = 0;
        if !streaks.sick && streaks.consecutive_failures >= FAIL_THRESHOLD {
            streaks.sick = true;
            return true;
        }
        false
    }

    /// Record a successful round trip. Returns true when this success
    /// clears a sick state; both streak counters are reset on that
    /// transition.
    pub fn record_success(&self) -> bool {
        let mut streaks = self.inner.write();
        streaks.consecutive_successes += 1;
        streaks.consecutive_failures = 0;
        if streaks.sick && streaks.consecutive_successes >= SUCCESS_THRESHOLD {
            streaks.sick = false;
            streaks.consecutive_failures = 0;
            streaks.consecutive_successes = 0;
            return true;
        }
        false
    }

    /// Consistent snapshot of the flag and both counters.
    pub fn snapshot(&self) -> HealthSnapshot {
        let streaks = self.inner.read();
        HealthSnapshot {
            sick: streaks.sick,
            consecutive_failures: streaks.consecutive_failures,
            consecutive_successes: streaks.consecutive_successes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_alive() {
        let health = HealthState::new();
        assert!(!health.is_sick());
        assert_eq!(
            health.snapshot(),
            HealthSnapshot {
                sick: false,
                consecutive_failures: 0,
                consecutive_successes: 0
            }
        );
    }

    #[test]
    fn test_sick_exactly_at_fail_threshold() {
        let health = HealthState::new();
        for _ in 0..FAIL_THRESHOLD - 1 {
            assert!(!health.record_failure());
            assert!(!health.is_sick());
        }
        assert!(health.record_failure());
        assert!(health.is_sick());
    }

    #[test]
    fn test_stays_sick_under_further_failures() {
        let health = HealthState::new();
        for _ in 0..FAIL_THRESHOLD {
            health.record_failure();
        }
        // Already sick: further failures must not report a transition.
        assert!(!health.record_failure());
        assert!(health.is_sick());
        assert_eq!(health.snapshot().consecutive_failures, FAIL_THRESHOLD + 1);
    }

    #[test]
    fn test_lone_success_does_not_clear_sickness() {
        let health = HealthState::new();
        for _ in 0..FAIL_THRESHOLD {
            health.record_failure();
        }
        assert!(!health.record_success());
        assert!(health.is_sick());
        // But the failure streak is gone.
        assert_eq!(health.snapshot().consecutive_failures, 0);
    }

    #[test]
    fn test_failure_resets_success_streak_while_sick() {
        let health = HealthState::new();
        for _ in 0..FAIL_THRESHOLD {
            health.record_failure();
        }
        for _ in 0..SUCCESS_THRESHOLD - 1 {
            health.record_success();
        }
        health.record_failure();
        assert_eq!(health.snapshot().consecutive_successes, 0);
        // The reset streak means revival needs a full run of successes again.
        for _ in 0..SUCCESS_THRESHOLD - 1 {
            assert!(!health.record_success());
            assert!(health.is_sick());
        }
        assert!(health.record_success());
        assert!(!health.is_sick());
    }

    #[test]
    fn test_revival_resets_both_counters() {
        let health = HealthState::new();
        for _ in 0..FAIL_THRESHOLD {
            health.record_failure();
        }
        for _ in 0..SUCCESS_THRESHOLD {
            health.record_success();
        }
        assert_eq!(
            health.snapshot(),
            HealthSnapshot {
                sick: false,
                consecutive_failures: 0,
                consecutive_successes: 0
            }
        );
    }

    #[test]
    fn test_counters_are_mutually_exclusive() {
        let health = HealthState::new();
        health.record_failure();
        health.record_failure();
        health.record_success();
        let snapshot = health.snapshot();
        assert_eq!(snapshot.consecutive_failures, 0);
        assert_eq!(snapshot.consecutive_successes, 1);

        health.record_failure();
        let snapshot = health.snapshot();
        assert_eq!(snapshot.consecutive_failures, 1);
        assert_eq!(snapshot.consecutive_successes, 0);
    }

    #[test]
    fn test_concurrent_mutation_keeps_invariant() {
        use std::sync::Arc;

        let health = Arc::new(HealthState::new());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let health = health.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    if worker % 2 == 0 {
                        health.record_failure();
                    } else {
                        health.record_success();
                    }
                    let snapshot = health.snapshot();
                    assert!(
                        snapshot.consecutive_failures == 0 || snapshot.consecutive_successes == 0,
                        "both streak counters non-zero: {:?}",
                        snapshot
                    );
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
