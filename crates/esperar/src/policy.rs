//! Polling policies: deadline plus delay schedule.
//!
//! A [`PollPolicy`] is constructed once per polling operation and is
//! immutable afterwards. The [`Backoff`] schedule decides how long the
//! evaluator sleeps between consecutive attempts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for polling operations (5 seconds)
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 5_000;

/// Default delay between attempts (100ms)
pub const DEFAULT_POLL_DELAY_MS: u64 = 100;

// =============================================================================
// BACKOFF
// =============================================================================

/// Delay schedule applied between consecutive attempts.
///
/// `delay_for(n)` is the wait inserted after attempt `n` and before attempt
/// `n + 1`; `n` is 1-based. Every schedule is non-negative, and `Linear` and
/// `Fibonacci` are non-decreasing in `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backoff {
    /// Same delay between every pair of attempts
    Fixed {
        /// Delay applied after every attempt
        delay: Duration,
    },
    /// Delay grows by `base` with every attempt: the n-th delay is `n * base`
    Linear {
        /// Delay after the first attempt
        base: Duration,
    },
    /// Delays follow the Fibonacci sequence from a configurable offset,
    /// scaled by `unit`: the n-th delay is `fib(offset + n - 1) * unit` with
    /// `fib(1) = fib(2) = 1`. Grows slower than exponential but faster than
    /// linear, so attempts stay frequent near the start without flooding a
    /// slowly-converging condition later on.
    Fibonacci {
        /// Duration of one Fibonacci unit
        unit: Duration,
        /// 1-based index into the Fibonacci sequence for the first delay
        offset: u32,
    },
}

impl Backoff {
    /// Fixed schedule with the default delay
    #[must_use]
    pub const fn default_fixed() -> Self {
        Self::Fixed {
            delay: Duration::from_millis(DEFAULT_POLL_DELAY_MS),
        }
    }

    /// Fibonacci schedule with one-second units, starting at `offset`
    #[must_use]
    pub const fn fibonacci_seconds(offset: u32) -> Self {
        Self::Fibonacci {
            unit: Duration::from_secs(1),
            offset,
        }
    }

    /// Delay inserted after attempt `n` (1-based), before attempt `n + 1`
    #[must_use]
    pub fn delay_for(&self, n: u32) -> Duration {
        let n = n.max(1);
        match *self {
            Self::Fixed { delay } => delay,
            Self::Linear { base } => base.saturating_mul(n),
            Self::Fibonacci { unit, offset } => {
                let index = offset.max(1).saturating_add(n - 1);
                scale(unit, fibonacci(index))
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::default_fixed()
    }
}

/// The `index`-th Fibonacci number (1-based), saturating instead of wrapping
fn fibonacci(index: u32) -> u64 {
    let (mut previous, mut current) = (0_u64, 1_u64);
    for _ in 1..index {
        // once saturated, every later term stays saturated
        if current == u64::MAX {
            break;
        }
        let next = previous.saturating_add(current);
        previous = current;
        current = next;
    }
    current
}

/// Multiply `unit` by a possibly huge factor without overflow
fn scale(unit: Duration, factor: u64) -> Duration {
    u32::try_from(factor).map_or(Duration::MAX, |factor| unit.saturating_mul(factor))
}

// =============================================================================
// POLL POLICY
// =============================================================================

/// Configuration for one polling operation.
///
/// Built once, handed to a [`Poller`](crate::Poller), never mutated. The
/// timeout bounds the total wall-clock wait; the backoff schedule governs
/// the pause between attempts; `max_attempts` optionally caps the attempt
/// count independently of the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    /// Maximum total wait
    pub timeout: Duration,
    /// Delay schedule between attempts
    pub backoff: Backoff,
    /// Maximum number of attempts (0 = unlimited within the timeout)
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS),
            backoff: Backoff::default_fixed(),
            max_attempts: 0,
        }
    }
}

impl PollPolicy {
    /// Create a policy with the given timeout and default schedule
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            backoff: Backoff::default_fixed(),
            max_attempts: 0,
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the backoff schedule
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Cap the number of attempts
    #[must_use]
    pub const fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Create a fast policy (short timeout, fast polling)
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            backoff: Backoff::Fixed {
                delay: Duration::from_millis(50),
            },
            max_attempts: 0,
        }
    }

    /// Create a slow policy (long timeout, slower polling)
    #[must_use]
    pub const fn slow() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            backoff: Backoff::Fixed {
                delay: Duration::from_millis(500),
            },
            max_attempts: 0,
        }
    }

    /// Delay inserted after attempt `n` (1-based)
    #[must_use]
    pub fn delay_for(&self, n: u32) -> Duration {
        self.backoff.delay_for(n)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod backoff_tests {
        use super::*;

        #[test]
        fn test_fixed_is_constant() {
            let backoff = Backoff::Fixed {
                delay: Duration::from_millis(50),
            };
            for n in 1..10 {
                assert_eq!(backoff.delay_for(n), Duration::from_millis(50));
            }
        }

        #[test]
        fn test_linear_grows_by_base() {
            let backoff = Backoff::Linear {
                base: Duration::from_millis(10),
            };
            assert_eq!(backoff.delay_for(1), Duration::from_millis(10));
            assert_eq!(backoff.delay_for(2), Duration::from_millis(20));
            assert_eq!(backoff.delay_for(3), Duration::from_millis(30));
        }

        #[test]
        fn test_fibonacci_offset_one() {
            let backoff = Backoff::Fibonacci {
                unit: Duration::from_secs(1),
                offset: 1,
            };
            let delays: Vec<u64> = (1..=6).map(|n| backoff.delay_for(n).as_secs()).collect();
            assert_eq!(delays, vec![1, 1, 2, 3, 5, 8]);
        }

        #[test]
        fn test_fibonacci_offset_three() {
            let backoff = Backoff::fibonacci_seconds(3);
            let delays: Vec<u64> = (1..=5).map(|n| backoff.delay_for(n).as_secs()).collect();
            assert_eq!(delays, vec![2, 3, 5, 8, 13]);
        }

        #[test]
        fn test_fibonacci_recurrence() {
            let backoff = Backoff::Fibonacci {
                unit: Duration::from_millis(1),
                offset: 4,
            };
            for n in 1..20 {
                assert_eq!(
                    backoff.delay_for(n + 2),
                    backoff.delay_for(n + 1) + backoff.delay_for(n)
                );
            }
        }

        #[test]
        fn test_fibonacci_matches_sequence_at_offset() {
            let backoff = Backoff::Fibonacci {
                unit: Duration::from_secs(1),
                offset: 7,
            };
            // n-th delay is the (offset + n - 1)-th Fibonacci number
            assert_eq!(backoff.delay_for(1).as_secs(), fibonacci(7));
            assert_eq!(backoff.delay_for(4).as_secs(), fibonacci(10));
        }

        #[test]
        fn test_fibonacci_saturates_instead_of_wrapping() {
            let backoff = Backoff::Fibonacci {
                unit: Duration::from_secs(1),
                offset: u32::MAX,
            };
            assert_eq!(backoff.delay_for(u32::MAX), Duration::MAX);
        }

        #[test]
        fn test_zero_index_is_treated_as_first() {
            let backoff = Backoff::Linear {
                base: Duration::from_millis(10),
            };
            assert_eq!(backoff.delay_for(0), backoff.delay_for(1));
        }

        #[test]
        fn test_fibonacci_numbers() {
            let expected = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
            for (i, &value) in expected.iter().enumerate() {
                assert_eq!(fibonacci(i as u32 + 1), value);
            }
        }

        #[test]
        fn test_default_is_fixed() {
            assert_eq!(Backoff::default(), Backoff::default_fixed());
        }
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_default() {
            let policy = PollPolicy::default();
            assert_eq!(policy.timeout, Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
            assert_eq!(policy.backoff, Backoff::default_fixed());
            assert_eq!(policy.max_attempts, 0);
        }

        #[test]
        fn test_new_sets_timeout() {
            let policy = PollPolicy::new(Duration::from_secs(10));
            assert_eq!(policy.timeout, Duration::from_secs(10));
        }

        #[test]
        fn test_builders_chained() {
            let policy = PollPolicy::default()
                .with_timeout(Duration::from_secs(60))
                .with_backoff(Backoff::fibonacci_seconds(3))
                .with_max_attempts(7);
            assert_eq!(policy.timeout, Duration::from_secs(60));
            assert_eq!(policy.backoff, Backoff::fibonacci_seconds(3));
            assert_eq!(policy.max_attempts, 7);
        }

        #[test]
        fn test_fast() {
            let policy = PollPolicy::fast();
            assert_eq!(policy.timeout, Duration::from_millis(500));
            assert_eq!(policy.delay_for(1), Duration::from_millis(50));
        }

        #[test]
        fn test_slow() {
            let policy = PollPolicy::slow();
            assert_eq!(policy.timeout, Duration::from_secs(30));
            assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        }

        #[test]
        fn test_delay_for_delegates_to_backoff() {
            let policy = PollPolicy::default().with_backoff(Backoff::fibonacci_seconds(3));
            assert_eq!(policy.delay_for(2), Duration::from_secs(3));
        }

        #[test]
        fn test_json_round_trip() {
            let policy = PollPolicy::new(Duration::from_secs(60))
                .with_backoff(Backoff::Fibonacci {
                    unit: Duration::from_millis(250),
                    offset: 3,
                })
                .with_max_attempts(10);
            let json = serde_json::to_string(&policy).unwrap();
            let parsed: PollPolicy = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, policy);
        }

        #[test]
        fn test_json_schedule_is_tagged() {
            let policy = PollPolicy::default().with_backoff(Backoff::fibonacci_seconds(3));
            let json = serde_json::to_string(&policy).unwrap();
            assert!(json.contains("\"type\":\"fibonacci\""));
        }
    }

    mod schedule_properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fixed_never_changes(delay_ms in 0_u64..10_000, n in 1_u32..100) {
                let backoff = Backoff::Fixed { delay: Duration::from_millis(delay_ms) };
                prop_assert_eq!(backoff.delay_for(n), Duration::from_millis(delay_ms));
            }

            #[test]
            fn linear_is_non_decreasing(base_ms in 0_u64..1_000, n in 1_u32..100) {
                let backoff = Backoff::Linear { base: Duration::from_millis(base_ms) };
                prop_assert!(backoff.delay_for(n + 1) >= backoff.delay_for(n));
            }

            #[test]
            fn fibonacci_is_non_decreasing(offset in 1_u32..30, n in 1_u32..40) {
                let backoff = Backoff::Fibonacci { unit: Duration::from_millis(1), offset };
                prop_assert!(backoff.delay_for(n + 1) >= backoff.delay_for(n));
            }

            #[test]
            fn fibonacci_holds_recurrence(offset in 1_u32..20, n in 1_u32..30) {
                let backoff = Backoff::Fibonacci { unit: Duration::from_millis(1), offset };
                prop_assert_eq!(
                    backoff.delay_for(n + 2),
                    backoff.delay_for(n + 1) + backoff.delay_for(n)
                );
            }
        }
    }
}
