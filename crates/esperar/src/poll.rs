//! Bounded polling evaluator.
//!
//! Repeatedly evaluates a caller-supplied check until it completes, the
//! policy deadline elapses, or the check reports an unrecoverable failure.
//! One invocation blocks the calling thread for at most the policy timeout,
//! alternating between the check and a scheduled sleep; it never busy-spins
//! (unless the schedule itself is zero). Concurrent invocations with
//! independent policies and checks share nothing and need no locking.
//!
//! The first attempt always runs: the deadline is consulted only *between*
//! attempts, so even a zero timeout evaluates the check exactly once.

use crate::policy::PollPolicy;
use std::time::{Duration, Instant};
use thiserror::Error;

// =============================================================================
// CHECK OUTCOME
// =============================================================================

/// Outcome of a single evaluation of the check function.
///
/// Retry/abort classification is an explicit tag carried by the check's
/// return value, not something the evaluator infers from error types: a
/// check decides for itself which of its failures are worth another
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome<T> {
    /// The condition holds; polling stops and yields this value
    Complete(T),
    /// Transient failure, worth another attempt if time remains
    Retry(String),
    /// Unrecoverable failure; polling stops immediately
    Fatal(String),
}

impl<T> CheckOutcome<T> {
    /// Transient failure with the given detail
    pub fn retry(detail: impl Into<String>) -> Self {
        Self::Retry(detail.into())
    }

    /// Unrecoverable failure with the given detail
    pub fn fatal(detail: impl Into<String>) -> Self {
        Self::Fatal(detail.into())
    }

    /// Whether this outcome ends the polling operation successfully
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

// =============================================================================
// ATTEMPT
// =============================================================================

/// How a single attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The check produced its value
    Complete,
    /// The check failed retriably
    Retry,
    /// The check failed fatally
    Fatal,
}

/// One evaluation of the check function.
///
/// Attempts exist only for the duration of a polling invocation; they are
/// surfaced through tracing events and the terminal result, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based ordinal of this attempt
    pub index: u32,
    /// Offset from the start of the polling operation
    pub started_after: Duration,
    /// How the attempt ended
    pub outcome: AttemptOutcome,
}

// =============================================================================
// TERMINAL RESULTS
// =============================================================================

/// Successful polling result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSuccess<T> {
    /// Value returned by the check on its successful attempt
    pub value: T,
    /// Attempts performed, including the successful one
    pub attempts: u32,
    /// Wall-clock time from start to success
    pub elapsed: Duration,
}

/// Terminal failure of a polling operation.
///
/// Exactly one of these (or a [`PollSuccess`]) comes back per invocation;
/// retriable failures along the way are absorbed and surface only as the
/// `last_failure` detail of `TimedOut`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The deadline elapsed (or the attempt cap was reached) with no success
    #[error("condition not satisfied after {attempts} attempt(s) in {elapsed:?}: {last_failure}")]
    TimedOut {
        /// Attempts performed before giving up
        attempts: u32,
        /// Wall-clock time spent polling
        elapsed: Duration,
        /// Detail of the last retriable failure observed
        last_failure: String,
    },

    /// The check reported an unrecoverable failure
    #[error("aborted on attempt {attempt}: {reason}")]
    Aborted {
        /// Attempt on which the fatal failure occurred
        attempt: u32,
        /// Failure detail, exactly as reported by the check
        reason: String,
    },
}

impl PollError {
    /// Whether the operation ran out of time or attempts
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Whether the operation hit a fatal failure
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

// =============================================================================
// POLLER
// =============================================================================

/// Polling evaluator: drives a check function under a [`PollPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Poller {
    policy: PollPolicy,
    description: Option<String>,
}

impl Poller {
    /// Create an evaluator for the given policy
    #[must_use]
    pub const fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            description: None,
        }
    }

    /// Set a description, included in tracing events
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The policy this evaluator runs under
    #[must_use]
    pub const fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Run `check` until it completes, the deadline elapses, or it reports a
    /// fatal failure.
    ///
    /// The first attempt runs unconditionally. After a retriable failure the
    /// evaluator computes the next schedule delay; if sleeping that long
    /// would reach the deadline, it gives up *without* performing the next
    /// attempt and returns `TimedOut` carrying the last failure detail.
    /// A `Fatal` outcome aborts immediately with the check's detail
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`PollError::TimedOut`] when time or attempts run out,
    /// [`PollError::Aborted`] on a fatal check failure.
    pub fn run<T, F>(&self, mut check: F) -> Result<PollSuccess<T>, PollError>
    where
        F: FnMut() -> CheckOutcome<T>,
    {
        let start = Instant::now();
        let mut attempts: u32 = 0;
        let mut last_failure = String::new();

        loop {
            attempts += 1;
            let started_after = start.elapsed();
            let outcome = check();
            self.trace_attempt(&Attempt {
                index: attempts,
                started_after,
                outcome: classify(&outcome),
            });

            match outcome {
                CheckOutcome::Complete(value) => {
                    return Ok(PollSuccess {
                        value,
                        attempts,
                        elapsed: start.elapsed(),
                    });
                }
                CheckOutcome::Fatal(reason) => {
                    return Err(PollError::Aborted {
                        attempt: attempts,
                        reason,
                    });
                }
                CheckOutcome::Retry(detail) => last_failure = detail,
            }

            if self.policy.max_attempts > 0 && attempts >= self.policy.max_attempts {
                return Err(PollError::TimedOut {
                    attempts,
                    elapsed: start.elapsed(),
                    last_failure,
                });
            }

            let delay = self.policy.delay_for(attempts);
            let elapsed = start.elapsed();
            if elapsed.saturating_add(delay) >= self.policy.timeout {
                return Err(PollError::TimedOut {
                    attempts,
                    elapsed,
                    last_failure,
                });
            }

            tracing::trace!(
                delay_ms = delay.as_millis() as u64,
                "sleeping before next attempt"
            );
            std::thread::sleep(delay);
        }
    }

    fn trace_attempt(&self, attempt: &Attempt) {
        tracing::debug!(
            poller = self.description.as_deref().unwrap_or("poll"),
            attempt = attempt.index,
            at_ms = attempt.started_after.as_millis() as u64,
            outcome = ?attempt.outcome,
            "attempt evaluated"
        );
    }
}

/// The attempt-level view of a check outcome
const fn classify<T>(outcome: &CheckOutcome<T>) -> AttemptOutcome {
    match outcome {
        CheckOutcome::Complete(_) => AttemptOutcome::Complete,
        CheckOutcome::Retry(_) => AttemptOutcome::Retry,
        CheckOutcome::Fatal(_) => AttemptOutcome::Fatal,
    }
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Poll a boolean predicate under `policy` until it returns true.
///
/// # Errors
///
/// Returns [`PollError::TimedOut`] if the predicate never returns true
/// within the policy's budget.
pub fn poll_until<F>(mut predicate: F, policy: PollPolicy) -> Result<(), PollError>
where
    F: FnMut() -> bool,
{
    Poller::new(policy)
        .run(|| {
            if predicate() {
                CheckOutcome::Complete(())
            } else {
                CheckOutcome::retry("predicate returned false")
            }
        })
        .map(|_| ())
}

// =============================================================================
// TESTS
// =============================================================================
