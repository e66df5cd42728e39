//! Esperar: Bounded Polling and Fluent Assertions
//!
//! Esperar (Spanish: "to wait, to expect") repeatedly evaluates a
//! caller-supplied check until it succeeds, a deadline elapses, or an
//! unrecoverable failure occurs, with pluggable backoff schedules (fixed,
//! linear, Fibonacci). Around that polling core it carries the assertion
//! toolkit such checks are usually written with: fluent per-value
//! expectations, a soft-assertion collector, and regex-bound scenario
//! steps.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ESPERAR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐    ┌────────────┐    ┌─────────────────────┐  │
//! │  │ Check fn  │───►│ Poller     │───►│ PollSuccess /       │  │
//! │  │ (caller)  │    │ + Policy   │    │ TimedOut / Aborted  │  │
//! │  └───────────┘    └────────────┘    └─────────────────────┘  │
//! │  ┌──────────────────┐  ┌────────────────┐  ┌──────────────┐  │
//! │  │ expect() fluent  │  │ SoftAssertions │  │ StepRegistry │  │
//! │  └──────────────────┘  └────────────────┘  └──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod policy;
mod poll;
mod result;
mod scenario;

pub use assertion::fluent::{
    expect, expect_error, DateAssert, ErrAssert, Expectable, IntAssert, SliceAssert, StrAssert,
};
pub use assertion::soft::{
    AssertionFailure, AssertionSummary, SoftAssertionError, SoftAssertions,
};
pub use assertion::{AssertionError, Verifiable};
pub use policy::{Backoff, PollPolicy, DEFAULT_POLL_DELAY_MS, DEFAULT_POLL_TIMEOUT_MS};
pub use poll::{
    poll_until, Attempt, AttemptOutcome, CheckOutcome, PollError, PollSuccess, Poller,
};
pub use result::{EsperarError, EsperarResult};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, StepArgs, StepRegistry};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::assertion::fluent::*;
    pub use super::assertion::soft::*;
    pub use super::assertion::{AssertionError, Verifiable};
    pub use super::policy::*;
    pub use super::poll::*;
    pub use super::result::*;
    pub use super::scenario::*;
}
