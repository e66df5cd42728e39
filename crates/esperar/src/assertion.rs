//! Assertions for test validation.
//!
//! Two complementary surfaces: fluent per-value expectations
//! ([`fluent::expect`]) whose matcher methods chain and accumulate
//! failures until [`Verifiable::verify`] reports them, and a
//! [`soft::SoftAssertions`] collector that rolls many independent checks
//! into one result.

pub mod fluent;
pub mod soft;

use std::fmt;

// =============================================================================
// VERIFIABLE
// =============================================================================

/// Access to the checks and failures accumulated by a fluent expectation.
///
/// Every assertion type in [`fluent`] implements this; custom assertion
/// types implement it to participate in [`soft::SoftAssertions::check`]
/// and get `verify` for free.
pub trait Verifiable {
    /// Description given via `described_as`, if any
    fn description(&self) -> Option<&str>;

    /// Messages for every failed check so far
    fn failures(&self) -> &[String];

    /// Number of checks performed so far, failed or not
    fn checks(&self) -> usize;

    /// Succeed if no check failed
    ///
    /// # Errors
    ///
    /// Returns an [`AssertionError`] carrying every recorded failure.
    fn verify(&self) -> Result<(), AssertionError> {
        if self.failures().is_empty() {
            Ok(())
        } else {
            Err(AssertionError {
                description: self.description().map(str::to_owned),
                failures: self.failures().to_vec(),
                checks: self.checks(),
            })
        }
    }
}

/// Error produced when a fluent expectation fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    /// Description given via `described_as`
    pub description: Option<String>,
    /// One message per failed check
    pub failures: Vec<String>,
    /// Checks performed, failed or not
    pub checks: usize,
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref description) = self.description {
            write!(f, "{description}: ")?;
        }
        write!(f, "{} of {} check(s) failed", self.failures.len(), self.checks)?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionError {}

// =============================================================================
// SHARED BOOK-KEEPING
// =============================================================================

/// Failure ledger embedded in every fluent assertion type
#[derive(Debug, Clone, Default)]
pub(crate) struct Checks {
    description: Option<String>,
    failures: Vec<String>,
    performed: usize,
}

impl Checks {
    pub(crate) fn describe(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Count a check and record its message if it failed
    pub(crate) fn record(&mut self, passed: bool, message: impl FnOnce() -> String) {
        self.performed += 1;
        if !passed {
            self.failures.push(message());
        }
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn failures(&self) -> &[String] {
        &self.failures
    }

    pub(crate) const fn performed(&self) -> usize {
        self.performed
    }
}

// =============================================================================
// TESTS
// =============================================================================
