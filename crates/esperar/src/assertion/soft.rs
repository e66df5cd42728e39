//! Soft assertions: collect failures, report once.
//!
//! A [`SoftAssertions`] collector keeps checking after a failure so a
//! single run surfaces every broken expectation instead of just the first.
//! Call sites are recorded automatically via `#[track_caller]`.

use super::Verifiable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::panic::Location;
use std::time::Instant;

/// A single recorded assertion failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Message describing the failure
    pub message: String,
    /// Call site that recorded the failure (`file:line`)
    pub location: Option<String>,
    /// When the failure was recorded
    #[serde(skip)]
    pub timestamp: Option<Instant>,
    /// Position in the recorded failure sequence
    pub index: usize,
}

impl AssertionFailure {
    /// Create a new assertion failure
    #[must_use]
    pub fn new(message: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            location: None,
            timestamp: Some(Instant::now()),
            index,
        }
    }

    /// Set the call site of the failure
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Soft assertions collector.
///
/// ## Example
///
/// ```
/// use esperar::SoftAssertions;
///
/// let mut softly = SoftAssertions::new();
/// softly.assert_eq(&1, &2, "values should match");
/// softly.assert_true(false, "condition should hold");
/// // both failures are reported together
/// assert!(softly.verify().is_err());
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    failures: Vec<AssertionFailure>,
    checks: usize,
}

impl SoftAssertions {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert two values are equal
    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, actual: &T, expected: &T, message: &str) {
        self.checks += 1;
        if actual != expected {
            self.record_failure(format!("{message}: expected {expected:?}, got {actual:?}"));
        }
    }

    /// Assert two values differ
    #[track_caller]
    pub fn assert_ne<T: PartialEq + Debug>(&mut self, actual: &T, expected: &T, message: &str) {
        self.checks += 1;
        if actual == expected {
            self.record_failure(format!(
                "{message}: expected values to differ, both were {actual:?}"
            ));
        }
    }

    /// Assert a condition holds
    #[track_caller]
    pub fn assert_true(&mut self, condition: bool, message: &str) {
        self.checks += 1;
        if !condition {
            self.record_failure(format!("{message}: expected true, got false"));
        }
    }

    /// Assert a condition does not hold
    #[track_caller]
    pub fn assert_false(&mut self, condition: bool, message: &str) {
        self.checks += 1;
        if condition {
            self.record_failure(format!("{message}: expected false, got true"));
        }
    }

    /// Assert an Option is Some
    #[track_caller]
    pub fn assert_some<T>(&mut self, option: &Option<T>, message: &str) {
        self.checks += 1;
        if option.is_none() {
            self.record_failure(format!("{message}: expected Some, got None"));
        }
    }

    /// Assert an Option is None
    #[track_caller]
    pub fn assert_none<T>(&mut self, option: &Option<T>, message: &str) {
        self.checks += 1;
        if option.is_some() {
            self.record_failure(format!("{message}: expected None, got Some"));
        }
    }

    /// Assert a Result is Ok
    #[track_caller]
    pub fn assert_ok<T, E>(&mut self, result: &Result<T, E>, message: &str) {
        self.checks += 1;
        if result.is_err() {
            self.record_failure(format!("{message}: expected Ok, got Err"));
        }
    }

    /// Assert a Result is Err
    #[track_caller]
    pub fn assert_err<T, E>(&mut self, result: &Result<T, E>, message: &str) {
        self.checks += 1;
        if result.is_ok() {
            self.record_failure(format!("{message}: expected Err, got Ok"));
        }
    }

    /// Assert a string contains a substring
    #[track_caller]
    pub fn assert_contains(&mut self, haystack: &str, needle: &str, message: &str) {
        self.checks += 1;
        if !haystack.contains(needle) {
            self.record_failure(format!(
                "{message}: expected '{haystack}' to contain '{needle}'"
            ));
        }
    }

    /// Assert a collection has the expected length
    #[track_caller]
    pub fn assert_len<T>(&mut self, collection: &[T], expected: usize, message: &str) {
        self.checks += 1;
        if collection.len() != expected {
            self.record_failure(format!(
                "{message}: expected length {expected}, got {}",
                collection.len()
            ));
        }
    }

    /// Assert a collection is empty
    #[track_caller]
    pub fn assert_empty<T>(&mut self, collection: &[T], message: &str) {
        self.checks += 1;
        if !collection.is_empty() {
            self.record_failure(format!(
                "{message}: expected empty collection, got {} element(s)",
                collection.len()
            ));
        }
    }

    /// Assert a collection is not empty
    #[track_caller]
    pub fn assert_not_empty<T>(&mut self, collection: &[T], message: &str) {
        self.checks += 1;
        if collection.is_empty() {
            self.record_failure(format!("{message}: expected non-empty collection"));
        }
    }

    /// Absorb a fluent expectation's recorded checks and failures
    #[track_caller]
    pub fn check(&mut self, expectation: impl Verifiable) {
        self.checks += expectation.checks();
        let description = expectation.description().map(str::to_owned);
        for message in expectation.failures() {
            let message = match &description {
                Some(prefix) => format!("{prefix}: {message}"),
                None => message.clone(),
            };
            self.record_failure(message);
        }
    }

    /// Record a custom failure
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.checks += 1;
        self.record_failure(message.into());
    }

    #[track_caller]
    fn record_failure(&mut self, message: String) {
        let caller = Location::caller();
        let failure = AssertionFailure::new(message, self.failures.len())
            .with_location(format!("{}:{}", caller.file(), caller.line()));
        self.failures.push(failure);
    }

    /// All recorded failures
    #[must_use]
    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    /// Number of recorded failures
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of assertions checked
    #[must_use]
    pub const fn assertion_count(&self) -> usize {
        self.checks
    }

    /// Whether every assertion passed so far
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Counts of passed and failed assertions
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        AssertionSummary {
            total: self.checks,
            passed: self.checks - self.failures.len(),
            failed: self.failures.len(),
        }
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.failures.clear();
        self.checks = 0;
    }

    /// Succeed if every assertion passed
    ///
    /// # Errors
    ///
    /// Returns a [`SoftAssertionError`] listing every recorded failure.
    pub fn verify(&self) -> Result<(), SoftAssertionError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(SoftAssertionError::new(&self.failures, self.checks))
        }
    }
}

/// Counts of assertion outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionSummary {
    /// Total assertions checked
    pub total: usize,
    /// Assertions that passed
    pub passed: usize,
    /// Assertions that failed
    pub failed: usize,
}

/// Error carrying every soft assertion failure of a run
#[derive(Debug, Clone)]
pub struct SoftAssertionError {
    /// All failure messages, in recording order
    pub failures: Vec<String>,
    /// Number of failed assertions
    pub count: usize,
    /// Total assertions checked
    pub checks: usize,
}

impl SoftAssertionError {
    /// Build the error from recorded failures
    #[must_use]
    pub fn new(failures: &[AssertionFailure], checks: usize) -> Self {
        Self {
            failures: failures
                .iter()
                .map(|failure| match &failure.location {
                    Some(location) => format!("{} ({location})", failure.message),
                    None => failure.message.clone(),
                })
                .collect(),
            count: failures.len(),
            checks,
        }
    }
}

impl fmt::Display for SoftAssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} of {} assertion(s) failed:", self.count, self.checks)?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "  {}. {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for SoftAssertionError {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_tests {
        use super::*;

        #[test]
        fn test_new_collector_is_clean() {
            let softly = SoftAssertions::new();
            assert!(softly.all_passed());
            assert_eq!(softly.failure_count(), 0);
            assert_eq!(softly.assertion_count(), 0);
        }

        #[test]
        fn test_passing_assertions_leave_no_failures() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&42, &42, "match");
            softly.assert_true(true, "hold");
            softly.assert_ne(&1, &2, "differ");
            assert!(softly.all_passed());
            assert_eq!(softly.assertion_count(), 3);
        }

        #[test]
        fn test_failures_are_collected_not_fatal() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&1, &2, "first");
            softly.assert_true(false, "second");
            softly.assert_contains("hello", "world", "third");
            assert_eq!(softly.failure_count(), 3);
            assert_eq!(softly.assertion_count(), 3);
        }

        #[test]
        fn test_failures_record_the_call_site() {
            let mut softly = SoftAssertions::new();
            softly.fail("deliberate");
            let location = softly.failures()[0].location.as_deref().unwrap();
            assert!(location.contains("soft.rs"));
        }
    }

    mod option_result_tests {
        use super::*;

        #[test]
        fn test_option_assertions() {
            let mut softly = SoftAssertions::new();
            softly.assert_some(&Some(1), "some");
            softly.assert_none::<i32>(&None, "none");
            assert!(softly.all_passed());

            softly.assert_some::<i32>(&None, "some");
            softly.assert_none(&Some(1), "none");
            assert_eq!(softly.failure_count(), 2);
        }

        #[test]
        fn test_result_assertions() {
            let mut softly = SoftAssertions::new();
            let ok: Result<i32, &str> = Ok(1);
            let err: Result<i32, &str> = Err("boom");
            softly.assert_ok(&ok, "ok");
            softly.assert_err(&err, "err");
            assert!(softly.all_passed());

            softly.assert_ok(&err, "ok");
            softly.assert_err(&ok, "err");
            assert_eq!(softly.failure_count(), 2);
        }
    }

    mod collection_tests {
        use super::*;

        #[test]
        fn test_len_and_emptiness() {
            let mut softly = SoftAssertions::new();
            softly.assert_len(&[1, 2, 3], 3, "len");
            softly.assert_not_empty(&[1], "non-empty");
            let empty: Vec<i32> = vec![];
            softly.assert_empty(&empty, "empty");
            assert!(softly.all_passed());
        }

        #[test]
        fn test_len_mismatch_reports_actual() {
            let mut softly = SoftAssertions::new();
            softly.assert_len(&[1, 2], 3, "len");
            assert!(softly.failures()[0].message.contains("got 2"));
        }
    }

    mod check_tests {
        use super::*;
        use crate::assertion::fluent::expect;

        #[test]
        fn test_check_absorbs_fluent_failures() {
            let strings = vec!["ONE", "TWO", "THREE"];
            let mut softly = SoftAssertions::new();
            softly.check(
                expect(&strings)
                    .contains(&"ONE")
                    .has_size(3)
                    .does_not_contain(&"FOUR"),
            );
            assert!(softly.all_passed());
            assert_eq!(softly.assertion_count(), 3);

            softly.check(expect(&strings).contains(&"FOUR").has_size(5));
            assert_eq!(softly.failure_count(), 2);
            assert_eq!(softly.assertion_count(), 5);
        }

        #[test]
        fn test_check_prefixes_described_chains() {
            let mut softly = SoftAssertions::new();
            softly.check(expect(1_i64).described_as("counter").is_equal_to(2));
            assert!(softly.failures()[0].message.starts_with("counter: "));
        }
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_verify_passes_when_clean() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&1, &1, "match");
            assert!(softly.verify().is_ok());
        }

        #[test]
        fn test_verify_lists_every_failure() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&1, &2, "first");
            softly.assert_true(false, "second");
            softly.assert_eq(&3, &3, "passes");
            let err = softly.verify().unwrap_err();
            assert_eq!(err.count, 2);
            assert_eq!(err.checks, 3);

            let display = format!("{err}");
            assert!(display.contains("2 of 3 assertion(s) failed"));
            assert!(display.contains("1. first"));
            assert!(display.contains("2. second"));
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_summary_counts() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&1, &1, "pass");
            softly.assert_eq(&1, &2, "fail");
            softly.assert_true(true, "pass");
            let summary = softly.summary();
            assert_eq!(summary.total, 3);
            assert_eq!(summary.passed, 2);
            assert_eq!(summary.failed, 1);
        }

        #[test]
        fn test_clear_resets_everything() {
            let mut softly = SoftAssertions::new();
            softly.assert_eq(&1, &2, "fail");
            softly.clear();
            assert!(softly.all_passed());
            assert_eq!(softly.assertion_count(), 0);
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn test_failure_fields() {
            let failure = AssertionFailure::new("broken", 0).with_location("soft.rs:1");
            assert_eq!(failure.message, "broken");
            assert_eq!(failure.location, Some("soft.rs:1".to_string()));
            assert_eq!(failure.index, 0);
            assert!(failure.timestamp.is_some());
        }
    }
}
