//! Fluent per-value expectations.
//!
//! [`expect`] picks an assertion type for the value via [`Expectable`];
//! matcher methods consume and return the assertion so they chain, every
//! failed matcher is remembered, and [`Verifiable::verify`] reports them
//! all at once:
//!
//! ```
//! use esperar::{expect, Verifiable};
//!
//! expect(10_i64)
//!     .is_greater_than(5)
//!     .is_not_negative()
//!     .is_not_zero()
//!     .verify()?;
//! # Ok::<(), esperar::AssertionError>(())
//! ```
//!
//! Implementing [`Expectable`] for your own types plugs custom assertion
//! types into the same entry point.

use super::{Checks, Verifiable};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt::Debug;

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Types that have a dedicated fluent assertion type
pub trait Expectable {
    /// The assertion type [`expect`] returns for this value
    type Assert;

    /// Wrap the value in its assertion type
    fn into_assert(self) -> Self::Assert;
}

/// Start a fluent expectation over `value`
pub fn expect<E: Expectable>(value: E) -> E::Assert {
    value.into_assert()
}

macro_rules! impl_verifiable {
    ($assert:ident $(<$($generics:tt),*>)?) => {
        impl $(<$($generics),*>)? Verifiable for $assert $(<$($generics),*>)? {
            fn description(&self) -> Option<&str> {
                self.checks.description()
            }
            fn failures(&self) -> &[String] {
                self.checks.failures()
            }
            fn checks(&self) -> usize {
                self.checks.performed()
            }
        }
    };
}

// =============================================================================
// INTEGERS
// =============================================================================

/// Fluent assertions over integer values
#[derive(Debug, Clone)]
pub struct IntAssert {
    actual: i64,
    checks: Checks,
}

impl IntAssert {
    /// Start asserting over `actual`
    #[must_use]
    pub fn new(actual: i64) -> Self {
        Self {
            actual,
            checks: Checks::default(),
        }
    }

    /// Prefix every failure report with `description`
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.checks.describe(description);
        self
    }

    /// The value equals `expected`
    #[must_use]
    pub fn is_equal_to(mut self, expected: i64) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual == expected, || format!("expected {expected}, got {actual}"));
        self
    }

    /// The value differs from `other`
    #[must_use]
    pub fn is_not_equal_to(mut self, other: i64) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual != other, || format!("expected a value other than {other}"));
        self
    }

    /// The value is strictly greater than `bound`
    #[must_use]
    pub fn is_greater_than(mut self, bound: i64) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual > bound, || format!("expected {actual} to be greater than {bound}"));
        self
    }

    /// The value is strictly less than `bound`
    #[must_use]
    pub fn is_less_than(mut self, bound: i64) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual < bound, || format!("expected {actual} to be less than {bound}"));
        self
    }

    /// The value is zero or positive
    #[must_use]
    pub fn is_not_negative(mut self) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual >= 0, || format!("expected {actual} to be non-negative"));
        self
    }

    /// The value is not zero
    #[must_use]
    pub fn is_not_zero(mut self) -> Self {
        let actual = self.actual;
        self.checks.record(actual != 0, || "expected a non-zero value".into());
        self
    }

    /// The value lies in `[low, high]`
    #[must_use]
    pub fn is_between(mut self, low: i64, high: i64) -> Self {
        let actual = self.actual;
        self.checks.record(actual >= low && actual <= high, || {
            format!("expected {actual} to be in [{low}, {high}]")
        });
        self
    }
}

impl_verifiable!(IntAssert);

impl Expectable for i64 {
    type Assert = IntAssert;
    fn into_assert(self) -> IntAssert {
        IntAssert::new(self)
    }
}

impl Expectable for i32 {
    type Assert = IntAssert;
    fn into_assert(self) -> IntAssert {
        IntAssert::new(i64::from(self))
    }
}

impl Expectable for u32 {
    type Assert = IntAssert;
    fn into_assert(self) -> IntAssert {
        IntAssert::new(i64::from(self))
    }
}

// =============================================================================
// STRINGS
// =============================================================================

/// Fluent assertions over string slices
#[derive(Debug, Clone)]
pub struct StrAssert<'a> {
    actual: &'a str,
    checks: Checks,
}

impl<'a> StrAssert<'a> {
    /// Start asserting over `actual`
    #[must_use]
    pub fn new(actual: &'a str) -> Self {
        Self {
            actual,
            checks: Checks::default(),
        }
    }

    /// Prefix every failure report with `description`
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.checks.describe(description);
        self
    }

    /// The string equals `expected`
    #[must_use]
    pub fn is_equal_to(mut self, expected: &str) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual == expected, || format!("expected '{expected}', got '{actual}'"));
        self
    }

    /// The string is not empty
    #[must_use]
    pub fn is_not_empty(mut self) -> Self {
        let actual = self.actual;
        self.checks
            .record(!actual.is_empty(), || "expected a non-empty string".into());
        self
    }

    /// The string contains `needle`
    #[must_use]
    pub fn contains(mut self, needle: &str) -> Self {
        let actual = self.actual;
        self.checks.record(actual.contains(needle), || {
            format!("expected '{actual}' to contain '{needle}'")
        });
        self
    }

    /// The string contains `needle` exactly once
    #[must_use]
    pub fn contains_only_once(mut self, needle: &str) -> Self {
        let actual = self.actual;
        let occurrences = actual.matches(needle).count();
        self.checks.record(occurrences == 1, || {
            format!("expected '{actual}' to contain '{needle}' exactly once, found {occurrences}")
        });
        self
    }

    /// The string does not contain `needle`
    #[must_use]
    pub fn does_not_contain(mut self, needle: &str) -> Self {
        let actual = self.actual;
        self.checks.record(!actual.contains(needle), || {
            format!("expected '{actual}' not to contain '{needle}'")
        });
        self
    }

    /// The string starts with `prefix`
    #[must_use]
    pub fn starts_with(mut self, prefix: &str) -> Self {
        let actual = self.actual;
        self.checks.record(actual.starts_with(prefix), || {
            format!("expected '{actual}' to start with '{prefix}'")
        });
        self
    }

    /// The string ends with `suffix`
    #[must_use]
    pub fn ends_with(mut self, suffix: &str) -> Self {
        let actual = self.actual;
        self.checks.record(actual.ends_with(suffix), || {
            format!("expected '{actual}' to end with '{suffix}'")
        });
        self
    }

    /// The string has exactly `expected` bytes
    #[must_use]
    pub fn has_length(mut self, expected: usize) -> Self {
        let actual = self.actual;
        self.checks.record(actual.len() == expected, || {
            format!("expected length {expected}, got {}", actual.len())
        });
        self
    }

    /// The string matches the regex `pattern`.
    ///
    /// An invalid pattern counts as a failed check, not a panic.
    #[must_use]
    pub fn matches(mut self, pattern: &str) -> Self {
        let actual = self.actual;
        match Regex::new(pattern) {
            Ok(regex) => {
                self.checks.record(regex.is_match(actual), || {
                    format!("expected '{actual}' to match /{pattern}/")
                });
            }
            Err(error) => {
                self.checks
                    .record(false, || format!("invalid pattern /{pattern}/: {error}"));
            }
        }
        self
    }
}

impl_verifiable!(StrAssert<'a>);

impl<'a> Expectable for &'a str {
    type Assert = StrAssert<'a>;
    fn into_assert(self) -> StrAssert<'a> {
        StrAssert::new(self)
    }
}

impl<'a> Expectable for &'a String {
    type Assert = StrAssert<'a>;
    fn into_assert(self) -> StrAssert<'a> {
        StrAssert::new(self)
    }
}

// =============================================================================
// SLICES
// =============================================================================

/// Fluent assertions over slices and vectors
#[derive(Debug, Clone)]
pub struct SliceAssert<'a, T> {
    actual: &'a [T],
    checks: Checks,
}

impl<'a, T: PartialEq + Debug> SliceAssert<'a, T> {
    /// Start asserting over `actual`
    #[must_use]
    pub fn new(actual: &'a [T]) -> Self {
        Self {
            actual,
            checks: Checks::default(),
        }
    }

    /// Prefix every failure report with `description`
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.checks.describe(description);
        self
    }

    /// The slice contains `element`
    #[must_use]
    pub fn contains(mut self, element: &T) -> Self {
        let actual = self.actual;
        self.checks.record(actual.contains(element), || {
            format!("expected {actual:?} to contain {element:?}")
        });
        self
    }

    /// The slice holds `element` at `index`
    #[must_use]
    pub fn contains_at(mut self, element: &T, index: usize) -> Self {
        let actual = self.actual;
        self.checks.record(actual.get(index) == Some(element), || {
            format!("expected {element:?} at index {index} of {actual:?}")
        });
        self
    }

    /// The slice contains `element` exactly once
    #[must_use]
    pub fn contains_only_once(mut self, element: &T) -> Self {
        let actual = self.actual;
        let occurrences = actual.iter().filter(|candidate| *candidate == element).count();
        self.checks.record(occurrences == 1, || {
            format!("expected {actual:?} to contain {element:?} exactly once, found {occurrences}")
        });
        self
    }

    /// The slice equals `expected` element for element
    #[must_use]
    pub fn contains_exactly(mut self, expected: &[T]) -> Self {
        let actual = self.actual;
        self.checks.record(actual == expected, || {
            format!("expected exactly {expected:?}, got {actual:?}")
        });
        self
    }

    /// The slice holds `sequence` as a contiguous run
    #[must_use]
    pub fn contains_sequence(mut self, sequence: &[T]) -> Self {
        let actual = self.actual;
        let found = sequence.is_empty()
            || actual
                .windows(sequence.len())
                .any(|window| window == sequence);
        self.checks.record(found, || {
            format!("expected {actual:?} to contain the sequence {sequence:?}")
        });
        self
    }

    /// The slice does not contain `element`
    #[must_use]
    pub fn does_not_contain(mut self, element: &T) -> Self {
        let actual = self.actual;
        self.checks.record(!actual.contains(element), || {
            format!("expected {actual:?} not to contain {element:?}")
        });
        self
    }

    /// No element appears twice
    #[must_use]
    pub fn has_no_duplicates(mut self) -> Self {
        let actual = self.actual;
        let duplicated = actual
            .iter()
            .enumerate()
            .any(|(i, element)| actual[..i].contains(element));
        self.checks.record(!duplicated, || {
            format!("expected {actual:?} to have no duplicates")
        });
        self
    }

    /// The slice is not empty
    #[must_use]
    pub fn is_not_empty(mut self) -> Self {
        let actual = self.actual;
        self.checks
            .record(!actual.is_empty(), || "expected a non-empty collection".into());
        self
    }

    /// The slice has exactly `expected` elements
    #[must_use]
    pub fn has_size(mut self, expected: usize) -> Self {
        let actual = self.actual;
        self.checks.record(actual.len() == expected, || {
            format!("expected size {expected}, got {}", actual.len())
        });
        self
    }

    /// The slice has more than `bound` elements
    #[must_use]
    pub fn size_greater_than(mut self, bound: usize) -> Self {
        let actual = self.actual;
        self.checks.record(actual.len() > bound, || {
            format!("expected more than {bound} element(s), got {}", actual.len())
        });
        self
    }

    /// The slice has at most `bound` elements
    #[must_use]
    pub fn size_at_most(mut self, bound: usize) -> Self {
        let actual = self.actual;
        self.checks.record(actual.len() <= bound, || {
            format!("expected at most {bound} element(s), got {}", actual.len())
        });
        self
    }

    /// The element count lies in `[low, high]`
    #[must_use]
    pub fn size_between(mut self, low: usize, high: usize) -> Self {
        let actual = self.actual;
        let len = actual.len();
        self.checks.record(len >= low && len <= high, || {
            format!("expected between {low} and {high} element(s), got {len}")
        });
        self
    }
}

impl<'a, T: PartialEq + Debug> Verifiable for SliceAssert<'a, T> {
    fn description(&self) -> Option<&str> {
        self.checks.description()
    }
    fn failures(&self) -> &[String] {
        self.checks.failures()
    }
    fn checks(&self) -> usize {
        self.checks.performed()
    }
}

impl<'a, T: PartialEq + Debug> Expectable for &'a [T] {
    type Assert = SliceAssert<'a, T>;
    fn into_assert(self) -> SliceAssert<'a, T> {
        SliceAssert::new(self)
    }
}

impl<'a, T: PartialEq + Debug> Expectable for &'a Vec<T> {
    type Assert = SliceAssert<'a, T>;
    fn into_assert(self) -> SliceAssert<'a, T> {
        SliceAssert::new(self)
    }
}

// =============================================================================
// DATES
// =============================================================================

/// Fluent assertions over calendar dates
#[derive(Debug, Clone)]
pub struct DateAssert {
    actual: NaiveDate,
    checks: Checks,
}

impl DateAssert {
    /// Start asserting over `actual`
    #[must_use]
    pub fn new(actual: NaiveDate) -> Self {
        Self {
            actual,
            checks: Checks::default(),
        }
    }

    /// Prefix every failure report with `description`
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.checks.describe(description);
        self
    }

    /// The date equals `expected`
    #[must_use]
    pub fn is_equal_to(mut self, expected: NaiveDate) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual == expected, || format!("expected {expected}, got {actual}"));
        self
    }

    /// The date is strictly before `bound`
    #[must_use]
    pub fn is_before(mut self, bound: NaiveDate) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual < bound, || format!("expected {actual} to be before {bound}"));
        self
    }

    /// The date is strictly after `bound`
    #[must_use]
    pub fn is_after(mut self, bound: NaiveDate) -> Self {
        let actual = self.actual;
        self.checks
            .record(actual > bound, || format!("expected {actual} to be after {bound}"));
        self
    }

    /// The date lies strictly between `low` and `high`, both exclusive
    #[must_use]
    pub fn is_strictly_between(mut self, low: NaiveDate, high: NaiveDate) -> Self {
        let actual = self.actual;
        self.checks.record(actual > low && actual < high, || {
            format!("expected {actual} to be strictly between {low} and {high}")
        });
        self
    }
}

impl_verifiable!(DateAssert);

impl Expectable for NaiveDate {
    type Assert = DateAssert;
    fn into_assert(self) -> DateAssert {
        DateAssert::new(self)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Fluent assertions over error values.
///
/// Captures the error's display message and whether it carries a source, so
/// the error itself does not need to outlive the assertion.
#[derive(Debug, Clone)]
pub struct ErrAssert {
    message: String,
    has_source: bool,
    checks: Checks,
}

/// Start a fluent expectation over an error value
pub fn expect_error<E: std::error::Error>(error: &E) -> ErrAssert {
    ErrAssert {
        message: error.to_string(),
        has_source: error.source().is_some(),
        checks: Checks::default(),
    }
}

impl ErrAssert {
    /// Prefix every failure report with `description`
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.checks.describe(description);
        self
    }

    /// The error's message equals `expected`
    #[must_use]
    pub fn has_message(mut self, expected: &str) -> Self {
        let message = self.message.clone();
        self.checks.record(message == expected, || {
            format!("expected message '{expected}', got '{message}'")
        });
        self
    }

    /// The error's message contains `needle`
    #[must_use]
    pub fn has_message_containing(mut self, needle: &str) -> Self {
        let message = self.message.clone();
        self.checks.record(message.contains(needle), || {
            format!("expected message '{message}' to contain '{needle}'")
        });
        self
    }

    /// The error has no underlying source
    #[must_use]
    pub fn has_no_source(mut self) -> Self {
        let has_source = self.has_source;
        self.checks
            .record(!has_source, || "expected an error without a source".into());
        self
    }

    /// The error has an underlying source
    #[must_use]
    pub fn has_source(mut self) -> Self {
        let has_source = self.has_source;
        self.checks
            .record(has_source, || "expected an error with a source".into());
        self
    }
}

impl_verifiable!(ErrAssert);

// =============================================================================
// TESTS
// =============================================================================
