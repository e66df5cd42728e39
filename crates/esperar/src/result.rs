//! Result and error types for Esperar.

use crate::assertion::soft::SoftAssertionError;
use crate::assertion::AssertionError;
use crate::poll::PollError;
use crate::scenario::ScenarioError;
use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// Polling finished without the condition being satisfied
    #[error(transparent)]
    Poll(#[from] PollError),

    /// A fluent expectation failed
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// One or more soft assertions failed
    #[error(transparent)]
    SoftAssertion(#[from] SoftAssertionError),

    /// A scenario step failed to parse or run
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_poll_errors_convert() {
        let err: EsperarError = PollError::TimedOut {
            attempts: 1,
            elapsed: Duration::ZERO,
            last_failure: "never".into(),
        }
        .into();
        assert!(matches!(err, EsperarError::Poll(_)));
        assert!(format!("{err}").contains("never"));
    }

    #[test]
    fn test_scenario_errors_convert() {
        let err: EsperarError = ScenarioError::NoMatch {
            line: "dangling".into(),
        }
        .into();
        assert!(matches!(err, EsperarError::Scenario(_)));
    }
}
