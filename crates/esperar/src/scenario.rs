//! Scenario steps: regex-bound step definitions run over plain-text lines.
//!
//! A [`StepRegistry`] maps step patterns to handlers; a [`Scenario`] is a
//! named, ordered list of step lines, written in code or deserialized from
//! JSON, executed against a registry line by line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised while registering or running scenario steps
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A step pattern failed to compile
    #[error("invalid step pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A scenario definition failed to parse
    #[error("invalid scenario definition: {0}")]
    Definition(#[from] serde_json::Error),

    /// No registered step matches the line
    #[error("no step definition matches '{line}'")]
    NoMatch {
        /// The unmatched step line
        line: String,
    },

    /// A step handler reported a failure
    #[error("step '{line}' failed: {message}")]
    Step {
        /// The step line that failed
        line: String,
        /// Failure detail from the handler
        message: String,
    },
}

// =============================================================================
// STEP ARGUMENTS
// =============================================================================

/// Capture groups extracted from a matched step line
#[derive(Debug, Clone)]
pub struct StepArgs {
    values: Vec<String>,
}

impl StepArgs {
    fn from_captures(captures: &regex::Captures<'_>) -> Self {
        Self {
            values: captures
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                .collect(),
        }
    }

    /// Capture group `i` (0-based, excluding the whole-match group)
    #[must_use]
    pub fn get(&self, i: usize) -> &str {
        self.values.get(i).map_or("", String::as_str)
    }

    /// Parse capture group `i` into `T`
    ///
    /// # Errors
    ///
    /// Returns the parse failure as a plain message, ready to bubble out of
    /// a step handler.
    pub fn parse<T: std::str::FromStr>(&self, i: usize) -> Result<T, String>
    where
        T::Err: fmt::Display,
    {
        self.get(i)
            .parse()
            .map_err(|error| format!("capture {i} ('{}'): {error}", self.get(i)))
    }

    /// Number of capture groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the pattern had no capture groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// STEP REGISTRY
// =============================================================================

type StepHandler = Box<dyn Fn(&StepArgs) -> Result<(), String> + Send + Sync>;

struct StepDef {
    pattern: Regex,
    handler: StepHandler,
}

impl fmt::Debug for StepDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDef")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Registry of step definitions.
///
/// Patterns are tried in registration order; the first match wins.
#[derive(Debug, Default)]
pub struct StepRegistry {
    steps: Vec<StepDef>,
}

impl StepRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step definition.
    ///
    /// `pattern` is a regex matched against whole step lines; its capture
    /// groups are handed to `handler` as [`StepArgs`].
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Pattern`] if the pattern does not compile.
    pub fn then<H>(&mut self, pattern: &str, handler: H) -> Result<(), ScenarioError>
    where
        H: Fn(&StepArgs) -> Result<(), String> + Send + Sync + 'static,
    {
        let pattern = Regex::new(pattern)?;
        self.steps.push(StepDef {
            pattern,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Run a single step line against the registry.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::NoMatch`] if nothing matches,
    /// [`ScenarioError::Step`] if the handler fails.
    pub fn run_line(&self, line: &str) -> Result<(), ScenarioError> {
        for step in &self.steps {
            if let Some(captures) = step.pattern.captures(line) {
                let args = StepArgs::from_captures(&captures);
                tracing::debug!(step = line, captures = args.len(), "running step");
                return (step.handler)(&args).map_err(|message| ScenarioError::Step {
                    line: line.to_owned(),
                    message,
                });
            }
        }
        Err(ScenarioError::NoMatch {
            line: line.to_owned(),
        })
    }

    /// Number of registered step definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the registry has no step definitions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// =============================================================================
// SCENARIO
// =============================================================================

/// A named, ordered list of step lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, used in tracing output
    pub name: String,
    /// Step lines, run in order
    pub steps: Vec<String>,
}

impl Scenario {
    /// Create an empty scenario
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step line
    #[must_use]
    pub fn step(mut self, line: impl Into<String>) -> Self {
        self.steps.push(line.into());
        self
    }

    /// Deserialize a scenario from JSON
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Definition`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run every line against `registry`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ScenarioError`] raised by a line.
    pub fn run(&self, registry: &StepRegistry) -> Result<ScenarioReport, ScenarioError> {
        tracing::info!(scenario = %self.name, steps = self.steps.len(), "running scenario");
        for line in &self.steps {
            registry.run_line(line)?;
        }
        Ok(ScenarioReport {
            steps_run: self.steps.len(),
        })
    }
}

/// Result of a completed scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Lines executed
    pub steps_run: usize,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn person_registry(seen: &Arc<AtomicUsize>) -> StepRegistry {
        let mut registry = StepRegistry::new();
        let seen = Arc::clone(seen);
        registry
            .then(r"^A person named (\w+) is (\d+) years old$", move |args| {
                let name = args.get(0);
                let age: u32 = args.parse(1)?;
                if name.is_empty() || age == 0 {
                    return Err("implausible person".into());
                }
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        registry
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_matching_line_runs_the_handler() {
            let seen = Arc::new(AtomicUsize::new(0));
            let registry = person_registry(&seen);
            registry
                .run_line("A person named Alice is 42 years old")
                .unwrap();
            assert_eq!(seen.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn test_unmatched_line_is_an_error() {
            let seen = Arc::new(AtomicUsize::new(0));
            let registry = person_registry(&seen);
            let err = registry.run_line("Nothing matches this").unwrap_err();
            assert!(matches!(err, ScenarioError::NoMatch { .. }));
            assert_eq!(seen.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn test_handler_failure_carries_line_and_message() {
            let seen = Arc::new(AtomicUsize::new(0));
            let registry = person_registry(&seen);
            let err = registry
                .run_line("A person named Bob is 0 years old")
                .unwrap_err();
            match err {
                ScenarioError::Step { line, message } => {
                    assert!(line.contains("Bob"));
                    assert_eq!(message, "implausible person");
                }
                _ => panic!("expected Step error"),
            }
        }

        #[test]
        fn test_capture_parse_failure_is_a_step_failure() {
            let mut registry = StepRegistry::new();
            registry
                .then(r"^the count is (.+)$", |args| {
                    let _count: u32 = args.parse(0)?;
                    Ok(())
                })
                .unwrap();
            let err = registry.run_line("the count is plenty").unwrap_err();
            match err {
                ScenarioError::Step { message, .. } => assert!(message.contains("plenty")),
                _ => panic!("expected Step error"),
            }
        }

        #[test]
        fn test_bad_pattern_is_rejected_at_registration() {
            let mut registry = StepRegistry::new();
            let err = registry.then("(unclosed", |_| Ok(())).unwrap_err();
            assert!(matches!(err, ScenarioError::Pattern(_)));
            assert!(registry.is_empty());
        }

        #[test]
        fn test_first_matching_pattern_wins() {
            let hits = Arc::new(AtomicUsize::new(0));
            let mut registry = StepRegistry::new();
            let first = Arc::clone(&hits);
            registry
                .then("^it works$", move |_| {
                    first.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
            registry
                .then("^it works$", |_| Err("should never run".into()))
                .unwrap();
            registry.run_line("it works").unwrap();
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn test_scenario_runs_all_steps_in_order() {
            let seen = Arc::new(AtomicUsize::new(0));
            let registry = person_registry(&seen);
            let scenario = Scenario::new("census")
                .step("A person named Alice is 42 years old")
                .step("A person named Bob is 7 years old");
            let report = scenario.run(&registry).unwrap();
            assert_eq!(report.steps_run, 2);
            assert_eq!(seen.load(Ordering::SeqCst), 2);
        }

        #[test]
        fn test_scenario_stops_at_first_failure() {
            let seen = Arc::new(AtomicUsize::new(0));
            let registry = person_registry(&seen);
            let scenario = Scenario::new("census")
                .step("A person named Alice is 42 years old")
                .step("unmatched line")
                .step("A person named Bob is 7 years old");
            assert!(scenario.run(&registry).is_err());
            assert_eq!(seen.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn test_scenario_from_json() {
            let json = r#"{
                "name": "census",
                "steps": ["A person named Carol is 30 years old"]
            }"#;
            let scenario = Scenario::from_json(json).unwrap();
            assert_eq!(scenario.name, "census");

            let seen = Arc::new(AtomicUsize::new(0));
            let report = scenario.run(&person_registry(&seen)).unwrap();
            assert_eq!(report.steps_run, 1);
        }

        #[test]
        fn test_malformed_json_is_a_definition_error() {
            let err = Scenario::from_json("{not json").unwrap_err();
            assert!(matches!(err, ScenarioError::Definition(_)));
        }
    }
}
