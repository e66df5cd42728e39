//! Example: Custom assertion types
//!
//! Demonstrates: plugging a domain type into `expect` by implementing
//! `Expectable`, so it chains and verifies like the built-in assertions.
//!
//! Run with: `cargo run --example custom_assertion`

use esperar::{expect, AssertionError, Expectable, Verifiable};

/// A domain type worth asserting over
struct User {
    name: String,
}

/// Fluent assertions over [`User`]
struct UserAssert {
    name: String,
    failures: Vec<String>,
    checks: usize,
}

impl UserAssert {
    fn has_name(mut self, expected: &str) -> Self {
        self.checks += 1;
        if self.name != expected {
            self.failures.push(format!(
                "expected user's name '{expected}', but was '{}'",
                self.name
            ));
        }
        self
    }
}

impl Verifiable for UserAssert {
    fn description(&self) -> Option<&str> {
        None
    }
    fn failures(&self) -> &[String] {
        &self.failures
    }
    fn checks(&self) -> usize {
        self.checks
    }
}

impl Expectable for &User {
    type Assert = UserAssert;
    fn into_assert(self) -> UserAssert {
        UserAssert {
            name: self.name.clone(),
            failures: Vec::new(),
            checks: 0,
        }
    }
}

fn main() -> Result<(), AssertionError> {
    println!("=== Custom assertion example ===\n");

    let user = User {
        name: String::from("David"),
    };

    println!("1. The custom matcher passes for David...");
    expect(&user).has_name("David").verify()?;
    println!("   passed\n");

    println!("2. ...and reports its own message otherwise");
    match expect(&user).has_name("Marc").verify() {
        Ok(()) => println!("   unexpectedly passed"),
        Err(error) => println!("   failed as expected: {error}\n"),
    }

    println!("Custom assertion example completed");
    Ok(())
}
