//! Example: Soft assertions
//!
//! Demonstrates: collecting every assertion failure before reporting,
//! instead of stopping at the first.
//!
//! Run with: `cargo run --example soft_assertions`

use esperar::prelude::*;

fn main() {
    println!("=== Soft assertions example ===\n");

    // 1. All passing: verify() is Ok
    println!("1. A clean run...");
    let strings = vec!["ONE", "TWO", "THREE"];
    let mut softly = SoftAssertions::new();
    softly.assert_len(&strings, 3, "three entries");
    softly.assert_contains("ONE TWO THREE", "TWO", "joined form");
    softly.check(
        expect(&strings)
            .contains(&"ONE")
            .contains_only_once(&"ONE")
            .contains_exactly(&["ONE", "TWO", "THREE"])
            .has_no_duplicates()
            .size_between(2, 4)
            .does_not_contain(&"FOUR"),
    );
    let summary = softly.summary();
    println!(
        "   {} checks, {} passed, {} failed\n",
        summary.total, summary.passed, summary.failed
    );

    // 2. Mixed results: every failure is collected, then reported at once
    println!("2. A run with several failures...");
    let mut softly = SoftAssertions::new();
    softly.assert_eq(&1, &2, "first check");
    softly.assert_true(false, "second check");
    softly.assert_len(&strings, 5, "third check");
    softly.assert_eq(&3, &3, "this one passes");
    match softly.verify() {
        Ok(()) => println!("   unexpectedly clean"),
        Err(error) => println!("   reported together:\n{error}"),
    }

    println!("Soft assertions example completed");
}
