//! Example: Fluent assertions
//!
//! Demonstrates: chained expectations over integers, strings, collections,
//! dates, and errors.
//!
//! Run with: `cargo run --example fluent_assertions`

use chrono::NaiveDate;
use esperar::prelude::*;

fn main() -> EsperarResult<()> {
    println!("=== Fluent assertions example ===\n");

    // 1. Integers
    println!("1. Integer expectations...");
    expect(10_i64)
        .is_greater_than(5)
        .is_not_negative()
        .is_not_zero()
        .verify()?;
    println!("   passed\n");

    // 2. Strings, including regex matching
    println!("2. String expectations...");
    let name = "Michal";
    expect(name)
        .described_as(format!("name is {name}"))
        .is_not_empty()
        .is_equal_to("Michal")
        .contains_only_once("ic")
        .does_not_contain("mic")
        .ends_with("al")
        .matches("^Michal$")
        .verify()?;
    println!("   passed\n");

    // 3. Collections
    println!("3. Collection expectations...");
    let strings = vec!["ONE", "TWO", "THREE"];
    expect(&strings)
        .contains(&"ONE")
        .contains_at(&"TWO", 1)
        .contains_only_once(&"ONE")
        .contains_exactly(&["ONE", "TWO", "THREE"])
        .contains_sequence(&["TWO", "THREE"])
        .has_no_duplicates()
        .is_not_empty()
        .has_size(3)
        .size_greater_than(1)
        .size_at_most(3)
        .size_between(2, 4)
        .does_not_contain(&"FOUR")
        .verify()?;
    println!("   passed\n");

    // 4. Dates
    println!("4. Date expectations...");
    let year_2000 = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let year_2001 = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    let year_2002 = NaiveDate::from_ymd_opt(2002, 1, 1).unwrap();
    expect(year_2001)
        .is_strictly_between(year_2000, year_2002)
        .is_after(year_2000)
        .verify()?;
    println!("   passed\n");

    // 5. Errors
    println!("5. Error expectations...");
    let error = PollError::Aborted {
        attempt: 1,
        reason: "connection refused".into(),
    };
    expect_error(&error)
        .has_message_containing("connection refused")
        .has_no_source()
        .verify()?;
    println!("   passed\n");

    // 6. A failing chain reports every broken matcher at once
    println!("6. A failing chain...");
    match expect(-4_i64)
        .described_as("sensor reading")
        .is_not_negative()
        .is_not_zero()
        .is_between(0, 100)
        .verify()
    {
        Ok(()) => println!("   unexpectedly passed"),
        Err(error) => println!("   failed as expected:\n{error}\n"),
    }

    println!("Fluent assertions example completed");
    Ok(())
}
