//! Example: Scenario steps
//!
//! Demonstrates: registering regex step definitions and running scenario
//! lines against them, in code and from JSON.
//!
//! Run with: `cargo run --example scenario_steps`

use esperar::prelude::*;

fn main() -> EsperarResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Scenario steps example ===\n");

    let mut registry = StepRegistry::new();
    registry.then(r"^A person named (\w+) is (\d+) years old$", |args| {
        let name = args.get(0);
        let age: u32 = args.parse(1)?;
        println!("   this is my name: {name} and I am {age} years old");
        Ok(())
    })?;

    // 1. Scenario built in code
    println!("1. Running a scenario built in code...");
    let report = Scenario::new("introductions")
        .step("A person named Alice is 42 years old")
        .step("A person named Bob is 7 years old")
        .run(&registry)?;
    println!("   {} step(s) run\n", report.steps_run);

    // 2. Scenario loaded from JSON
    println!("2. Running a scenario loaded from JSON...");
    let scenario = Scenario::from_json(
        r#"{
            "name": "census",
            "steps": ["A person named Carol is 30 years old"]
        }"#,
    )?;
    let report = scenario.run(&registry)?;
    println!("   {} step(s) run\n", report.steps_run);

    // 3. Unmatched lines fail loudly
    println!("3. A line with no step definition...");
    match registry.run_line("An unregistered step") {
        Ok(()) => println!("   unexpectedly matched"),
        Err(error) => println!("   rejected as expected: {error}\n"),
    }

    println!("Scenario steps example completed");
    Ok(())
}
