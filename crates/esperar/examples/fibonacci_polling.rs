//! Example: Fibonacci-backoff polling
//!
//! Demonstrates: waiting for a slowly-converging condition with delays
//! drawn from the Fibonacci sequence, retriable vs fatal failures, and
//! timeouts.
//!
//! Run with: `cargo run --example fibonacci_polling`

use esperar::prelude::*;
use std::cell::Cell;
use std::time::Duration;

fn main() -> EsperarResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Fibonacci polling example ===\n");

    // 1. A condition that converges after a few attempts. Iteration state
    //    is owned by the closure, not a global.
    println!("1. Waiting for the iteration counter to reach 5...");
    let iteration = Cell::new(0_u32);
    let policy = PollPolicy::new(Duration::from_secs(60)).with_backoff(Backoff::Fibonacci {
        unit: Duration::from_millis(100),
        offset: 3,
    });

    let result = Poller::new(policy)
        .with_description("iteration reaches 5")
        .run(|| {
            let value = iteration.get() + 1;
            iteration.set(value);
            println!("   attempt sees iteration {value}");
            if value % 2 == 0 {
                CheckOutcome::retry(format!("iteration {value} is even"))
            } else if value == 5 {
                CheckOutcome::Complete(value)
            } else {
                CheckOutcome::retry(format!("iteration {value} != 5"))
            }
        })?;
    println!(
        "   satisfied with value {} after {} attempts in {:?}\n",
        result.value, result.attempts, result.elapsed
    );

    // 2. A condition that never converges within its budget.
    println!("2. A condition that times out...");
    let policy = PollPolicy::new(Duration::from_millis(300)).with_backoff(Backoff::Linear {
        base: Duration::from_millis(50),
    });
    match Poller::new(policy).run::<u32, _>(|| CheckOutcome::retry("still even")) {
        Ok(_) => println!("   unexpectedly satisfied"),
        Err(error) => println!("   gave up as expected: {error}\n"),
    }

    // 3. A fatal failure aborts immediately, however much time remains.
    println!("3. A fatal failure...");
    let policy = PollPolicy::new(Duration::from_secs(3600));
    match Poller::new(policy).run::<u32, _>(|| CheckOutcome::fatal("credentials rejected")) {
        Ok(_) => println!("   unexpectedly satisfied"),
        Err(error) => println!("   aborted as expected: {error}\n"),
    }

    // 4. Plain boolean predicates via poll_until.
    println!("4. poll_until with a boolean predicate...");
    let countdown = Cell::new(3_u32);
    poll_until(
        || {
            let left = countdown.get().saturating_sub(1);
            countdown.set(left);
            left == 0
        },
        PollPolicy::fast(),
    )?;
    println!("   predicate turned true\n");

    println!("Fibonacci polling example completed");
    Ok(())
}
