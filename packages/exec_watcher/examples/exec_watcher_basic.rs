//! Demonstrates watching a unit of work and its downstream calls.
//!
//! Shows the three ways the watcher is usually wired in:
//! - Around a whole unit of work, reporting directly
//! - In a request filter that only logs slow requests
//! - In a data access helper that measures every command it executes
//!
//! Run with: `cargo run --example exec_watcher_basic`.

use std::thread;
use std::time::Duration;

use exec_watcher::{ExecutionWatcher, ThresholdLogger};

fn main() {
    tracing_subscriber::fmt().init();

    // A unit of work watched directly.
    let watcher = ExecutionWatcher::start();

    ExecutionWatcher::watch("Test1", || thread::sleep(Duration::from_millis(123)));
    let value = ExecutionWatcher::watch("Test1", || {
        thread::sleep(Duration::from_millis(456));
        1
    });

    let report = watcher.stop();
    println!("{}", report.render());
    println!("Work returned {value}");
    println!();

    // A request filter that logs requests taking 300 ms or more.
    let slow_requests = ThresholdLogger::from_env("SLOW_REQUEST_MS")
        .unwrap_or_else(|_| ThresholdLogger::new(Duration::from_millis(300)));

    for user_id in [1, 2] {
        let rows = slow_requests.run("GET /users/{id}/orders", || load_orders(user_id));
        println!("User {user_id} has {rows} orders");
    }

    // A message interceptor that must not delay the reply with log writes.
    let slow_messages = ThresholdLogger::new(Duration::from_millis(100)).in_background();
    let watcher = ExecutionWatcher::start();
    ExecutionWatcher::record_elapsed("deserialize_request", 40);
    let reply = execute_command("SELECT name FROM users WHERE id = 2", 90);
    let report = slow_messages.finish("UserService.GetName", watcher);
    println!("Replied with {reply} rows after {:.0} ms", report.elapsed_millis());

    // Give the background log write a moment to appear before the process exits.
    thread::sleep(Duration::from_millis(50));
}

fn load_orders(user_id: u64) -> usize {
    let delay = if user_id == 2 { 350 } else { 10 };
    execute_command("SELECT * FROM orders WHERE user_id = ?", delay)
}

/// Stand-in for a data access helper that measures every command it runs.
fn execute_command(command_text: &str, simulated_millis: u64) -> usize {
    ExecutionWatcher::watch(command_text, || {
        thread::sleep(Duration::from_millis(simulated_millis));
        command_text.len()
    })
}
