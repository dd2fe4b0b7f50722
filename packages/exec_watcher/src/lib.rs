#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Per-thread execution timing for finding out where slow work spends its time.
//!
//! Mark a unit of work as watched, record named sub-measurements inside it (typically
//! downstream calls such as queries or RPCs) and get a report with the total elapsed time
//! and every sub-measurement when the work ends.
//!
//! The core functionality includes:
//! - [`ExecutionWatcher`] - Starts and stops watching the current thread and records samples
//! - [`WatchReport`] - Snapshot of a finished session, with a plain text rendering
//! - [`Sample`] - One named sub-measurement
//! - [`ThresholdLogger`] - Logs reports of sessions that reached a time threshold
//!
//! # Simple usage
//!
//! ```
//! use exec_watcher::ExecutionWatcher;
//!
//! # fn run_query(sql: &str) -> usize { sql.len() }
//! let watcher = ExecutionWatcher::start();
//!
//! let users = ExecutionWatcher::watch("SELECT * FROM users", || run_query("SELECT * FROM users"));
//! let orders = ExecutionWatcher::watch("SELECT * FROM orders", || run_query("SELECT * FROM orders"));
//!
//! let report = watcher.stop();
//!
//! assert_eq!(report.samples().len(), 2);
//! println!("{}", report.render());
//! # let _ = (users, orders);
//! ```
//!
//! # Threading
//!
//! Each thread has its own session. Samples recorded on one thread never appear in the
//! report of another, and no synchronization happens between threads. A thread has at most
//! one session at a time; starting again replaces the unfinished one.
//!
//! Because the session belongs to the thread rather than the [`ExecutionWatcher`] value,
//! the watcher must be stopped on the thread that started it. The type system enforces this:
//! `ExecutionWatcher` is neither `Send` nor `Sync`. Work that hops between threads, such as
//! async tasks on a multithreaded executor, is not tracked.
//!
//! # Failure behavior
//!
//! Watching never fails. Missing sessions and empty labels only mean nothing is recorded; the
//! watched work always runs and its result or panic reaches the caller unchanged.

mod context;
mod error;
mod pal;
mod report;
mod sample;
mod threshold;
mod watcher;

pub use error::Error;
pub(crate) use error::Result;
pub use report::WatchReport;
pub use sample::Sample;
pub use threshold::ThresholdLogger;
pub use watcher::ExecutionWatcher;
