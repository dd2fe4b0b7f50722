//! Logging of watch reports for scopes that ran too long.
//!
//! This is the piece request filters and message interceptors need: start a watcher
//! when a unit of work begins, stop it when the work ends, and log the report only
//! when the total time reached a threshold.

use std::env;
use std::sync::LazyLock;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use tracing::{Dispatch, dispatcher, warn};

use crate::{Error, ExecutionWatcher, Result, WatchReport};

/// Where slow reports are written from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
    /// On the thread that stopped the watcher.
    Inline,

    /// On the shared background log thread, so the caller does not wait for the log write.
    Background,
}

/// A slow report waiting to be written by the background log thread.
#[derive(Debug)]
struct QueuedReport {
    /// The subscriber that was current on the thread that stopped the watcher.
    dispatch: Dispatch,
    scope: String,
    report: WatchReport,
}

/// Queue of the background log thread, started on first use.
///
/// `None` if the thread could not be started.
static BACKGROUND_LOG: LazyLock<Option<Sender<QueuedReport>>> = LazyLock::new(|| {
    let (sender, receiver) = mpsc::channel::<QueuedReport>();

    thread::Builder::new()
        .name("exec_watcher-log".to_owned())
        .spawn(move || {
            for queued in receiver {
                dispatcher::with_default(&queued.dispatch, || {
                    log_slow(&queued.scope, &queued.report);
                });
            }
        })
        .ok()
        .map(|_| sender)
});

/// Stops watchers and logs their reports when a time threshold is reached.
///
/// Reports are logged at WARN level through `tracing` under the `exec_watcher`
/// target, with the rendered report as the message.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use exec_watcher::{ExecutionWatcher, ThresholdLogger};
///
/// let slow_requests = ThresholdLogger::new(Duration::from_secs(3));
///
/// let response = slow_requests.run("GET /users", || {
///     ExecutionWatcher::watch("SELECT * FROM users", || vec!["alice", "bob"])
/// });
///
/// assert_eq!(response.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ThresholdLogger {
    threshold: Duration,
    delivery: Delivery,
}

impl ThresholdLogger {
    /// Creates a logger that logs reports whose elapsed time is at least `threshold`.
    #[must_use]
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            delivery: Delivery::Inline,
        }
    }

    /// Creates a logger whose threshold is read from an environment variable.
    ///
    /// The variable must hold a whole number of milliseconds, e.g. `3000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or its value is not a whole
    /// number of milliseconds.
    pub fn from_env(name: &str) -> Result<Self> {
        let value = env::var(name).map_err(|source| Error::MissingVariable {
            name: name.to_owned(),
            source,
        })?;

        Ok(Self::new(parse_threshold(&value)?))
    }

    /// Writes slow reports from a background thread instead of the calling one.
    ///
    /// Use this when the caller is on a latency-sensitive path, such as sending a reply.
    /// All background loggers in the process share one log thread, started on first use,
    /// which writes to the `tracing` subscriber that was current where the watcher was
    /// stopped. Reports still queued when the process exits are not written. If the log
    /// thread cannot be started, reports are logged inline instead.
    #[must_use]
    pub fn in_background(mut self) -> Self {
        self.delivery = Delivery::Background;
        self
    }

    /// The elapsed time at which reports start being logged.
    #[must_use]
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Whether `report` is slow enough to be logged.
    #[must_use]
    pub fn is_exceeded(&self, report: &WatchReport) -> bool {
        report.exceeds(self.threshold)
    }

    /// Stops `watcher`, logs the report if it reached the threshold and returns it.
    ///
    /// `scope` names the unit of work that was watched, such as a route or an RPC action.
    pub fn finish(&self, scope: &str, watcher: ExecutionWatcher) -> WatchReport {
        let report = watcher.stop();

        if self.is_exceeded(&report) {
            self.emit(scope, &report);
        }

        report
    }

    /// Watches the current thread while `work` runs, then finishes as [`finish()`](Self::finish) does.
    ///
    /// The result of `work` is returned unchanged. If `work` panics, nothing is logged
    /// and the session is left for the next start on this thread to discard.
    pub fn run<R>(&self, scope: &str, work: impl FnOnce() -> R) -> R {
        let watcher = ExecutionWatcher::start();
        let result = work();
        drop(self.finish(scope, watcher));
        result
    }

    fn emit(&self, scope: &str, report: &WatchReport) {
        if self.delivery == Delivery::Inline {
            log_slow(scope, report);
            return;
        }

        let queued = QueuedReport {
            dispatch: dispatcher::get_default(Dispatch::clone),
            scope: scope.to_owned(),
            report: report.clone(),
        };

        let sent = BACKGROUND_LOG
            .as_ref()
            .is_some_and(|sender| sender.send(queued).is_ok());

        if !sent {
            warn!(
                target: "exec_watcher",
                "background log thread is not running, logging inline"
            );
            log_slow(scope, report);
        }
    }
}

fn log_slow(scope: &str, report: &WatchReport) {
    warn!(
        target: "exec_watcher",
        scope,
        elapsed_ms = report.elapsed_millis(),
        sample_count = report.samples().len(),
        "slow execution: {report}"
    );
}

/// Parses a threshold given as a whole number of milliseconds.
fn parse_threshold(value: &str) -> Result<Duration> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidThreshold {
            invalid_value: value.to_owned(),
            problem: "value is empty".to_owned(),
        });
    }

    let millis = trimmed
        .parse::<u64>()
        .map_err(|e| Error::InvalidThreshold {
            invalid_value: value.to_owned(),
            problem: format!("expected a whole number of milliseconds: {e}"),
        })?;

    Ok(Duration::from_millis(millis))
}
