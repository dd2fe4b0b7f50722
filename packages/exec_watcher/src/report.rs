//! Reports produced when a watch session is stopped.

use std::fmt;
use std::thread::{self, ThreadId};
use std::time::Duration;

use crate::Sample;

/// Snapshot of a finished watch session.
///
/// A report is independent of the session it came from: it can be kept, cloned
/// and sent to other threads without affecting later sessions on the thread
/// that produced it.
///
/// # Examples
///
/// ```
/// use exec_watcher::ExecutionWatcher;
///
/// let watcher = ExecutionWatcher::start();
/// let rows = ExecutionWatcher::watch("load_rows", || vec![1, 2, 3]);
/// let report = watcher.stop();
///
/// assert_eq!(rows.len(), 3);
/// assert_eq!(report.samples().len(), 1);
/// assert_eq!(report.samples()[0].label(), "load_rows");
///
/// // First line is the header, then one line per sample.
/// println!("{}", report.render());
/// ```
#[derive(Clone, Debug)]
pub struct WatchReport {
    elapsed: Duration,
    samples: Vec<Sample>,
    thread: ThreadId,
    thread_name: Option<String>,
}

impl WatchReport {
    /// Creates a report attributed to the current thread.
    pub(crate) fn new(elapsed: Duration, samples: Vec<Sample>) -> Self {
        let current = thread::current();

        Self {
            elapsed,
            samples,
            thread: current.id(),
            thread_name: current.name().map(str::to_owned),
        }
    }

    /// A report for a thread that had nothing to stop.
    pub(crate) fn empty() -> Self {
        Self::new(Duration::ZERO, Vec::new())
    }

    /// Total time between start and stop, in fractional milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.div_duration_f64(Duration::from_millis(1))
    }

    /// Total time between start and stop.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The samples recorded during the session, in the order they were recorded.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consumes the report, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// The thread the session was stopped on.
    #[must_use]
    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    /// The name of the thread the session was stopped on, if it had one.
    #[must_use]
    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    /// Whether the report has neither elapsed time nor samples.
    ///
    /// This is what stopping a thread with no active session produces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elapsed.is_zero() && self.samples.is_empty()
    }

    /// Whether the total elapsed time reached `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: Duration) -> bool {
        self.elapsed >= threshold
    }

    /// Renders the report as text.
    ///
    /// The first line names the thread and the total elapsed time in milliseconds.
    /// Each following line is one sample as `<label> <milliseconds>`, in recording order.
    /// There is no trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.thread_name {
            Some(name) => write!(f, "{:?} ({name})", self.thread)?,
            None => write!(f, "{:?}", self.thread)?,
        }

        write!(f, ": elapsed {} ms", self.elapsed_millis())?;

        for sample in &self.samples {
            write!(f, "\n{sample}")?;
        }

        Ok(())
    }
}
