//! Named timing samples recorded inside a watch session.

use std::fmt;
use std::time::Duration;

/// One named sub-measurement recorded while a thread was being watched.
///
/// The label is usually the name of a downstream call, such as an RPC method,
/// a stored procedure or the text of a query.
///
/// # Examples
///
/// ```
/// use exec_watcher::ExecutionWatcher;
///
/// let watcher = ExecutionWatcher::start();
/// ExecutionWatcher::record_elapsed("get_user", 42);
///
/// let report = watcher.stop();
/// let sample = &report.samples()[0];
///
/// assert_eq!(sample.label(), "get_user");
/// assert_eq!(sample.elapsed_millis(), 42);
/// assert_eq!(sample.to_string(), "get_user 42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sample {
    label: String,
    elapsed_millis: u64,
}

impl Sample {
    pub(crate) fn new(label: impl Into<String>, elapsed_millis: u64) -> Self {
        Self {
            label: label.into(),
            elapsed_millis,
        }
    }

    /// Creates a sample from a measured duration, truncated to whole milliseconds.
    pub(crate) fn from_duration(label: impl Into<String>, elapsed: Duration) -> Self {
        let elapsed_millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        Self::new(label, elapsed_millis)
    }

    /// The name of the measured call.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How long the measured call took, in whole milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    /// How long the measured call took.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_millis)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.elapsed_millis)
    }
}
