//! Starting, stopping and recording into watch sessions.

use std::marker::PhantomData;
use std::time::Duration;

use tracing::trace;

use crate::pal::{Platform, PlatformFacade};
use crate::{Sample, WatchReport, context};

/// Handle to the watch session of the current thread.
///
/// Watching is scoped to a thread: [`start()`](Self::start) begins a session on the
/// calling thread, code running on that thread records samples into it through
/// [`watch()`](Self::watch) and [`record_elapsed()`](Self::record_elapsed), and
/// [`stop()`](Self::stop) ends it and returns a [`WatchReport`].
///
/// The session lives with the thread, not with the handle. Starting again on the
/// same thread silently replaces the unfinished session. Dropping the handle without
/// stopping leaves the session running until the next start or stop on that thread.
/// The handle cannot be sent to another thread.
///
/// Recording never fails. When there is no session or the label is empty, the work
/// is simply executed without being measured.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use exec_watcher::ExecutionWatcher;
///
/// let watcher = ExecutionWatcher::start();
///
/// ExecutionWatcher::watch("Test1", || thread::sleep(Duration::from_millis(12)));
/// let value = ExecutionWatcher::watch("Test1", || {
///     thread::sleep(Duration::from_millis(34));
///     1
/// });
///
/// let report = watcher.stop();
///
/// assert_eq!(value, 1);
/// assert_eq!(report.samples().len(), 2);
/// assert!(report.elapsed() >= Duration::from_millis(46));
/// ```
#[derive(Debug)]
#[must_use = "the session is only reported when the watcher is stopped"]
pub struct ExecutionWatcher {
    _single_threaded: PhantomData<*const ()>,
}

impl ExecutionWatcher {
    /// Starts watching the current thread.
    ///
    /// Any unfinished session on this thread is discarded together with its samples.
    pub fn start() -> Self {
        Self::start_with_platform(PlatformFacade::real())
    }

    pub(crate) fn start_with_platform(platform: PlatformFacade) -> Self {
        if let Some(discarded_samples) = context::begin(platform) {
            trace!(
                target: "exec_watcher",
                discarded_samples,
                "restarted watch session, previous session discarded"
            );
        } else {
            trace!(target: "exec_watcher", "started watch session");
        }

        Self {
            _single_threaded: PhantomData,
        }
    }

    /// Stops watching the current thread and returns what was recorded.
    ///
    /// If the thread has no session, because it was never started or has already been
    /// stopped through another handle, the report has zero elapsed time and no samples.
    pub fn stop(self) -> WatchReport {
        let Some((elapsed, samples)) = context::end() else {
            trace!(target: "exec_watcher", "stopped thread without an active watch session");
            return WatchReport::empty();
        };

        trace!(
            target: "exec_watcher",
            elapsed_ms = elapsed.div_duration_f64(Duration::from_millis(1)),
            sample_count = samples.len(),
            "stopped watch session"
        );

        WatchReport::new(elapsed, samples)
    }

    /// Whether the current thread is being watched.
    #[must_use]
    pub fn is_active() -> bool {
        context::is_active()
    }

    /// Executes `work`, recording how long it took as a sample named `label`.
    ///
    /// The result of `work` is returned unchanged, so errors carried in a `Result` pass
    /// straight through. The sample is recorded even if `work` panics, before the panic
    /// continues to unwind.
    ///
    /// Nothing is recorded if `label` is empty or the current thread is not being watched.
    ///
    /// # Examples
    ///
    /// ```
    /// use exec_watcher::ExecutionWatcher;
    ///
    /// let watcher = ExecutionWatcher::start();
    ///
    /// let parsed: Result<u32, _> = ExecutionWatcher::watch("parse", || "12x".parse::<u32>());
    /// assert!(parsed.is_err());
    ///
    /// // The failed call was still measured.
    /// let report = watcher.stop();
    /// assert_eq!(report.samples()[0].label(), "parse");
    /// ```
    pub fn watch<R>(label: &str, work: impl FnOnce() -> R) -> R {
        if label.is_empty() {
            return work();
        }

        let Some(platform) = context::active_platform() else {
            return work();
        };

        let started_at = platform.now();

        let _record = scopeguard::guard((), move |()| {
            let elapsed = platform.now().saturating_sub(started_at);
            context::push_measured(Sample::from_duration(label, elapsed));
        });

        work()
    }

    /// Records a sample with a duration measured elsewhere.
    ///
    /// The sample is dropped if `label` is empty or the current thread is not being watched.
    ///
    /// # Examples
    ///
    /// ```
    /// use exec_watcher::ExecutionWatcher;
    ///
    /// // Not being watched, so this is ignored.
    /// ExecutionWatcher::record_elapsed("cache_lookup", 3);
    ///
    /// let watcher = ExecutionWatcher::start();
    /// ExecutionWatcher::record_elapsed("cache_lookup", 5);
    ///
    /// let report = watcher.stop();
    /// assert_eq!(report.samples().len(), 1);
    /// assert_eq!(report.samples()[0].elapsed_millis(), 5);
    /// ```
    pub fn record_elapsed(label: &str, elapsed_millis: u64) {
        if label.is_empty() {
            return;
        }

        context::push_precomputed(Sample::new(label, elapsed_millis));
    }
}
