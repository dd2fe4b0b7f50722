//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides the current time on a monotonic timeline.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Time elapsed since an arbitrary fixed point.
    ///
    /// Only differences between two values from the same platform are meaningful.
    fn now(&self) -> Duration;
}
