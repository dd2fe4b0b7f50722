//! Real platform implementation backed by the operating system monotonic clock.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

static ANCHOR: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Real implementation of the platform abstraction using [`Instant`].
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    fn now(&self) -> Duration {
        ANCHOR.elapsed()
    }
}
