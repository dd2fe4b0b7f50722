//! Platform abstraction layer for reading the watcher clock.
//!
//! Real code reads a monotonic clock. Tests substitute a fake clock whose time
//! only moves when the test says so, which makes elapsed times exact.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
