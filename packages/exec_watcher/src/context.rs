//! The session slot owned by each thread.
//!
//! Every thread has exactly one slot, created on first use and destroyed with the
//! thread. Nothing in here is ever shared between threads, so no locking is needed.
//!
//! The start time and the sample list are tracked separately. Starting sets both and
//! stopping clears both, but work running inside [`crate::ExecutionWatcher::watch`]
//! may stop the session before its own sample is appended, in which case the sample
//! lands in a freshly created list with no start time attached.

use std::cell::RefCell;
use std::time::Duration;

use crate::Sample;
use crate::pal::{Platform, PlatformFacade};

#[derive(Debug)]
struct StartTime {
    platform: PlatformFacade,
    at: Duration,
}

#[derive(Debug)]
struct Slot {
    start_time: Option<StartTime>,
    samples: Option<Vec<Sample>>,
}

thread_local! {
    static SLOT: RefCell<Slot> = const {
        RefCell::new(Slot {
            start_time: None,
            samples: None,
        })
    };
}

/// Runs `f` against the slot of the current thread.
///
/// Returns `None` if the slot is no longer available because the thread is being torn down.
fn with_slot<R>(f: impl FnOnce(&mut Slot) -> R) -> Option<R> {
    SLOT.try_with(|slot| f(&mut slot.borrow_mut())).ok()
}

/// Starts a new session on the current thread, discarding any unfinished one.
///
/// Returns the number of samples discarded, if there was a session to discard.
pub(crate) fn begin(platform: PlatformFacade) -> Option<usize> {
    let at = platform.now();

    with_slot(|slot| {
        let discarded = slot
            .start_time
            .is_some()
            .then(|| slot.samples.as_ref().map_or(0, Vec::len));

        slot.start_time = Some(StartTime { platform, at });
        slot.samples = Some(Vec::new());

        discarded
    })
    .flatten()
}

/// Ends the session of the current thread, returning its elapsed time and samples.
///
/// Returns `None` if there was no complete session. The slot is empty afterwards either way.
pub(crate) fn end() -> Option<(Duration, Vec<Sample>)> {
    with_slot(|slot| {
        let start_time = slot.start_time.take();
        let samples = slot.samples.take();

        match (start_time, samples) {
            (Some(start_time), Some(samples)) => {
                let elapsed = start_time.platform.now().saturating_sub(start_time.at);
                Some((elapsed, samples))
            }
            _ => None,
        }
    })
    .flatten()
}

/// The clock of the session on the current thread, if one has been started.
pub(crate) fn active_platform() -> Option<PlatformFacade> {
    with_slot(|slot| {
        slot.start_time
            .as_ref()
            .map(|start_time| start_time.platform.clone())
    })
    .flatten()
}

/// Whether the current thread has a started session.
pub(crate) fn is_active() -> bool {
    with_slot(|slot| slot.start_time.is_some()).unwrap_or(false)
}

/// Appends a measured sample, creating the sample list if it has gone missing.
pub(crate) fn push_measured(sample: Sample) {
    with_slot(|slot| slot.samples.get_or_insert_with(Vec::new).push(sample));
}

/// Appends a precomputed sample if the current thread has a started session.
///
/// Never creates a sample list. Returns whether the sample was kept.
pub(crate) fn push_precomputed(sample: Sample) -> bool {
    with_slot(|slot| {
        if slot.start_time.is_none() {
            return false;
        }

        let Some(samples) = slot.samples.as_mut() else {
            return false;
        };

        samples.push(sample);
        true
    })
    .unwrap_or(false)
}
