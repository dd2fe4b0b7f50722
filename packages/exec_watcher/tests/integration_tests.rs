//! Integration tests for `exec_watcher` against the real clock.
//!
//! Real sleeps are only guaranteed to last at least as long as requested, so
//! these tests check lower bounds tightly and upper bounds loosely.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use exec_watcher::ExecutionWatcher;

const SHORT: Duration = Duration::from_millis(30);
const LONG: Duration = Duration::from_millis(70);

// Generous, to tolerate busy CI machines.
const SLACK: Duration = Duration::from_millis(2000);

#[test]
#[cfg_attr(miri, ignore)] // Miri sleeps are not representative of real time.
fn sleep_scenario_records_both_calls() {
    let watcher = ExecutionWatcher::start();

    ExecutionWatcher::watch("Test1", || thread::sleep(SHORT));
    let value = ExecutionWatcher::watch("Test1", || {
        thread::sleep(LONG);
        1
    });

    let report = watcher.stop();

    assert_eq!(value, 1);
    assert!(report.elapsed() >= SHORT + LONG);
    assert!(report.elapsed() < SHORT + LONG + SLACK);

    let samples = report.samples();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].label(), "Test1");
    assert_eq!(samples[1].label(), "Test1");
    assert!(samples[0].elapsed() >= SHORT);
    assert!(samples[1].elapsed() >= LONG);

    let rendered = report.render();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("elapsed"));
    assert_eq!(lines[1], samples[0].to_string());
    assert_eq!(lines[2], samples[1].to_string());
}

#[test]
fn stop_after_other_handle_stopped_is_empty() {
    let report = thread::spawn(|| {
        let first = ExecutionWatcher::start();
        let second = ExecutionWatcher::start();
        drop(second.stop());
        first.stop()
    })
    .join()
    .unwrap();

    assert!(report.is_empty());
    assert!(report.samples().is_empty());
}

#[test]
fn threads_never_see_each_others_samples() {
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            thread::spawn(move || {
                let watcher = ExecutionWatcher::start();

                for call in 0..50 {
                    let label = format!("worker_{worker}_call_{call}");
                    ExecutionWatcher::watch(&label, thread::yield_now);
                }

                (worker, watcher.stop())
            })
        })
        .collect();

    for handle in handles {
        let (worker, report) = handle.join().unwrap();

        assert_eq!(report.samples().len(), 50);
        for (call, sample) in report.samples().iter().enumerate() {
            assert_eq!(sample.label(), format!("worker_{worker}_call_{call}"));
        }
    }
}

#[test]
fn watching_one_thread_does_not_activate_another() {
    let watcher = ExecutionWatcher::start();

    let other_thread_active = thread::spawn(|| {
        ExecutionWatcher::record_elapsed("from_other_thread", 5);
        ExecutionWatcher::is_active()
    })
    .join()
    .unwrap();

    let report = watcher.stop();

    assert!(!other_thread_active);
    assert!(report.samples().is_empty());
}

#[test]
fn panic_in_watched_work_still_records_sample() {
    let watcher = ExecutionWatcher::start();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        ExecutionWatcher::watch("exploding_call", || -> u32 { panic!("downstream failed") })
    }));

    assert!(outcome.is_err());

    let report = watcher.stop();
    assert_eq!(report.samples().len(), 1);
    assert_eq!(report.samples()[0].label(), "exploding_call");
}

#[test]
fn report_can_be_sent_to_another_thread() {
    let watcher = ExecutionWatcher::start();
    ExecutionWatcher::record_elapsed("precomputed", 250);
    let report = watcher.stop();

    let rendered = thread::spawn(move || report.render()).join().unwrap();

    assert!(rendered.ends_with("\nprecomputed 250"));
}
