//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use taskpane_engine::{App, RunConfig};

/// App with a scaled-down batch so the suite stays fast: nine tasks,
/// sleeps under 5 ms, demo slow threshold.
pub fn test_app(seed: u64) -> App {
    App::with_run_config(
        RunConfig {
            tasks: 10,
            max_sleep_ms: 5,
            slow_threshold_ms: 500,
        },
        seed,
    )
}

/// Poll an active run to completion the way the event loop would: drain
/// deferred units and reactive results once per iteration.
pub async fn run_to_completion(app: &mut App) {
    for _ in 0..2000 {
        app.tick();
        app.process_task_events();
        if !app.is_running() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("run did not complete");
}

/// Split a rendered sink entry into (label, duration). Entries look like
/// `"Task3 (812 ms)"`, `"Task3 (slow) (812 ms)"`, or `"- (0 ms)"`.
pub fn parse_entry(entry: &str) -> (String, u64) {
    let open = entry.rfind(" (").expect("entry has duration suffix");
    let label = entry[..open].to_string();
    let duration = entry[open + 2..]
        .strip_suffix(" ms)")
        .expect("entry ends with ' ms)'")
        .parse()
        .expect("duration is numeric");
    (label, duration)
}
