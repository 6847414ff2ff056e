//! Simulated task execution.
//!
//! One task = one randomized sleep. The body is deliberately blocking; which
//! thread it blocks (and when) is exactly what the three strategies differ on.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

use taskpane_types::{MAX_SLEEP_MS, NUMBER_OF_TASKS, SLOW_THRESHOLD_MS, TaskResult};

/// Sleep slice between cancellation checks.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Parameters for one batch of simulated tasks.
///
/// Tests scale `max_sleep_ms` down so the suite stays fast; the defaults are
/// the demo values.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Exclusive upper bound of the task index range (`1..tasks`).
    pub tasks: usize,
    /// Durations are drawn uniformly from `[0, max_sleep_ms)`.
    pub max_sleep_ms: u64,
    /// Results that slept longer than this get the slow label.
    pub slow_threshold_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tasks: NUMBER_OF_TASKS,
            max_sleep_ms: MAX_SLEEP_MS,
            slow_threshold_ms: SLOW_THRESHOLD_MS,
        }
    }
}

impl RunConfig {
    /// Task indices for one run. Upper bound exclusive: `tasks = 10` yields
    /// indices 1 through 9.
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        1..self.tasks
    }

    /// Draw the whole batch's sleep durations up front. A seeded RNG makes
    /// the batch deterministic regardless of how the strategy interleaves
    /// execution.
    #[must_use]
    pub fn draw_durations(&self, rng: &mut StdRng) -> Vec<u64> {
        self.indices()
            .map(|_| {
                if self.max_sleep_ms == 0 {
                    0
                } else {
                    rng.random_range(0..self.max_sleep_ms)
                }
            })
            .collect()
    }
}

/// Cooperative cancellation for a single run, cloned into every task of the
/// batch. The stand-in for thread interruption: a cancelled task's wait ends
/// early and its result degrades to the sentinel.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Run one simulated task: sleep for `sleep_ms`, then report.
///
/// Failure contract: an interrupted wait is swallowed into
/// [`TaskResult::interrupted`], never propagated. The elapsed-time diagnostic
/// line is emitted regardless of outcome.
pub fn run_task(index: usize, sleep_ms: u64, cancel: &CancelFlag) -> TaskResult {
    let started = Instant::now();

    let result = if sleep_interruptible(sleep_ms, cancel) {
        TaskResult::completed(index, sleep_ms)
    } else {
        TaskResult::interrupted()
    };

    tracing::info!("Task{index} took {} ms", started.elapsed().as_millis());

    result
}

/// Sleep in slices, checking for cancellation between them. Returns `false`
/// when the wait was interrupted. A flag that is already set interrupts even
/// a zero-length wait, matching interruption semantics.
fn sleep_interruptible(sleep_ms: u64, cancel: &CancelFlag) -> bool {
    let deadline = Instant::now() + Duration::from_millis(sleep_ms);

    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}
