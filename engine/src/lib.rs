//! Core engine for Taskpane - state machine and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies. The
//! UI shell owns one [`App`], forwards selection events to it, and calls
//! [`App::tick`] and [`App::process_task_events`] once per frame from the
//! event loop. Every sink mutation happens inside those calls, so the sink
//! is only ever touched from the UI thread — the invariant all three
//! strategies share.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

// Re-export from crates for public API
pub use taskpane_types::{
    MAX_SLEEP_MS, NUMBER_OF_TASKS, SLOW_THRESHOLD_MS, Strategy, StrategyParseError, TaskResult,
};

// Config types - passed in from caller
mod config;
pub use config::{AppConfig, ConfigError, RunSection, TaskpaneConfig};

mod runner;
pub use runner::{CancelFlag, RunConfig, run_task};

mod state;
use state::{DeferredTask, RunState};


const RESULT_CHANNEL_CAPACITY: usize = 64;

/// Selector entries, in display order. The leading `None` is the placeholder
/// row; selecting it clears the sink without running anything.
pub const SELECTOR_OPTIONS: [Option<Strategy>; 4] = [
    None,
    Some(Strategy::Blocking),
    Some(Strategy::Deferred),
    Some(Strategy::Reactive),
];

/// Theme-relevant options resolved from config.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Application state. Owned by the UI event loop.
pub struct App {
    run: RunConfig,
    rng: StdRng,
    ui_options: UiOptions,
    /// Rendered results, in append order. UI-thread only.
    sink: Vec<String>,
    selector_cursor: usize,
    /// Most recent selection, shown in the status bar.
    selected: Option<Strategy>,
    state: RunState,
    frame: u64,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &TaskpaneConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let ui_options = config.app.as_ref().map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
        });
        Self::build(config.run_config(), rng, ui_options)
    }

    /// Deterministic constructor for tests and reproducible demos.
    #[must_use]
    pub fn with_run_config(run: RunConfig, seed: u64) -> Self {
        Self::build(run, StdRng::seed_from_u64(seed), UiOptions::default())
    }

    fn build(run: RunConfig, rng: StdRng, ui_options: UiOptions) -> Self {
        Self {
            run,
            rng,
            ui_options,
            sink: Vec::new(),
            selector_cursor: 0,
            selected: None,
            state: RunState::Idle,
            frame: 0,
            should_quit: false,
        }
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    /// Rendered results in append order (the sink).
    #[must_use]
    pub fn results(&self) -> &[String] {
        &self.sink
    }

    /// Number of results a full batch produces.
    #[must_use]
    pub fn expected_results(&self) -> usize {
        self.run.indices().count()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.state.is_idle()
    }

    #[must_use]
    pub fn selected_strategy(&self) -> Option<Strategy> {
        self.selected
    }

    #[must_use]
    pub fn selector_cursor(&self) -> usize {
        self.selector_cursor
    }

    /// Frame counter, advanced by [`App::tick`]. Drives the spinner.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------
    // Selector
    // ------------------------------------------------------------------

    pub fn selector_move_up(&mut self) {
        self.selector_cursor = self.selector_cursor.saturating_sub(1);
    }

    pub fn selector_move_down(&mut self) {
        if self.selector_cursor + 1 < SELECTOR_OPTIONS.len() {
            self.selector_cursor += 1;
        }
    }

    /// Fire the "strategy selected" event for the entry under the cursor.
    pub fn select_current(&mut self) {
        self.run_strategy(SELECTOR_OPTIONS[self.selector_cursor]);
    }

    // ------------------------------------------------------------------
    // Strategy dispatch
    // ------------------------------------------------------------------

    /// Handle a selection event: abandon any active run, clear the sink,
    /// and start the batch under the chosen policy. `None` (the placeholder
    /// entry) clears and runs nothing.
    pub fn run_strategy(&mut self, strategy: Option<Strategy>) {
        self.abandon_run();
        self.sink.clear();
        self.selected = strategy;

        let Some(strategy) = strategy else {
            return;
        };

        let durations = self.run.draw_durations(&mut self.rng);
        let cancel = CancelFlag::default();

        match strategy {
            Strategy::Blocking => {
                // Whole batch on the UI thread, appending in index order.
                // The freeze is the demo.
                for (index, sleep_ms) in self.run.indices().zip(durations) {
                    let result =
                        run_task(index, sleep_ms, &cancel).mark_slow(self.run.slow_threshold_ms);
                    self.sink.push(result.to_string());
                }
            }
            Strategy::Deferred => {
                let queue = self
                    .run
                    .indices()
                    .zip(durations)
                    .map(|(index, sleep_ms)| DeferredTask { index, sleep_ms })
                    .collect();
                self.state = RunState::Deferred { queue, cancel };
            }
            Strategy::Reactive => {
                let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
                let remaining = self.expected_results();
                for (index, sleep_ms) in self.run.indices().zip(durations) {
                    let tx = tx.clone();
                    let cancel = cancel.clone();
                    tokio::task::spawn_blocking(move || {
                        let result = run_task(index, sleep_ms, &cancel);
                        // Receiver dropped means the run was abandoned;
                        // the result is stale and discarded.
                        let _ = tx.blocking_send(result);
                    });
                }
                self.state = RunState::Reactive {
                    rx,
                    remaining,
                    cancel,
                };
            }
        }
    }

    // ------------------------------------------------------------------
    // Per-frame advancement (UI thread)
    // ------------------------------------------------------------------

    /// Advance one frame. For a deferred run, executes at most one queued
    /// unit — on this thread, blocking it for the unit's full sleep, exactly
    /// like the callback dispatch it models.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        let unit = match &mut self.state {
            RunState::Deferred { queue, cancel } => match queue.pop_front() {
                Some(task) => (task, cancel.clone()),
                None => {
                    self.state = RunState::Idle;
                    return;
                }
            },
            RunState::Idle | RunState::Reactive { .. } => return,
        };

        let (task, cancel) = unit;
        let result =
            run_task(task.index, task.sleep_ms, &cancel).mark_slow(self.run.slow_threshold_ms);
        self.sink.push(result.to_string());

        if let RunState::Deferred { queue, .. } = &self.state
            && queue.is_empty()
        {
            self.state = RunState::Idle;
        }
    }

    /// Drain completed reactive results onto the sink. This is the single
    /// hand-off point from the blocking pool back to the UI thread.
    pub fn process_task_events(&mut self) {
        let mut drained = Vec::new();

        let done = {
            let RunState::Reactive { rx, remaining, .. } = &mut self.state else {
                return;
            };
            loop {
                match rx.try_recv() {
                    Ok(result) => {
                        *remaining = remaining.saturating_sub(1);
                        drained.push(result);
                    }
                    Err(TryRecvError::Empty) => break *remaining == 0,
                    Err(TryRecvError::Disconnected) => break true,
                }
            }
        };

        let threshold = self.run.slow_threshold_ms;
        for result in drained {
            self.sink.push(result.mark_slow(threshold).to_string());
        }

        if done {
            self.state = RunState::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------

    /// Interrupt the active run. Pending tasks still report, as sentinel
    /// results, so the batch completes with its full count of entries.
    pub fn cancel_active_run(&mut self) {
        self.state.interrupt();
    }

    /// Discard the active run entirely: interrupt its tasks and drop the
    /// queue/channel so stale results never reach the sink. Used when a new
    /// selection supersedes the run.
    fn abandon_run(&mut self) {
        self.state.interrupt();
        self.state = RunState::Idle;
    }
}
