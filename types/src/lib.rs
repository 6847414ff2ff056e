//! Core domain types for Taskpane.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Batch constants
// ============================================================================

/// Upper bound of the task index range. The range is exclusive, so a run
/// produces tasks `1..NUMBER_OF_TASKS` — exactly nine of them.
pub const NUMBER_OF_TASKS: usize = 10;

/// Results that slept longer than this are relabeled as slow.
pub const SLOW_THRESHOLD_MS: u64 = 500;

/// Simulated task durations are drawn uniformly from `[0, MAX_SLEEP_MS)`.
pub const MAX_SLEEP_MS: u64 = 1000;

// ============================================================================
// Strategy
// ============================================================================

/// Execution policy for a batch of simulated tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Run every task sequentially on the UI thread, appending as it goes.
    Blocking,
    /// Queue every task up front; the UI event loop executes them FIFO,
    /// one per frame, each blocking the UI thread for its sleep.
    Deferred,
    /// Run task bodies concurrently on the blocking pool; results funnel
    /// back to the UI thread through a single channel.
    Reactive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Blocking, Strategy::Deferred, Strategy::Reactive];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::Blocking => "Blocking",
            Strategy::Deferred => "Non-Blocking (deferred)",
            Strategy::Reactive => "Non-Blocking (reactive)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Error)]
#[error("unknown strategy: {0:?}")]
pub struct StrategyParseError(String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocking" => Ok(Strategy::Blocking),
            "deferred" => Ok(Strategy::Deferred),
            "reactive" => Ok(Strategy::Reactive),
            _ => Err(StrategyParseError(s.to_string())),
        }
    }
}

// ============================================================================
// TaskResult
// ============================================================================

/// Outcome of one simulated task: a label and the duration it slept.
///
/// Created once per task, rendered to text for the sink, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    name: String,
    time_ms: u64,
}

impl TaskResult {
    /// Result of a task that slept its full duration.
    #[must_use]
    pub fn completed(index: usize, time_ms: u64) -> Self {
        Self {
            name: format!("Task{index}"),
            time_ms,
        }
    }

    /// Sentinel result for a task whose wait was interrupted. The failure
    /// is swallowed here; it never propagates past the task.
    #[must_use]
    pub fn interrupted() -> Self {
        Self {
            name: "-".to_string(),
            time_ms: 0,
        }
    }

    /// Relabel the result when it exceeded the slow threshold. Applied
    /// uniformly across strategies, after the task body completes.
    #[must_use]
    pub fn mark_slow(self, threshold_ms: u64) -> Self {
        if self.time_ms > threshold_ms {
            Self {
                name: format!("{} (slow)", self.name),
                time_ms: self.time_ms,
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.name == "-"
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.name, self.time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_result_renders_name_and_duration() {
        let result = TaskResult::completed(3, 120);
        assert_eq!(result.name(), "Task3");
        assert_eq!(result.to_string(), "Task3 (120 ms)");
    }

    #[test]
    fn interrupted_result_is_sentinel() {
        let result = TaskResult::interrupted();
        assert!(result.is_interrupted());
        assert_eq!(result.time_ms(), 0);
        assert_eq!(result.to_string(), "- (0 ms)");
    }

    #[test]
    fn slow_marking_is_strictly_greater_than_threshold() {
        let at = TaskResult::completed(1, SLOW_THRESHOLD_MS).mark_slow(SLOW_THRESHOLD_MS);
        assert_eq!(at.name(), "Task1");

        let over = TaskResult::completed(1, SLOW_THRESHOLD_MS + 1).mark_slow(SLOW_THRESHOLD_MS);
        assert_eq!(over.name(), "Task1 (slow)");
        assert_eq!(over.to_string(), "Task1 (slow) (501 ms)");
    }

    #[test]
    fn slow_marking_preserves_duration() {
        let result = TaskResult::completed(7, 812).mark_slow(SLOW_THRESHOLD_MS);
        assert_eq!(result.time_ms(), 812);
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("blocking".parse::<Strategy>().unwrap(), Strategy::Blocking);
        assert_eq!("Deferred".parse::<Strategy>().unwrap(), Strategy::Deferred);
        assert_eq!("REACTIVE".parse::<Strategy>().unwrap(), Strategy::Reactive);
        assert!("rx".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategy_display_names_are_distinct() {
        let names: Vec<_> = Strategy::ALL.iter().map(|s| s.display_name()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn index_range_yields_nine_tasks() {
        assert_eq!((1..NUMBER_OF_TASKS).count(), 9);
    }
}
