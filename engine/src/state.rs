//! Run state machine types.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use taskpane_types::TaskResult;

use crate::runner::CancelFlag;

/// One queued unit of deferred work: the duration is fixed at enqueue time,
/// execution happens when the UI event loop gets to it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeferredTask {
    pub(crate) index: usize,
    pub(crate) sleep_ms: u64,
}

/// Lifecycle of the current batch.
///
/// Transitions: `Idle -> Deferred | Reactive` on selection; back to `Idle`
/// when the queue/channel drains. Blocking runs complete inside the
/// selection handler and never appear here.
#[derive(Debug)]
pub(crate) enum RunState {
    Idle,
    /// All units queued up front; the UI event loop executes them FIFO, one
    /// per frame, each blocking the UI thread for its full sleep.
    Deferred {
        queue: VecDeque<DeferredTask>,
        cancel: CancelFlag,
    },
    /// Bodies running concurrently on the blocking pool; completed results
    /// funnel back through `rx`, the single hand-off point to the UI thread.
    Reactive {
        rx: mpsc::Receiver<TaskResult>,
        remaining: usize,
        cancel: CancelFlag,
    },
}

impl RunState {
    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, RunState::Idle)
    }

    /// Interrupt the batch without discarding it: pending units still run,
    /// but their waits end early and degrade to the sentinel result.
    pub(crate) fn interrupt(&self) {
        match self {
            RunState::Idle => {}
            RunState::Deferred { cancel, .. } | RunState::Reactive { cancel, .. } => {
                cancel.cancel();
            }
        }
    }
}
