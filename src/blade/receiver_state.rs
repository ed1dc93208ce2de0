//! Per-blade receiver state (spec.md §4.7, §5): "a receiver holds
//! `current_task` ... and `current_intent`". Mutated only by the intent
//! handler; the scraping task itself only reads its own cancellation signal.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::models::Intent;

pub struct RunningTask {
    pub handle: JoinHandle<()>,
    pub cancel: watch::Sender<bool>,
}

#[derive(Default)]
pub struct ReceiverState {
    pub current_task: Option<RunningTask>,
    pub current_intent: Option<Intent>,
}

impl ReceiverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels and drops the current task, if any.
    pub fn cancel_current_task(&mut self) {
        if let Some(task) = self.current_task.take() {
            let _ = task.cancel.send(true);
            task.handle.abort();
        }
    }
}
