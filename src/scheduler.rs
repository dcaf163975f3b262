//! Scheduler Module
//!
//! One-shot delayed execution behind a trait, so the timer source can be
//! swapped (tokio here, an external scheduling service elsewhere).

use std::time::Duration;

use crate::error::SchedulerError;

// == Cancel Handle ==
/// Handle returned when a callback is scheduled.
///
/// Consuming it before the delay elapses prevents the callback from running.
/// Cancelling after the callback has already run is a harmless no-op.
pub struct CancelHandle(Box<dyn FnOnce() + Send>);

impl CancelHandle {
    /// Wraps a cancellation action.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(cancel))
    }

    /// Cancels the scheduled callback if it has not fired yet.
    pub fn cancel(self) {
        (self.0)()
    }
}

// == Scheduler Contract ==
/// Runs a callback exactly once after a delay, on a separate execution
/// context from the caller.
pub trait Scheduler: Send + Sync {
    /// Schedules `callback` to run once `delay` has elapsed.
    ///
    /// Returns a handle that cancels the callback when invoked before it
    /// fires. The default implementation cannot fail once a runtime is
    /// available; the error slot exists for scheduler backends that can.
    fn run_once_after(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce() + Send>,
    ) -> Result<CancelHandle, SchedulerError>;
}

// == Tokio Scheduler ==
/// Default scheduler backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn run_once_after(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce() + Send>,
    ) -> Result<CancelHandle, SchedulerError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });

        // Aborting a finished task is a no-op, which gives the handle its
        // cancel-after-fire semantics for free.
        let abort = task.abort_handle();
        Ok(CancelHandle::new(move || abort.abort()))
    }
}
