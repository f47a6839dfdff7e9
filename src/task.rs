//! Task polling utilities
//!
//! Install operations run as spawned tokio tasks while the UI keeps
//! rendering; this helper checks a stored handle once per frame without
//! blocking.

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (slot was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task finished; Err means the task panicked or was aborted
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle, taking it out of the slot once finished.
///
/// # Example
/// ```ignore
/// match poll_task(&mut self.task) {
///     PollResult::Complete(Ok(Ok(outcome))) => { /* install finished */ }
///     PollResult::Complete(Ok(Err(e))) => { /* install failed */ }
///     PollResult::Complete(Err(e)) => { /* task panicked */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task {
        None => PollResult::NoTask,
        Some(handle) if !handle.is_finished() => PollResult::Pending,
        Some(_) => {
            let Some(handle) = task.take() else {
                return PollResult::NoTask;
            };
            match handle.now_or_never() {
                Some(result) => PollResult::Complete(result),
                None => {
                    tracing::warn!("Task not ready despite is_finished()");
                    PollResult::Pending
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_poll_empty_slot() {
        let mut task: Option<JoinHandle<u32>> = None;
        assert!(matches!(poll_task(&mut task), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_poll_finished_task_takes_the_handle() {
        let mut task = Some(tokio::spawn(async { 42u32 }));

        // Wait for the spawned task to actually finish before polling.
        while !task.as_ref().unwrap().is_finished() {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }

        match poll_task(&mut task) {
            PollResult::Complete(Ok(value)) => assert_eq!(value, 42),
            _ => panic!("expected completed task"),
        }
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_poll_running_task_is_pending() {
        let mut task = Some(tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        }));

        assert!(matches!(poll_task(&mut task), PollResult::Pending));
        assert!(task.is_some());
        task.take().unwrap().abort();
    }
}
