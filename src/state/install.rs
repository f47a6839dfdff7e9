//! Install-related application state

use eframe::egui;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::AppDescriptor;
use crate::installer::{
    CancelFlag, InstallError, InstallOutcome, InstallPhase, InstallProgress, Installer,
};
use crate::state::StateEvent;
use crate::task::{poll_task, PollResult};

/// State of one install operation. Each app being installed gets its
/// own instance with its own progress channel and cancel flag.
pub struct InstallState {
    /// The app being installed
    pub app: AppDescriptor,
    /// Async task driving the download and launch
    task: Option<JoinHandle<Result<InstallOutcome, InstallError>>>,
    /// Channel receiver for install progress
    progress_rx: Option<watch::Receiver<InstallProgress>>,
    /// Latest observed progress
    pub progress: InstallProgress,
    /// Cancel flag shared with the download loop
    cancel: CancelFlag,
    /// Outcome of a completed install
    pub outcome: Option<InstallOutcome>,
    /// Error message from a failed install
    pub error: Option<String>,
}

impl InstallState {
    /// Spawn the install task for `app` and return the state tracking it
    pub fn start(installer: &Installer, app: AppDescriptor) -> Self {
        let (progress_tx, progress_rx) = watch::channel(InstallProgress::default());
        let cancel = CancelFlag::new();

        let installer = installer.clone();
        let task_app = app.clone();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            installer.install(&task_app, &progress_tx, task_cancel).await
        });

        Self {
            app,
            task: Some(task),
            progress_rx: Some(progress_rx),
            progress: InstallProgress::default(),
            cancel,
            outcome: None,
            error: None,
        }
    }

    /// Check if the install is still running
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Ask the download loop to stop. The launched installer process,
    /// if any, is not touched.
    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    /// Poll the install task for progress and completion
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        // Update progress from receiver
        if let Some(ref mut rx) = self.progress_rx {
            if rx.has_changed().unwrap_or(false) {
                self.progress = rx.borrow_and_update().clone();
                ctx.request_repaint();
            }
        }

        match poll_task(&mut self.task) {
            PollResult::Complete(Ok(Ok(outcome))) => {
                self.take_final_progress();
                events.push(StateEvent::StatusMessage(
                    self.progress.status_line().to_string(),
                ));
                events.push(StateEvent::LogInfo(format!(
                    "{}: installer exited with {}",
                    self.app.name, outcome.exit_status
                )));
                self.outcome = Some(outcome);
            }
            PollResult::Complete(Ok(Err(e))) => {
                self.take_final_progress();
                self.error = Some(e.to_string());
                events.push(StateEvent::LogError(format!(
                    "Install of {} failed: {}",
                    self.app.name, e
                )));
            }
            PollResult::Complete(Err(e)) => {
                self.progress_rx = None;
                let msg = format!("Install task panicked: {}", e);
                self.progress.phase = InstallPhase::Failed;
                self.progress.error = Some(msg.clone());
                self.error = Some(msg.clone());
                events.push(StateEvent::LogError(msg));
            }
            PollResult::Pending => ctx.request_repaint(),
            PollResult::NoTask => {}
        }

        events
    }

    /// Pull the terminal payload out of the channel before dropping it.
    /// The task has already sent its last value, so a plain borrow is
    /// enough here.
    fn take_final_progress(&mut self) {
        if let Some(rx) = self.progress_rx.take() {
            self.progress = rx.borrow().clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(name: &str, url: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            download_url: url.to_string(),
            image_url: String::new(),
        }
    }

    /// URL on a port that was just released, so connecting is refused
    fn dead_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/nope", port)
    }

    #[tokio::test]
    async fn test_install_state_tracks_failed_install() {
        let app = test_app("state-test-app", &dead_url());
        let installer = Installer::new().unwrap();
        let mut state = InstallState::start(&installer, app);

        assert!(state.is_running());

        // Wait for the task to finish without an egui context in play
        while !state.task.as_ref().unwrap().is_finished() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let ctx = egui::Context::default();
        let events = state.poll(&ctx);

        assert!(!state.is_running());
        assert_eq!(state.progress.phase, InstallPhase::Failed);
        assert!(state.error.is_some());
        assert!(events
            .iter()
            .any(|e| matches!(e, StateEvent::LogError(_))));
    }

    #[tokio::test]
    async fn test_cancel_before_poll_reports_cancelled() {
        let app = test_app("state-cancel-app", &dead_url());
        let installer = Installer::new().unwrap();
        let mut state = InstallState::start(&installer, app);
        state.request_cancel();

        while !state.task.as_ref().unwrap().is_finished() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let ctx = egui::Context::default();
        state.poll(&ctx);

        // Whichever came first (connect error or the cancel check), the
        // operation ends in Failed with a message.
        assert_eq!(state.progress.phase, InstallPhase::Failed);
        assert!(state.progress.error.is_some());
    }
}
