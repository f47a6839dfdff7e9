//! Install engine: fetch an app's installer over HTTP and launch it.
//!
//! This module handles:
//! - Resolving the fixed destination path in the system temp directory
//! - Claiming the destination so only one install runs per path
//! - Streaming the download with status and percentage reporting
//! - Launching the downloaded file via the platform default handler and
//!   awaiting its exit
//!
//! Each operation reports over its own `watch` channel; the presentation
//! layer holds one receiver per operation and multiplexes the display.

pub mod download;
pub mod launch;
pub mod registry;
#[cfg(test)]
pub(crate) mod testserver;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;

use crate::catalog::AppDescriptor;
pub use launch::LaunchMode;
use registry::InflightRegistry;

/// User agent for installer downloads
const USER_AGENT: &str = concat!("QuickInstall/", env!("CARGO_PKG_VERSION"));

/// Current phase of an install operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPhase {
    #[default]
    Idle,
    Downloading,
    Installing,
    Complete,
    Failed,
}

impl InstallPhase {
    /// Get a human-readable description of the current phase
    pub fn description(&self) -> &'static str {
        match self {
            InstallPhase::Idle => "Ready",
            InstallPhase::Downloading => "Downloading",
            InstallPhase::Installing => "Installing",
            InstallPhase::Complete => "Installation complete!",
            InstallPhase::Failed => "Installation failed",
        }
    }

    /// Whether the operation has terminated. There is no transition out
    /// of `Complete` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallPhase::Complete | InstallPhase::Failed)
    }
}

/// Progress information for an install operation, carried on the
/// per-operation watch channel
#[derive(Debug, Clone, Default)]
pub struct InstallProgress {
    pub phase: InstallPhase,
    /// User-facing status line ("Downloading", "Installing", ...)
    pub status: String,
    /// Whole-number percentage; None while the download total is unknown
    pub percent: Option<u8>,
    pub bytes_downloaded: u64,
    /// Declared content length; 0 when the server sent none
    pub total_bytes: u64,
    /// Flat error message, set when the phase is Failed
    pub error: Option<String>,
}

impl InstallProgress {
    /// Download progress as a fraction (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.total_bytes == 0 {
            0.0
        } else {
            self.bytes_downloaded as f32 / self.total_bytes as f32
        }
    }

    /// Status text for display, falling back to the phase description
    /// before the first status has been emitted.
    pub fn status_line(&self) -> &str {
        if self.status.is_empty() {
            self.phase.description()
        } else {
            &self.status
        }
    }
}

/// Errors that can occur during an install operation
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Download failed: HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Download failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Launch failed: {0}")]
    Launch(String),

    #[error("Install cancelled")]
    Cancelled,

    #[error("An install of {0} is already running")]
    AlreadyInFlight(String),
}

/// Cooperative cancellation flag, checked between download chunks.
///
/// `cancel` may be called from any thread; a cancelled operation
/// terminates through the normal failure path. The launched installer
/// process is never killed, cancellation only covers the download.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a completed install operation
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Where the installer was written
    pub installer_path: PathBuf,
    /// Bytes written to disk
    pub bytes_downloaded: u64,
    /// Exit status of the launched installer. Recorded for logging only:
    /// completion is reported identically for zero and non-zero exits.
    pub exit_status: ExitStatus,
}

/// Shared install engine: HTTP client, in-flight registry, launch mode.
#[derive(Clone)]
pub struct Installer {
    client: reqwest::Client,
    registry: InflightRegistry,
    launch_mode: LaunchMode,
}

impl Installer {
    /// Create the engine with the standard user agent.
    pub fn new() -> Result<Self, InstallError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            registry: InflightRegistry::new(),
            launch_mode: LaunchMode::default(),
        })
    }

    /// Use a different launch mode (the CLI's `--direct` flag).
    pub fn with_launch_mode(mut self, mode: LaunchMode) -> Self {
        self.launch_mode = mode;
        self
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Destination for an app's installer: the system temp directory, the
    /// app name, and the platform executable suffix. Repeated installs of
    /// the same app overwrite this path.
    pub fn destination_for(app_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}{}", app_name, std::env::consts::EXE_SUFFIX))
    }

    /// Download `app`'s installer and launch it, reporting over
    /// `progress_tx`.
    ///
    /// The sequence is linear: claim the destination, stream the
    /// download, launch, await the process exit. Completion is reported
    /// once the installer exits, whatever its exit code. Failures surface
    /// both in the returned error and as a Failed payload carrying one
    /// flat message; partially written files are left in place.
    pub async fn install(
        &self,
        app: &AppDescriptor,
        progress_tx: &watch::Sender<InstallProgress>,
        cancel: CancelFlag,
    ) -> Result<InstallOutcome, InstallError> {
        let dest = Self::destination_for(&app.name);

        let result = match self.registry.try_claim(&dest) {
            Some(_claim) => self.run(app, &dest, progress_tx, cancel).await,
            None => Err(InstallError::AlreadyInFlight(app.name.clone())),
        };

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // One flat message; byte counters and the partial file
                // stay as they were when the failure hit.
                let mut failed = progress_tx.borrow().clone();
                failed.phase = InstallPhase::Failed;
                failed.error = Some(e.to_string());
                let _ = progress_tx.send(failed);

                tracing::error!("Install of '{}' failed: {}", app.name, e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        app: &AppDescriptor,
        dest: &Path,
        progress_tx: &watch::Sender<InstallProgress>,
        cancel: CancelFlag,
    ) -> Result<InstallOutcome, InstallError> {
        tracing::info!("Installing '{}' from {}", app.name, app.download_url);

        let _ = progress_tx.send(InstallProgress {
            phase: InstallPhase::Downloading,
            status: "Downloading".to_string(),
            percent: Some(0),
            ..Default::default()
        });

        let totals = download::download_installer(
            &self.client,
            &app.download_url,
            dest,
            progress_tx,
            &cancel,
        )
        .await?;

        let _ = progress_tx.send(InstallProgress {
            phase: InstallPhase::Installing,
            status: "Installing".to_string(),
            percent: Some(0),
            bytes_downloaded: totals.bytes_downloaded,
            total_bytes: totals.total_bytes,
            error: None,
        });

        let exit_status = launch::launch_and_wait(dest, self.launch_mode).await?;
        tracing::info!("Installer for '{}' exited: {}", app.name, exit_status);

        // The exit code is not inspected: any exit reports completion.
        // Historical launcher contract, kept on purpose.
        let _ = progress_tx.send(InstallProgress {
            phase: InstallPhase::Complete,
            status: format!("{} Installation Complete!", app.name),
            percent: Some(100),
            bytes_downloaded: totals.bytes_downloaded,
            total_bytes: totals.total_bytes,
            error: None,
        });

        Ok(InstallOutcome {
            installer_path: dest.to_path_buf(),
            bytes_downloaded: totals.bytes_downloaded,
            exit_status,
        })
    }
}

impl Default for Installer {
    fn default() -> Self {
        Self::new().expect("Failed to create HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(name: &str, url: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            download_url: url.to_string(),
            image_url: String::new(),
        }
    }

    /// Pre-create the destination with exec permissions so the direct
    /// launch of a downloaded script works; File::create keeps the mode.
    #[cfg(unix)]
    fn prepare_executable_dest(app_name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let dest = Installer::destination_for(app_name);
        std::fs::write(&dest, b"").unwrap();
        std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755)).unwrap();
        dest
    }

    #[test]
    fn test_install_phase_description() {
        assert_eq!(InstallPhase::Idle.description(), "Ready");
        assert_eq!(InstallPhase::Downloading.description(), "Downloading");
        assert_eq!(InstallPhase::Installing.description(), "Installing");
        assert_eq!(
            InstallPhase::Complete.description(),
            "Installation complete!"
        );
        assert_eq!(InstallPhase::Failed.description(), "Installation failed");
    }

    #[test]
    fn test_install_phase_terminality() {
        assert!(!InstallPhase::Idle.is_terminal());
        assert!(!InstallPhase::Downloading.is_terminal());
        assert!(!InstallPhase::Installing.is_terminal());
        assert!(InstallPhase::Complete.is_terminal());
        assert!(InstallPhase::Failed.is_terminal());
    }

    #[test]
    fn test_progress_fraction() {
        let mut progress = InstallProgress::default();
        progress.bytes_downloaded = 50;
        progress.total_bytes = 100;
        assert_eq!(progress.fraction(), 0.5);

        progress.total_bytes = 0;
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn test_status_line_falls_back_to_phase() {
        let mut progress = InstallProgress::default();
        assert_eq!(progress.status_line(), "Ready");

        progress.status = "Downloading".to_string();
        assert_eq!(progress.status_line(), "Downloading");
    }

    #[test]
    fn test_destination_is_temp_dir_plus_name() {
        let dest = Installer::destination_for("Foo");
        assert_eq!(dest.parent().unwrap(), std::env::temp_dir());
        let expected = format!("Foo{}", std::env::consts::EXE_SUFFIX);
        assert_eq!(dest.file_name().unwrap().to_str().unwrap(), expected);
    }

    #[test]
    fn test_cancel_flag_round_trip() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());

        let clone = flag.clone();
        clone.cancel();
        assert!(flag.is_cancelled());
    }

    #[tokio::test]
    async fn test_install_http_error_fails_without_launch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.exe"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        let app = test_app("QI Http Error", &format!("{}/gone.exe", server.uri()));
        let dest = Installer::destination_for(&app.name);
        std::fs::remove_file(&dest).ok();

        let (tx, _rx) = watch::channel(InstallProgress::default());
        let result = installer.install(&app, &tx, CancelFlag::new()).await;

        assert!(matches!(result, Err(InstallError::HttpStatus(_))));

        let last = tx.borrow().clone();
        assert_eq!(last.phase, InstallPhase::Failed);
        assert!(last.error.unwrap().contains("404"));
        // Failed before the file was created, so nothing to launch.
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_install_rejects_duplicate_destination() {
        let installer = Installer::new().unwrap();
        let app = test_app("QI Duplicate", "http://unused.invalid/x.exe");
        let dest = Installer::destination_for(&app.name);

        let _claim = installer.registry.try_claim(&dest).unwrap();

        let (tx, _rx) = watch::channel(InstallProgress::default());
        let result = installer.install(&app, &tx, CancelFlag::new()).await;

        match result {
            Err(InstallError::AlreadyInFlight(name)) => assert_eq!(name, "QI Duplicate"),
            other => panic!("Expected AlreadyInFlight, got: {:?}", other),
        }
        assert_eq!(tx.borrow().phase, InstallPhase::Failed);
    }

    #[tokio::test]
    async fn test_install_cancelled_reports_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/app.exe"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 2048]))
            .mount(&server)
            .await;

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        let app = test_app("QI Cancelled", &format!("{}/app.exe", server.uri()));
        let cancel = CancelFlag::new();
        cancel.cancel();

        let (tx, _rx) = watch::channel(InstallProgress::default());
        let result = installer.install(&app, &tx, cancel).await;

        assert!(matches!(result, Err(InstallError::Cancelled)));
        let last = tx.borrow().clone();
        assert_eq!(last.phase, InstallPhase::Failed);
        assert_eq!(last.error.as_deref(), Some("Install cancelled"));

        std::fs::remove_file(Installer::destination_for(&app.name)).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_reports_complete_for_exit_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/installer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"#!/bin/sh\nexit 0\n".to_vec()),
            )
            .mount(&server)
            .await;

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        let app = test_app("QI Exit Zero", &format!("{}/installer", server.uri()));
        let dest = prepare_executable_dest(&app.name);

        let (tx, _rx) = watch::channel(InstallProgress::default());
        let outcome = installer
            .install(&app, &tx, CancelFlag::new())
            .await
            .unwrap();

        assert!(outcome.exit_status.success());
        assert_eq!(outcome.installer_path, dest);

        let last = tx.borrow().clone();
        assert_eq!(last.phase, InstallPhase::Complete);
        assert_eq!(last.status, "QI Exit Zero Installation Complete!");
        assert_eq!(last.percent, Some(100));

        std::fs::remove_file(&dest).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_reports_complete_for_nonzero_exit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/installer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"#!/bin/sh\nexit 7\n".to_vec()),
            )
            .mount(&server)
            .await;

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        let app = test_app("QI Exit Seven", &format!("{}/installer", server.uri()));
        let dest = prepare_executable_dest(&app.name);

        let (tx, _rx) = watch::channel(InstallProgress::default());
        let outcome = installer
            .install(&app, &tx, CancelFlag::new())
            .await
            .unwrap();

        // A failing installer still reports completion; only the outcome
        // records the real exit.
        assert_eq!(outcome.exit_status.code(), Some(7));

        let last = tx.borrow().clone();
        assert_eq!(last.phase, InstallPhase::Complete);
        assert_eq!(last.status, "QI Exit Seven Installation Complete!");
        assert_eq!(last.percent, Some(100));

        std::fs::remove_file(&dest).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sized_download_percent_steps_precede_installing() {
        // A 1000-byte shell script served with Content-Length in 200-byte
        // chunks: five download steps of 20% each.
        let mut body = b"#!/bin/sh\n".to_vec();
        body.extend(std::iter::repeat(b'#').take(982));
        body.push(b'\n');
        body.extend_from_slice(b"exit 0\n");
        assert_eq!(body.len(), 1000);
        let chunks: Vec<Vec<u8>> = body.chunks(200).map(|c| c.to_vec()).collect();
        let url = testserver::serve_sized_once(chunks).await;

        let app = test_app("QI Percent Steps", &url);
        let dest = prepare_executable_dest(&app.name);

        let (tx, mut rx) = watch::channel(InstallProgress::default());
        let collector = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                seen.push(rx.borrow_and_update().clone());
            }
            seen
        });

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        installer
            .install(&app, &tx, CancelFlag::new())
            .await
            .unwrap();
        drop(tx);

        let seen = collector.await.unwrap();

        let download_percents: Vec<u8> = seen
            .iter()
            .filter(|p| p.phase == InstallPhase::Downloading)
            .filter_map(|p| p.percent)
            .collect();
        assert_eq!(download_percents, vec![0, 20, 40, 60, 80, 100]);

        // Every download payload lands before the first Installing one.
        let first_installing = seen
            .iter()
            .position(|p| p.phase == InstallPhase::Installing)
            .expect("no Installing payload observed");
        let last_downloading = seen
            .iter()
            .rposition(|p| p.phase == InstallPhase::Downloading)
            .unwrap();
        assert!(last_downloading < first_installing);

        std::fs::remove_file(&dest).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_status_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/installer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"#!/bin/sh\nexit 0\n".to_vec()),
            )
            .mount(&server)
            .await;

        let installer = Installer::new()
            .unwrap()
            .with_launch_mode(LaunchMode::Direct);
        let app = test_app("QI Status Order", &format!("{}/installer", server.uri()));
        let dest = prepare_executable_dest(&app.name);

        let (tx, mut rx) = watch::channel(InstallProgress::default());
        let collector = tokio::spawn(async move {
            let mut seen: Vec<String> = Vec::new();
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().status.clone();
                if seen.last() != Some(&status) {
                    seen.push(status);
                }
            }
            seen
        });

        installer
            .install(&app, &tx, CancelFlag::new())
            .await
            .unwrap();
        drop(tx);

        let seen = collector.await.unwrap();
        let expected = [
            "Downloading".to_string(),
            "Installing".to_string(),
            "QI Status Order Installation Complete!".to_string(),
        ];
        // Observed statuses must be an in-order subsequence ending in the
        // completion message; the watch channel may skip intermediates.
        let mut cursor = 0;
        for status in &seen {
            while cursor < expected.len() && &expected[cursor] != status {
                cursor += 1;
            }
            assert!(cursor < expected.len(), "unexpected status {:?}", status);
        }
        assert_eq!(seen.last(), Some(&expected[2]));

        std::fs::remove_file(&dest).ok();
    }
}
