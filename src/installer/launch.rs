//! Starting the downloaded installer and waiting for it to exit.
//!
//! The installer file is started the way a double-click would start it,
//! then awaited as a child process so completion can be reported from the
//! same task that ran the download. Stdio is not captured and no
//! arguments are passed.

use std::path::Path;
use std::process::ExitStatus;
use tokio::process::Command;

use super::InstallError;

/// How the downloaded installer is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    /// Platform default-handler launch, like a double-click.
    #[default]
    ShellOpen,
    /// Spawn the file itself as the process, no handler lookup.
    Direct,
}

/// Build the command that starts `path` under the given mode.
///
/// Windows associates `.exe` files with execution, so ShellOpen spawns the
/// installer directly there and the awaited exit is the installer's own.
/// On other platforms ShellOpen goes through the system opener (xdg-open
/// or equivalent) and the opener's exit stands in for the hand-off.
fn launch_command(path: &Path, mode: LaunchMode) -> Result<Command, InstallError> {
    match mode {
        LaunchMode::Direct => Ok(Command::new(path)),
        #[cfg(windows)]
        LaunchMode::ShellOpen => Ok(Command::new(path)),
        #[cfg(not(windows))]
        LaunchMode::ShellOpen => {
            let candidate = open::commands(path).into_iter().next().ok_or_else(|| {
                InstallError::Launch(format!("No opener for {}", path.display()))
            })?;
            Ok(Command::from(candidate))
        }
    }
}

/// Start `path` and wait for the spawned process to exit.
///
/// The exit status is returned for logging; callers deciding what to
/// report must not branch on it, passed or failed exits both mean "the
/// installer ran".
pub async fn launch_and_wait(path: &Path, mode: LaunchMode) -> Result<ExitStatus, InstallError> {
    let mut command = launch_command(path, mode)?;
    tracing::info!("Launching installer: {}", path.display());

    let mut child = command
        .spawn()
        .map_err(|e| InstallError::Launch(format!("{}: {}", path.display(), e)))?;

    let status = child
        .wait()
        .await
        .map_err(|e| InstallError::Launch(e.to_string()))?;

    Ok(status)
}
