//! Application state modules
//!
//! This module contains grouped state structs extracted from QuickInstallApp.
//! Each state struct owns its related fields and poll methods.

mod install;
mod ui;

pub use install::InstallState;
pub use ui::{Tab, UiState};

/// Events that state poll methods can return.
/// These communicate results back to QuickInstallApp without direct mutation.
#[derive(Debug)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
