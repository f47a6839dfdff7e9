//! UI modules for the launcher
//!
//! This module contains the UI rendering code, organized by tab.

mod apps_tab;
mod components;
mod settings_tab;
pub mod theme;

pub use apps_tab::render_apps_tab;
pub use components::{render_about_dialog, render_tab};
pub use settings_tab::render_settings_tab;
