//! UI-related application state

use crate::ui::theme::Theme;

/// Application tabs representing the main navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Apps tab: category picker and per-app install cards
    #[default]
    Apps,
    /// Settings tab: theme selection and launcher preferences
    Settings,
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Catalog category shown in the Apps tab
    pub selected_category: String,
    /// Edit buffer for the catalog path setting
    pub catalog_path_input: String,
}

impl UiState {
    /// Create a new UiState with the given theme and starting category
    pub fn new(theme: Theme, selected_category: String, catalog_path_input: String) -> Self {
        Self {
            current_theme: theme,
            active_tab: Tab::default(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            selected_category,
            catalog_path_input,
        }
    }
}
