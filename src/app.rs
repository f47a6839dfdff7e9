use std::collections::HashMap;
use std::path::PathBuf;

use eframe::egui::{self, RichText};

use crate::catalog::{self, AppDescriptor, Catalog};
use crate::config::{Config, LauncherConfig};
use crate::installer::Installer;
use crate::state::{InstallState, StateEvent, Tab, UiState};
use crate::ui::{render_about_dialog, render_apps_tab, render_settings_tab, render_tab};

/// Main application state
pub struct QuickInstallApp {
    /// Application configuration
    pub config: Config,
    /// The app catalog, built-in or user-provided
    pub catalog: Catalog,
    /// Shared install engine
    installer: Installer,
    /// Per-app install state, keyed by app name
    pub installs: HashMap<String, InstallState>,
    /// UI state
    pub ui: UiState,
    /// Status message for the status bar
    pub status_message: String,
}

impl QuickInstallApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load_or_default();
        let catalog = catalog::load_catalog(config.launcher.catalog_path.as_deref());
        let installer = Installer::default();

        let selected_category =
            starting_category(&catalog, &config.launcher.default_category);
        let catalog_path_input = config
            .launcher
            .catalog_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let ui = UiState::new(
            config.launcher.theme.theme(),
            selected_category,
            catalog_path_input,
        );

        Self {
            config,
            catalog,
            installer,
            installs: HashMap::new(),
            ui,
            status_message: "Ready".to_string(),
        }
    }

    /// Start installing `descriptor`, replacing any finished state for it
    pub fn start_install(&mut self, descriptor: &AppDescriptor) {
        if self.is_installing(&descriptor.name) {
            return;
        }

        tracing::info!("Starting install of {}", descriptor.name);
        self.status_message = format!("Downloading {}...", descriptor.name);
        self.installs.insert(
            descriptor.name.clone(),
            InstallState::start(&self.installer, descriptor.clone()),
        );
    }

    /// Request cancellation of a running install
    pub fn cancel_install(&mut self, name: &str) {
        if let Some(state) = self.installs.get(name) {
            state.request_cancel();
            self.status_message = format!("Cancelling {}...", name);
        }
    }

    /// Check if an install for `name` is currently running
    pub fn is_installing(&self, name: &str) -> bool {
        self.installs
            .get(name)
            .map(|s| s.is_running())
            .unwrap_or(false)
    }

    /// Poll all install tasks and handle their events
    fn poll_installs(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        for state in self.installs.values_mut() {
            events.extend(state.poll(ctx));
        }
        self.handle_events(events);
    }

    /// Apply events returned by state poll methods
    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.status_message = msg,
                StateEvent::LogError(msg) => {
                    tracing::error!("{}", msg);
                    self.status_message = msg;
                }
                StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
            }
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Persist the settings form and reload the catalog
    pub fn apply_settings(&mut self) {
        let input = self.ui.catalog_path_input.trim();
        self.config.launcher.catalog_path = if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(input))
        };

        self.save_config();
        self.reload_catalog();
        self.status_message = "Settings saved".to_string();
    }

    /// Restore default settings
    pub fn reset_settings(&mut self) {
        self.config.launcher = LauncherConfig::default();
        self.ui.catalog_path_input.clear();
        self.ui.current_theme = self.config.launcher.theme.theme();
        self.ui.theme_dirty = true;

        self.save_config();
        self.reload_catalog();
        self.status_message = "Settings reset to defaults".to_string();
    }

    /// Reload the catalog from the configured source, keeping the
    /// selected category valid
    fn reload_catalog(&mut self) {
        self.catalog = catalog::load_catalog(self.config.launcher.catalog_path.as_deref());

        let selected_still_exists = self
            .catalog
            .category_names()
            .iter()
            .any(|n| *n == self.ui.selected_category);
        if !selected_still_exists {
            self.ui.selected_category =
                starting_category(&self.catalog, &self.config.launcher.default_category);
        }
    }
}

/// Starting category: the configured default when the catalog has it,
/// otherwise the first category in the catalog
fn starting_category(catalog: &Catalog, preferred: &str) -> String {
    if catalog.category_names().iter().any(|n| *n == preferred) {
        preferred.to_string()
    } else {
        catalog
            .category_names()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

impl eframe::App for QuickInstallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async tasks
        self.poll_installs(ctx);

        // Apply theme when it changed
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let active = self.installs.values().filter(|s| s.is_running()).count();
                    if active > 0 {
                        let label = if active == 1 {
                            "1 install running".to_string()
                        } else {
                            format!("{} installs running", active)
                        };
                        ui.label(
                            RichText::new(label)
                                .color(self.ui.current_theme.text_muted)
                                .size(11.0),
                        );
                    }
                });
            });
        });

        // Main content area with tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                render_tab(self, ui, Tab::Apps, "Apps");
                render_tab(self, ui, Tab::Settings, "Settings");
            });

            ui.separator();
            ui.add_space(8.0);

            match self.ui.active_tab {
                Tab::Apps => render_apps_tab(self, ui),
                Tab::Settings => render_settings_tab(self, ui),
            }
        });

        // Modal dialogs
        render_about_dialog(self, ctx);
    }
}
