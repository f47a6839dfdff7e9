//! Shared UI components for the launcher

use eframe::egui::{self, Color32, RichText, Rounding, Vec2};

use crate::app::QuickInstallApp;
use crate::state::Tab;

/// Render a tab button
pub fn render_tab(app: &mut QuickInstallApp, ui: &mut egui::Ui, tab: Tab, label: &str) {
    let theme = &app.ui.current_theme;
    let is_active = app.ui.active_tab == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color))
        .fill(bg)
        .rounding(Rounding {
            nw: 6.0,
            ne: 6.0,
            sw: 0.0,
            se: 0.0,
        })
        .min_size(Vec2::new(80.0, 32.0));

    if ui.add(button).clicked() {
        app.ui.active_tab = tab;
    }
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut QuickInstallApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = &app.ui.current_theme;

    egui::Window::new("About Quick Install")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 240.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                // App name
                ui.label(
                    RichText::new("Quick Install")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );

                ui.add_space(4.0);
                ui.label(
                    RichText::new("App Launcher")
                        .size(14.0)
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);

                // Version
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                // Description
                ui.label(
                    RichText::new("Downloads and runs installers")
                        .color(theme.text_secondary),
                );
                ui.label(
                    RichText::new("straight from the catalog")
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);

                // Source link
                if ui.link("GitHub").clicked() {
                    let _ = open::that("https://github.com/quickinstall/quickinstall");
                }

                ui.add_space(12.0);

                // Built with
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                // Close button
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
