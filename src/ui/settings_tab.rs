//! Settings tab UI rendering

use eframe::egui::{self, RichText, Vec2};

use crate::app::QuickInstallApp;
use crate::ui::theme::ThemePreset;

/// Render the settings tab
pub fn render_settings_tab(app: &mut QuickInstallApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll")
        .show(ui, |ui| {
            // Use full available width
            let available_width = ui.available_width();

            ui.label(
                RichText::new("Settings")
                    .color(theme.text_primary)
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(16.0);

            // Appearance section
            egui::Frame::none()
                .fill(theme.bg_medium)
                .rounding(8.0)
                .inner_margin(16.0)
                .stroke(egui::Stroke::new(1.0, theme.border))
                .show(ui, |ui| {
                    ui.set_width(available_width - 32.0); // Account for frame margins
                    ui.label(
                        RichText::new("Appearance")
                            .color(theme.accent)
                            .size(13.0)
                            .strong(),
                    );
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Theme:").color(theme.text_muted));

                        let current_name = app.config.launcher.theme.name();
                        egui::ComboBox::from_id_salt("theme_select")
                            .selected_text(current_name)
                            .show_ui(ui, |ui| {
                                for preset in ThemePreset::all() {
                                    if ui
                                        .selectable_label(
                                            app.config.launcher.theme == *preset,
                                            preset.name(),
                                        )
                                        .clicked()
                                    {
                                        app.config.launcher.theme = *preset;
                                        app.ui.current_theme = preset.theme();
                                        app.ui.theme_dirty = true;
                                        app.save_config();
                                    }
                                }
                            });
                    });

                    // Theme preview swatches
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Preview:").color(theme.text_muted));
                        ui.add_space(8.0);

                        let swatch_size = Vec2::new(24.0, 24.0);
                        let colors = [
                            ("Background", theme.bg_dark),
                            ("Accent", theme.accent),
                            ("Success", theme.success),
                            ("Warning", theme.warning),
                            ("Error", theme.error),
                        ];

                        for (label, color) in colors {
                            let (rect, response) =
                                ui.allocate_exact_size(swatch_size, egui::Sense::hover());
                            ui.painter().rect_filled(rect, 4.0, color);
                            response.on_hover_text(label);
                            ui.add_space(4.0);
                        }
                    });
                });

            ui.add_space(12.0);

            // Catalog section
            egui::Frame::none()
                .fill(theme.bg_medium)
                .rounding(8.0)
                .inner_margin(16.0)
                .stroke(egui::Stroke::new(1.0, theme.border))
                .show(ui, |ui| {
                    ui.set_width(available_width - 32.0);
                    ui.label(
                        RichText::new("Catalog")
                            .color(theme.accent)
                            .size(13.0)
                            .strong(),
                    );
                    ui.add_space(12.0);

                    // Default category
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Default category:").color(theme.text_muted));

                        let categories: Vec<String> = app
                            .catalog
                            .category_names()
                            .iter()
                            .map(|s| s.to_string())
                            .collect();

                        egui::ComboBox::from_id_salt("default_category_select")
                            .selected_text(app.config.launcher.default_category.clone())
                            .show_ui(ui, |ui| {
                                for name in &categories {
                                    if ui
                                        .selectable_label(
                                            app.config.launcher.default_category == *name,
                                            name,
                                        )
                                        .clicked()
                                    {
                                        app.config.launcher.default_category = name.clone();
                                    }
                                }
                            });
                    });
                    ui.label(
                        RichText::new("  Category shown when the launcher starts")
                            .color(theme.text_muted)
                            .size(11.0),
                    );

                    ui.add_space(8.0);

                    // Catalog file override
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Catalog file:").color(theme.text_muted));
                        ui.add(
                            egui::TextEdit::singleline(&mut app.ui.catalog_path_input)
                                .hint_text("(built-in)")
                                .desired_width(320.0),
                        );
                    });
                    ui.label(
                        RichText::new("  Path to a catalog TOML file replacing the built-in one")
                            .color(theme.text_muted)
                            .size(11.0),
                    );

                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            app.apply_settings();
                        }
                        if ui.button("Reset").clicked() {
                            app.reset_settings();
                        }
                    });
                });

            ui.add_space(12.0);

            // Config file section
            egui::Frame::none()
                .fill(theme.bg_medium)
                .rounding(8.0)
                .inner_margin(16.0)
                .stroke(egui::Stroke::new(1.0, theme.border))
                .show(ui, |ui| {
                    ui.set_width(available_width - 32.0);
                    ui.label(
                        RichText::new("Config file")
                            .color(theme.accent)
                            .size(13.0)
                            .strong(),
                    );
                    ui.add_space(12.0);

                    match crate::config::Config::config_path() {
                        Ok(path) => {
                            ui.label(
                                RichText::new(path.to_string_lossy().to_string())
                                    .color(theme.text_secondary)
                                    .size(11.0),
                            );
                            ui.add_space(8.0);
                            if ui.button("Open config folder").clicked() {
                                if let Some(dir) = path.parent() {
                                    let _ = open::that(dir);
                                }
                            }
                        }
                        Err(e) => {
                            ui.label(
                                RichText::new(format!("Config path unavailable: {}", e))
                                    .color(theme.error)
                                    .size(11.0),
                            );
                        }
                    }
                });
        }); // ScrollArea
}
