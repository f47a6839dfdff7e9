//! Apps tab UI rendering

use eframe::egui::{self, RichText};

use crate::app::QuickInstallApp;
use crate::catalog::AppDescriptor;
use crate::installer::InstallPhase;
use crate::state::InstallState;
use crate::ui::theme::Theme;
use crate::util::format_size;

/// Render the apps tab content
pub fn render_apps_tab(app: &mut QuickInstallApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    // Category row
    ui.horizontal(|ui| {
        ui.label(RichText::new("Category:").color(theme.text_muted));

        let categories: Vec<String> = app
            .catalog
            .category_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        egui::ComboBox::from_id_salt("category_select")
            .selected_text(app.ui.selected_category.clone())
            .show_ui(ui, |ui| {
                for name in &categories {
                    if ui
                        .selectable_label(app.ui.selected_category == *name, name)
                        .clicked()
                    {
                        app.ui.selected_category = name.clone();
                    }
                }
            });

        let count = app.catalog.lookup(&app.ui.selected_category).len();
        ui.label(
            RichText::new(format!("{} apps", count))
                .color(theme.text_muted)
                .size(11.0),
        );
    });

    ui.add_space(12.0);

    // Cards in catalog order for the selected category
    let apps: Vec<AppDescriptor> = app.catalog.lookup(&app.ui.selected_category).to_vec();

    if apps.is_empty() {
        ui.label(RichText::new("No apps in this category.").color(theme.text_muted));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("apps_scroll")
        .show(ui, |ui| {
            for descriptor in &apps {
                render_app_card(app, ui, descriptor, &theme);
                ui.add_space(8.0);
            }
        });
}

/// Render one app card with its install controls
fn render_app_card(
    app: &mut QuickInstallApp,
    ui: &mut egui::Ui,
    descriptor: &AppDescriptor,
    theme: &Theme,
) {
    egui::Frame::none()
        .fill(theme.bg_medium)
        .rounding(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(&descriptor.name)
                            .color(theme.text_primary)
                            .size(16.0)
                            .strong(),
                    );
                    ui.label(
                        RichText::new(&descriptor.download_url)
                            .color(theme.text_muted)
                            .size(10.0),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let running = app.is_installing(&descriptor.name);
                    let can_cancel = app
                        .installs
                        .get(&descriptor.name)
                        .map(|s| {
                            matches!(
                                s.progress.phase,
                                InstallPhase::Idle | InstallPhase::Downloading
                            )
                        })
                        .unwrap_or(false);

                    if running {
                        // The launched installer cannot be cancelled, only
                        // the download can.
                        if can_cancel && ui.button("Cancel").clicked() {
                            app.cancel_install(&descriptor.name);
                        }
                    } else {
                        let install_btn = egui::Button::new(
                            RichText::new("Install").color(theme.text_primary),
                        )
                        .fill(theme.accent_muted);

                        if ui.add(install_btn).clicked() {
                            app.start_install(descriptor);
                        }
                    }
                });
            });

            // Progress area, present once an install has been started
            if let Some(state) = app.installs.get(&descriptor.name) {
                ui.add_space(8.0);
                render_install_progress(ui, state, theme);
            }
        });
}

/// Render the progress block inside an app card
fn render_install_progress(ui: &mut egui::Ui, state: &InstallState, theme: &Theme) {
    let progress = &state.progress;

    let phase_color = match progress.phase {
        InstallPhase::Idle => theme.text_muted,
        InstallPhase::Downloading | InstallPhase::Installing => theme.accent,
        InstallPhase::Complete => theme.success,
        InstallPhase::Failed => theme.error,
    };

    ui.label(
        RichText::new(progress.status_line())
            .color(phase_color)
            .size(13.0)
            .strong(),
    );
    ui.add_space(4.0);

    match progress.phase {
        InstallPhase::Downloading => {
            match progress.percent {
                Some(_) => {
                    ui.add(egui::ProgressBar::new(progress.fraction()).show_percentage());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!(
                            "{} / {}",
                            format_size(progress.bytes_downloaded),
                            format_size(progress.total_bytes)
                        ))
                        .color(theme.text_muted)
                        .size(11.0),
                    );
                }
                None => {
                    // Total size unknown, no percentage to show
                    ui.add(egui::ProgressBar::new(0.0).animate(true));
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!(
                            "{} downloaded",
                            format_size(progress.bytes_downloaded)
                        ))
                        .color(theme.text_muted)
                        .size(11.0),
                    );
                }
            }
        }
        InstallPhase::Installing => {
            // Waiting on the installer process, duration unknown
            ui.add(egui::ProgressBar::new(0.0).animate(true));
        }
        InstallPhase::Complete => {
            ui.add(egui::ProgressBar::new(1.0).show_percentage());
            if let Some(outcome) = &state.outcome {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "{} written, installer exited with {}",
                        format_size(outcome.bytes_downloaded),
                        outcome.exit_status
                    ))
                    .color(theme.text_muted)
                    .size(10.0),
                );
            }
        }
        InstallPhase::Failed => {
            if let Some(err) = progress.error.as_deref() {
                ui.label(RichText::new(err).color(theme.error).size(11.0));
            }
        }
        InstallPhase::Idle => {}
    }
}
