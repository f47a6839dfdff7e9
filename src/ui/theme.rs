use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Emerald,
    Midnight,
    Amber,
    Catppuccin,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Emerald,
            ThemePreset::Midnight,
            ThemePreset::Amber,
            ThemePreset::Catppuccin,
        ]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Emerald => "Emerald",
            ThemePreset::Midnight => "Midnight",
            ThemePreset::Amber => "Amber",
            ThemePreset::Catppuccin => "Catppuccin Mocha",
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Emerald => Theme::emerald(),
            ThemePreset::Midnight => Theme::midnight(),
            ThemePreset::Amber => Theme::amber(),
            ThemePreset::Catppuccin => Theme::catppuccin(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Emerald theme - green on dark navy, the classic launcher look
    pub fn emerald() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(16, 16, 26),
            bg_dark: Color32::from_rgb(24, 24, 38),
            bg_medium: Color32::from_rgb(30, 30, 47),
            bg_light: Color32::from_rgb(45, 45, 68),

            text_primary: Color32::from_rgb(245, 245, 250),
            text_secondary: Color32::from_rgb(198, 200, 215),
            text_muted: Color32::from_rgb(138, 140, 160),

            accent: Color32::from_rgb(76, 175, 80),         // Material Green 500
            accent_hover: Color32::from_rgb(102, 187, 106), // Material Green 400
            accent_muted: Color32::from_rgb(56, 130, 62),   // Darker green

            success: Color32::from_rgb(102, 187, 106), // Material Green 400
            warning: Color32::from_rgb(255, 193, 7),   // Material Amber 500
            error: Color32::from_rgb(239, 83, 80),     // Material Red 400

            border: Color32::from_rgb(58, 58, 84),
            selection: Color32::from_rgb(76, 175, 80).gamma_multiply(0.3),
        }
    }

    /// Midnight theme - cool blue, easy on the eyes
    pub fn midnight() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(10, 14, 24),
            bg_dark: Color32::from_rgb(15, 20, 34),
            bg_medium: Color32::from_rgb(22, 28, 45),
            bg_light: Color32::from_rgb(34, 42, 64),

            text_primary: Color32::from_rgb(240, 244, 252),
            text_secondary: Color32::from_rgb(196, 205, 222),
            text_muted: Color32::from_rgb(128, 140, 162),

            accent: Color32::from_rgb(66, 165, 245),         // Material Blue 400
            accent_hover: Color32::from_rgb(100, 181, 246),  // Material Blue 300
            accent_muted: Color32::from_rgb(40, 116, 180),   // Darker blue

            success: Color32::from_rgb(102, 187, 106), // Material Green 400
            warning: Color32::from_rgb(255, 202, 40),  // Material Amber 400
            error: Color32::from_rgb(239, 83, 80),     // Material Red 400

            border: Color32::from_rgb(45, 55, 80),
            selection: Color32::from_rgb(66, 165, 245).gamma_multiply(0.3),
        }
    }

    /// Amber theme - warm orange on neutral greys
    pub fn amber() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(18, 18, 18),
            bg_dark: Color32::from_rgb(26, 26, 26),
            bg_medium: Color32::from_rgb(33, 33, 33),
            bg_light: Color32::from_rgb(48, 48, 48),

            text_primary: Color32::from_rgb(250, 250, 250),
            text_secondary: Color32::from_rgb(202, 202, 202),
            text_muted: Color32::from_rgb(142, 142, 142),

            accent: Color32::from_rgb(255, 179, 0),        // Material Amber 600
            accent_hover: Color32::from_rgb(255, 202, 40), // Material Amber 400
            accent_muted: Color32::from_rgb(186, 130, 0),  // Darker amber

            success: Color32::from_rgb(102, 187, 106), // Material Green 400
            warning: Color32::from_rgb(255, 238, 88),  // Material Yellow 400
            error: Color32::from_rgb(239, 83, 80),     // Material Red 400

            border: Color32::from_rgb(64, 64, 64),
            selection: Color32::from_rgb(255, 179, 0).gamma_multiply(0.3),
        }
    }

    /// Catppuccin Mocha theme - popular community palette
    pub fn catppuccin() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(17, 17, 27), // Crust
            bg_dark: Color32::from_rgb(24, 24, 37),    // Mantle
            bg_medium: Color32::from_rgb(30, 30, 46),  // Base
            bg_light: Color32::from_rgb(49, 50, 68),   // Surface0

            text_primary: Color32::from_rgb(205, 214, 244),   // Text
            text_secondary: Color32::from_rgb(186, 194, 222), // Subtext1
            text_muted: Color32::from_rgb(147, 153, 178),     // Overlay1

            accent: Color32::from_rgb(203, 166, 247),       // Mauve
            accent_hover: Color32::from_rgb(180, 190, 254), // Lavender
            accent_muted: Color32::from_rgb(160, 128, 200), // Darker mauve

            success: Color32::from_rgb(166, 227, 161), // Green
            warning: Color32::from_rgb(249, 226, 175), // Yellow
            error: Color32::from_rgb(243, 139, 168),   // Red

            border: Color32::from_rgb(69, 71, 90), // Surface1
            selection: Color32::from_rgb(203, 166, 247).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        // Window and panel backgrounds
        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        // Widget backgrounds
        visuals.widgets.noninteractive.bg_fill = self.bg_medium;
        visuals.widgets.noninteractive.weak_bg_fill = self.bg_light;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        // Inactive widgets
        visuals.widgets.inactive.bg_fill = self.bg_medium;
        visuals.widgets.inactive.weak_bg_fill = self.bg_light;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Hovered widgets
        visuals.widgets.hovered.bg_fill = self.bg_light;
        visuals.widgets.hovered.weak_bg_fill = self.bg_light;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Active/pressed widgets
        visuals.widgets.active.bg_fill = self.accent_muted;
        visuals.widgets.active.weak_bg_fill = self.accent_muted;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent_hover);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Open widgets (dropdowns, etc)
        visuals.widgets.open.bg_fill = self.bg_light;
        visuals.widgets.open.weak_bg_fill = self.bg_light;
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Selection
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        // Hyperlinks
        visuals.hyperlink_color = self.accent;

        // Window styling
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;

        // Popup styling
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}
