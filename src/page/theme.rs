//! Page theme and styling
//!
//! Light and dark palettes for the single-page UI. The active mode is
//! page-session state toggled from the header and reapplied to the egui
//! context whenever it changes.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

/// Visual mode toggled from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Label for the header toggle button (names the mode it switches to)
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Light mode",
            ThemeMode::Light => "Dark mode",
        }
    }
}

/// Color palette for one theme mode
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,
    pub bg_hover: Color32,
    pub accent: Color32,
    pub accent_success: Color32,
    pub accent_error: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg_dark: Color32::from_rgb(18, 18, 24),
        bg_medium: Color32::from_rgb(28, 28, 36),
        bg_light: Color32::from_rgb(38, 38, 48),
        bg_hover: Color32::from_rgb(48, 48, 60),
        accent: Color32::from_rgb(88, 166, 255),
        accent_success: Color32::from_rgb(46, 204, 113),
        accent_error: Color32::from_rgb(231, 76, 60),
        text_primary: Color32::from_rgb(240, 240, 245),
        text_secondary: Color32::from_rgb(160, 160, 175),
        text_muted: Color32::from_rgb(100, 100, 115),
        border: Color32::from_rgb(50, 50, 65),
    };

    pub const LIGHT: Palette = Palette {
        bg_dark: Color32::from_rgb(242, 242, 247),
        bg_medium: Color32::from_rgb(252, 252, 255),
        bg_light: Color32::from_rgb(232, 232, 240),
        bg_hover: Color32::from_rgb(220, 220, 230),
        accent: Color32::from_rgb(36, 110, 210),
        accent_success: Color32::from_rgb(30, 150, 80),
        accent_error: Color32::from_rgb(200, 50, 40),
        text_primary: Color32::from_rgb(25, 25, 35),
        text_secondary: Color32::from_rgb(90, 90, 105),
        text_muted: Color32::from_rgb(140, 140, 155),
        border: Color32::from_rgb(205, 205, 215),
    };

    pub const fn of(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::DARK,
            ThemeMode::Light => Self::LIGHT,
        }
    }
}

/// Apply the palette for `mode` to the egui context
pub fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    let palette = Palette::of(mode);
    let mut style = (*ctx.style()).clone();

    let mut visuals = match mode {
        ThemeMode::Dark => Visuals::dark(),
        ThemeMode::Light => Visuals::light(),
    };

    // Window and panel backgrounds
    visuals.window_fill = palette.bg_medium;
    visuals.panel_fill = palette.bg_dark;
    visuals.faint_bg_color = palette.bg_light;
    visuals.extreme_bg_color = palette.bg_dark;

    // Widget colors
    visuals.widgets.noninteractive.bg_fill = palette.bg_medium;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_secondary);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = palette.bg_light;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = palette.bg_hover;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.widgets.open.bg_fill = palette.bg_hover;
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.open.rounding = Rounding::same(6.0);

    // Selection and hyperlinks
    visuals.selection.bg_fill = color_with_alpha(palette.accent, 77);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.hyperlink_color = palette.accent;

    // Window appearance
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, palette.border);

    style.visuals = visuals;

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    // Font sizes
    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(15.0, FontFamily::Monospace),
        ),
        (
            TextStyle::Button,
            FontId::new(16.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        ),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
