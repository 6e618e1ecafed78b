//! Color palette and style constants for the brewlog TUI.

use ratatui::style::{Color, Modifier, Style};

use brew_proto::protocol::BeverageType;

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 16, 14);
pub const C_ACCENT: Color = Color::Rgb(232, 160, 48); // honey amber
pub const C_ERROR: Color = Color::Rgb(255, 88, 80);
pub const C_OK: Color = Color::Rgb(110, 196, 120);
pub const C_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(78, 74, 70);
pub const C_SECONDARY: Color = Color::Rgb(140, 132, 122);
pub const C_PRIMARY: Color = Color::Rgb(222, 216, 206);
pub const C_SELECTION_BG: Color = Color::Rgb(38, 32, 26);
pub const C_PANEL_BORDER: Color = Color::Rgb(48, 44, 40);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(200, 140, 60);
pub const C_FILTER_BG: Color = Color::Rgb(26, 22, 18);
pub const C_FILTER_FG: Color = Color::Rgb(255, 204, 96);
pub const C_CHIP_BG: Color = Color::Rgb(52, 40, 24);
pub const C_SECTION: Color = Color::Rgb(180, 150, 110);
pub const C_STAR: Color = Color::Rgb(255, 210, 50);
pub const C_TOAST_INFO: Color = Color::Rgb(96, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(110, 196, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BANNER_INIT: Color = Color::Rgb(96, 160, 220);
pub const C_BANNER_EMPTY: Color = Color::Rgb(200, 140, 60);
pub const C_MODE_NORMAL: Color = Color::Rgb(232, 160, 48);
pub const C_MODE_SEARCH: Color = Color::Rgb(96, 160, 220);
pub const C_MODE_SHEET: Color = Color::Rgb(176, 120, 220);

/// Tag colour per beverage type.
pub fn beverage_color(ty: BeverageType) -> Color {
    match ty {
        BeverageType::Mead => Color::Rgb(232, 184, 72),
        BeverageType::Beer => Color::Rgb(206, 140, 60),
        BeverageType::Wine => Color::Rgb(176, 70, 96),
        BeverageType::Cider => Color::Rgb(150, 196, 90),
        BeverageType::Kombucha => Color::Rgb(120, 180, 170),
        BeverageType::Other => C_SECONDARY,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_section() -> Style {
    Style::default().fg(C_SECTION).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_chip() -> Style {
    Style::default().fg(C_FILTER_FG).bg(C_CHIP_BG)
}
