// Colors and semantic styles for the dashboard. Edit here to change the look.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// App background
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Card background - subtle lift from black
pub const BG_CARD: Color = Color::Rgb(18, 18, 18);

/// Selected list row
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Active tab
pub const BG_TAB_ACTIVE: Color = Color::Rgb(28, 28, 32);

/// Status bar strip
pub const BG_STATUSBAR: Color = Color::Rgb(12, 12, 12);

/// Input field background
pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Interactive elements, focus
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);
/// Pills and tags
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLE FUNCTIONS
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn text_bold() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_ACTIVE)
    } else {
        Style::default().fg(BORDER_INACTIVE)
    }
}

pub fn error_text() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

/// Rounded "pill" label, e.g. `Done: 2 / 3`
pub fn pill() -> Style {
    Style::default().fg(ACCENT_SPECIAL).bg(BG_CARD)
}

pub fn selected_row() -> Style {
    Style::default().bg(BG_SELECTED)
}
