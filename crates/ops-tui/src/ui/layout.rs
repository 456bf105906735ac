// Layout constants shared by the render pass and the views

use ratatui::layout::Rect;

/// Horizontal padding for main content areas (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

/// Title + subtitle
pub const HEADER_HEIGHT: u16 = 2;

/// Tab bar plus a blank separator line
pub const TAB_BAR_HEIGHT: u16 = 2;

/// Key hints
pub const FOOTER_HEIGHT: u16 = 1;

/// Single line at the very bottom of the app
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Interview form: topic/rating row, question, answer, tags
pub const INTERVIEW_FORM_HEIGHT: u16 = 15;

/// Apply horizontal padding to a Rect (reduces width and shifts x)
#[inline]
pub fn with_horizontal_padding(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y,
        width: area.width.saturating_sub(padding * 2),
        height: area.height,
    }
}

#[inline]
pub fn with_content_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, CONTENT_PADDING_H)
}
