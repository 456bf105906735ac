pub mod health;
pub mod interview;
pub mod today;

pub use health::render_health;
pub use interview::render_interview;
pub use today::render_today;

use ratatui::text::{Line, Span};

use crate::ui::theme;

/// `⚠ <message>` line shown at the top of a tab after a failed call
pub(crate) fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(format!("⚠ {}", message), theme::error_text()))
}
