// Global status bar at the very bottom of the app.
// Notification on the left, received activity count on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

/// Right column label, e.g. `● 12 events `
fn activity_label(activity_count: usize) -> String {
    format!("● {} events ", activity_count)
}

pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    activity_count: usize,
) {
    let label = activity_label(activity_count);
    let feed_width = (label.width() + 1) as u16;

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(feed_width)]).split(area);

    let notification_paragraph = if let Some(notification) = current_notification {
        let color = match notification.level {
            NotificationLevel::Info => theme::ACCENT_PRIMARY,
            NotificationLevel::Success => theme::ACCENT_SUCCESS,
            NotificationLevel::Warning => theme::ACCENT_WARNING,
            NotificationLevel::Error => theme::ACCENT_ERROR,
        };
        let icon = notification.level.icon();
        let available = (chunks[0].width as usize).saturating_sub(icon.width() + 2);
        let message = truncate_with_ellipsis(&notification.message, available);

        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(message, Style::default().fg(color)),
        ]))
    } else {
        Paragraph::new("")
    };
    f.render_widget(
        notification_paragraph.style(Style::default().bg(theme::BG_STATUSBAR)),
        chunks[0],
    );

    let padding = (chunks[1].width as usize).saturating_sub(label.width());
    let feed = Paragraph::new(format!("{}{}", " ".repeat(padding), label))
        .style(Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_STATUSBAR));
    f.render_widget(feed, chunks[1]);
}
