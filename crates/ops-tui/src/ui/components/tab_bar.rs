use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::app::Tab;
use crate::ui::{layout, theme};

/// One line of tabs: `1 Today  2 Interview  3 Health`, active tab highlighted
pub fn render_tab_bar(f: &mut Frame, area: Rect, active: Tab) {
    let mut spans = vec![Span::raw(" ".repeat(layout::CONTENT_PADDING_H as usize))];

    for tab in Tab::ALL {
        let shortcut = format!(" {} ", tab.index() + 1);
        let title = format!("{} ", tab.title());
        if tab == active {
            spans.push(Span::styled(
                shortcut,
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .bg(theme::BG_TAB_ACTIVE),
            ));
            spans.push(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .bg(theme::BG_TAB_ACTIVE)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(shortcut, theme::text_dim()));
            spans.push(Span::styled(title, theme::text_muted()));
        }
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
