//! Today tab: date, summary pills and the habit list with today's check-ins.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use ops_core::models::CheckInStatus;

use super::error_line;
use crate::ui::app::{App, TodayEdit};
use crate::ui::format::truncate_with_ellipsis;
use crate::ui::{theme, InputMode};

pub fn render_today(f: &mut Frame, app: &App, area: Rect) {
    let today = &app.today;
    let editing = app.input_mode == InputMode::Editing && today.editing.is_some();

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(if today.error.is_some() { 1 } else { 0 }),
        Constraint::Min(0),
        Constraint::Length(if editing { 3 } else { 0 }),
    ])
    .split(area);

    let summary = &today.summary;
    let header = Line::from(vec![
        Span::styled(today.date.clone(), theme::text_bold()),
        Span::raw("  "),
        Span::styled(
            format!(" Done: {} / {} ", summary.done_count, summary.total_active_habits),
            theme::pill(),
        ),
        Span::raw(" "),
        Span::styled(format!(" Streak: {} days ", summary.streak_days), theme::pill()),
        Span::styled(
            if today.loading { "  loading…" } else { "" },
            theme::text_dim(),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    if let Some(error) = &today.error {
        f.render_widget(Paragraph::new(error_line(error)), chunks[1]);
    }

    render_habit_list(f, app, chunks[2]);

    if editing {
        let title = match &today.editing {
            Some(TodayEdit::Note(_)) => " Note ",
            _ => " New habit ",
        };
        let input = Paragraph::new(today.input.display_with_cursor())
            .style(Style::default().fg(theme::TEXT_PRIMARY).bg(theme::BG_INPUT))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_style(true))
                    .title(title),
            );
        f.render_widget(input, chunks[3]);
    }
}

fn render_habit_list(f: &mut Frame, app: &App, area: Rect) {
    let today = &app.today;

    if today.habits.is_empty() {
        let empty = Paragraph::new("No habits yet. Press a to add one.").style(theme::text_muted());
        f.render_widget(empty, area);
        return;
    }

    // Keep the selected row visible
    let visible = area.height as usize;
    let offset = today.selected.saturating_sub(visible.saturating_sub(1));
    let width = area.width as usize;

    let lines: Vec<Line> = today
        .habits
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, habit)| {
            let selected = i == today.selected;
            let marker = if selected { "▸ " } else { "  " };

            let status = today.status_for(&habit.id);
            let status_color = match status {
                Some(CheckInStatus::Done) => theme::ACCENT_SUCCESS,
                Some(CheckInStatus::Skipped) => theme::ACCENT_WARNING,
                None => theme::TEXT_DIM,
            };
            let status_text = format!("{:<7}", status.map(|s| s.label()).unwrap_or("·"));
            let active = if habit.active { "on " } else { "off" };
            let name_style = if habit.active {
                theme::text_primary()
            } else {
                theme::text_dim()
            };

            let note = today.note_for(&habit.id);
            let note_budget = width.saturating_sub(habit.name.chars().count() + 20);
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme::ACCENT_PRIMARY)),
                Span::styled(status_text, Style::default().fg(status_color)),
                Span::raw(" "),
                Span::styled(active, theme::text_muted()),
                Span::raw(" "),
                Span::styled(habit.name.clone(), name_style.add_modifier(if selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                })),
            ];
            if !note.is_empty() && note_budget > 0 {
                spans.push(Span::styled(
                    format!("  {}", truncate_with_ellipsis(note, note_budget)),
                    theme::text_muted(),
                ));
            }

            let line = Line::from(spans);
            if selected {
                line.style(theme::selected_row())
            } else {
                line
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
