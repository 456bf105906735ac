//! Interview tab: entry form on top, saved entries below.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use ops_core::models::{interview::RATING_RANGE, InterviewEntry};

use super::error_line;
use crate::ui::app::{App, FormField};
use crate::ui::format::format_created_at;
use crate::ui::text_input::TextInput;
use crate::ui::{layout, theme, InputMode};

pub fn render_interview(f: &mut Frame, app: &App, area: Rect) {
    let interview = &app.interview;

    let chunks = Layout::vertical([
        Constraint::Length(layout::INTERVIEW_FORM_HEIGHT),
        Constraint::Length(if interview.error.is_some() { 1 } else { 0 }),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    render_form(f, app, chunks[0]);

    if let Some(error) = &interview.error {
        f.render_widget(Paragraph::new(error_line(error)), chunks[1]);
    }

    let filter = if interview.filter.is_empty() {
        "all topics".to_string()
    } else {
        format!("topic: {}", interview.filter)
    };
    let status = if interview.saving {
        "  saving…"
    } else if interview.loading {
        "  loading…"
    } else {
        ""
    };
    let list_header = Line::from(vec![
        Span::styled(format!("Entries ({}) ", interview.entries.len()), theme::text_bold()),
        Span::styled(format!(" {} ", filter), theme::pill()),
        Span::styled(status, theme::text_dim()),
    ]);
    f.render_widget(Paragraph::new(list_header), chunks[2]);

    let lines: Vec<Line> = interview
        .entries
        .iter()
        .skip(interview.scroll)
        .flat_map(entry_lines)
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[3]);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let interview = &app.interview;
    let form = &interview.form;
    let editing = app.input_mode == InputMode::Editing;

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Length(3),
    ])
    .split(area);
    let top = Layout::horizontal([Constraint::Min(0), Constraint::Length(22)]).split(rows[0]);

    let focus = |field: FormField| editing && interview.focus == field;

    render_field(f, top[0], FormField::Topic, &form.topic, focus(FormField::Topic));

    let stars: String = RATING_RANGE
        .map(|n| if n <= form.rating { '★' } else { '☆' })
        .collect();
    let rating = Paragraph::new(Line::from(vec![
        Span::styled(stars, Style::default().fg(theme::ACCENT_WARNING)),
        Span::styled(format!(" {}/5", form.rating), theme::text_muted()),
    ]))
    .block(field_block(FormField::Rating, focus(FormField::Rating)));
    f.render_widget(rating, top[1]);

    render_field(f, rows[1], FormField::Question, &form.question, focus(FormField::Question));
    render_field(f, rows[2], FormField::Answer, &form.answer, focus(FormField::Answer));
    render_field(f, rows[3], FormField::Tags, &form.tags, focus(FormField::Tags));
}

fn render_field(f: &mut Frame, area: Rect, field: FormField, input: &TextInput, focused: bool) {
    let text = if focused {
        input.display_with_cursor()
    } else {
        input.value().to_string()
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme::TEXT_PRIMARY).bg(theme::BG_INPUT))
        .wrap(Wrap { trim: false })
        .block(field_block(field, focused));
    f.render_widget(paragraph, area);
}

fn field_block(field: FormField, focused: bool) -> Block<'static> {
    let title_style = if focused {
        Style::default().fg(theme::ACCENT_PRIMARY)
    } else {
        theme::text_muted()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
        .title(Span::styled(format!(" {} ", field.label()), title_style))
}

/// Topic, rating and time; then Q, A and tags; then a blank line
fn entry_lines(entry: &InterviewEntry) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(
            entry.topic.clone(),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  rating {}/5", entry.rating), theme::text_muted()),
    ];
    if let Some(created_at) = &entry.created_at {
        header.push(Span::styled(
            format!("  {}", format_created_at(created_at)),
            theme::text_dim(),
        ));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(vec![
            Span::styled("Q: ", theme::text_muted()),
            Span::styled(entry.question.clone(), theme::text_primary()),
        ]),
    ];

    for (i, answer_line) in entry.answer.lines().enumerate() {
        let prefix = if i == 0 { "A: " } else { "   " };
        lines.push(Line::from(vec![
            Span::styled(prefix, theme::text_muted()),
            Span::styled(answer_line.to_string(), theme::text_primary()),
        ]));
    }

    let tags = entry.tag_list();
    if !tags.is_empty() {
        let spans: Vec<Span> = tags
            .into_iter()
            .flat_map(|t| [Span::styled(format!(" #{} ", t), theme::pill()), Span::raw(" ")])
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines
}
