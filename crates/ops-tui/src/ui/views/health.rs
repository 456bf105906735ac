use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;

use super::error_line;
use crate::ui::app::App;
use crate::ui::format::{pretty_json_lines, truncate_with_ellipsis};
use crate::ui::theme;

/// Probes on top, live activity below, webhooks at the bottom when present
pub fn render_health(f: &mut Frame, app: &App, area: Rect) {
    let health = &app.health;
    let webhook_height = if health.webhooks.is_empty() {
        0
    } else {
        (health.webhooks.len() as u16 + 2).min(8)
    };

    let chunks = Layout::vertical([
        Constraint::Length(if health.error.is_some() { 1 } else { 0 }),
        Constraint::Percentage(40),
        Constraint::Min(3),
        Constraint::Length(webhook_height),
    ])
    .split(area);

    if let Some(error) = &health.error {
        f.render_widget(Paragraph::new(error_line(error)), chunks[0]);
    }

    let probes = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let ready_lines: Vec<Line> = match &health.ready {
        Some(ready) => pretty_json_lines(ready)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, theme::text_primary())))
            .collect(),
        None if health.loading => vec![Line::from(Span::styled("loading…", theme::text_dim()))],
        None => vec![Line::from(Span::styled("Press r to check", theme::text_muted()))],
    };
    f.render_widget(
        Paragraph::new(ready_lines)
            .scroll((u16::try_from(health.scroll).unwrap_or(u16::MAX), 0))
            .block(card(" Ready ")),
        probes[0],
    );

    let live_line = match &health.live {
        Some(Value::Object(map)) => match map.get("status").and_then(Value::as_str) {
            Some(status) => status.to_string(),
            None => Value::Object(map.clone()).to_string(),
        },
        Some(other) => other.to_string(),
        None if health.ready.is_some() => "unreachable".to_string(),
        None => "-".to_string(),
    };
    let live_style = if health.live.is_some() {
        theme::text_primary().fg(theme::ACCENT_SUCCESS)
    } else {
        theme::text_muted()
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(live_line, live_style))).block(card(" Live ")),
        probes[1],
    );

    render_activity(f, app, chunks[2]);

    if !health.webhooks.is_empty() {
        let width = chunks[3].width.saturating_sub(2) as usize;
        let lines: Vec<Line> = health
            .webhooks
            .iter()
            .map(|event| {
                Line::from(Span::styled(
                    truncate_with_ellipsis(&event.to_string(), width),
                    theme::text_muted(),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(card(" Webhooks ")), chunks[3]);
    }
}

fn render_activity(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Live activity ({}) ", app.activity.len());
    let width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = if app.activity.is_empty() {
        vec![Line::from(Span::styled("Waiting for events…", theme::text_dim()))]
    } else {
        app.activity
            .iter()
            .map(|record| {
                let time = record.received_at_display();
                let budget = width.saturating_sub(time.chars().count() + 3);
                Line::from(vec![
                    Span::styled(time, theme::text_muted()),
                    Span::styled(" — ", theme::text_dim()),
                    Span::styled(
                        truncate_with_ellipsis(&record.payload_compact(), budget),
                        theme::text_primary(),
                    ),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(card(&title)), area);
}

fn card(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(title.to_string(), theme::text_muted()))
}
