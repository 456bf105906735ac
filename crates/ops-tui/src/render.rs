use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui;
use crate::ui::app::FormField;
use crate::ui::components::{render_statusbar, render_tab_bar};
use crate::ui::layout;
use crate::ui::{App, InputMode, Tab};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Length(layout::TAB_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    let chrome_color = if app.pending_quit {
        ui::theme::ACCENT_ERROR
    } else {
        ui::theme::ACCENT_PRIMARY
    };

    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(padding.clone()),
            Span::styled(
                "Ops Companion",
                Style::default()
                    .fg(chrome_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(padding.clone()),
            Span::styled("Daily tracker + interview log + health", ui::theme::text_muted()),
        ]),
    ]);
    f.render_widget(header, chunks[0]);

    render_tab_bar(f, chunks[1], app.tab);

    let content = layout::with_content_padding(chunks[2]);
    match app.tab {
        Tab::Today => ui::views::render_today(f, app, content),
        Tab::Interview => ui::views::render_interview(f, app, content),
        Tab::Health => ui::views::render_health(f, app, content),
    }

    let (footer_text, footer_style) = if app.pending_quit {
        (
            "⚠ Press Ctrl+C again to quit".to_string(),
            Style::default().fg(ui::theme::ACCENT_ERROR),
        )
    } else {
        (footer_hints(app).to_string(), ui::theme::text_muted())
    };
    let footer = Paragraph::new(format!("{}{}", padding, footer_text)).style(footer_style);
    f.render_widget(footer, chunks[3]);

    render_statusbar(
        f,
        chunks[4],
        app.notifications.current(),
        app.activity.len(),
    );
}

fn footer_hints(app: &App) -> &'static str {
    match (app.tab, app.input_mode) {
        (Tab::Today, InputMode::Normal) => {
            "j/k move · space active · d done · s skip · n note · a add · r refresh · q quit"
        }
        (Tab::Today, InputMode::Editing) => "enter save · esc cancel",
        (Tab::Interview, InputMode::Normal) => {
            "e edit · ctrl+s save · f filter topic · F clear filter · r refresh · q quit"
        }
        (Tab::Interview, InputMode::Editing) => match app.interview.focus {
            FormField::Rating => "←/→ or 1-5 rating · tab next · ctrl+s save · esc done",
            FormField::Answer => "enter newline · tab next · shift+tab prev · ctrl+s save · esc done",
            _ => "tab next · shift+tab prev · ctrl+s save · esc done",
        },
        (Tab::Health, _) => "r refresh · j/k scroll · q quit",
    }
}
