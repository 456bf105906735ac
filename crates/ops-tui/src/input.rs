use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ops_core::models::CheckInStatus;

use crate::ui::app::FormField;
use crate::ui::text_input::TextInput;
use crate::ui::{App, InputMode, Tab};

/// Key handling for everything except Ctrl+C, which the runtime owns.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('s') && app.tab == Tab::Interview {
        app.save_interview();
        return;
    }

    if app.input_mode == InputMode::Editing {
        match app.tab {
            Tab::Today => handle_today_editing(app, key),
            Tab::Interview => handle_interview_editing(app, key),
            Tab::Health => app.input_mode = InputMode::Normal,
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('1') => {
            app.switch_tab(Tab::Today);
            return;
        }
        KeyCode::Char('2') => {
            app.switch_tab(Tab::Interview);
            return;
        }
        KeyCode::Char('3') => {
            app.switch_tab(Tab::Health);
            return;
        }
        KeyCode::Tab => {
            app.switch_tab(app.tab.next());
            return;
        }
        KeyCode::Esc => {
            app.notifications.dismiss();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Today => handle_today_normal(app, key),
        Tab::Interview => handle_interview_normal(app, key),
        Tab::Health => handle_health_normal(app, key),
    }
}

/// Bracketed paste goes into whichever field is being edited
pub(crate) fn handle_paste(app: &mut App, text: &str) {
    if app.input_mode != InputMode::Editing {
        return;
    }
    match app.tab {
        Tab::Today => app.today.input.insert_str(&single_line(text)),
        Tab::Interview => {
            let focus = app.interview.focus;
            if let Some(input) = app.interview.form.input_mut(focus) {
                if focus == FormField::Answer {
                    input.insert_str(text);
                } else {
                    input.insert_str(&single_line(text));
                }
            }
        }
        Tab::Health => {}
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Cursor movement and deletion shared by every text field.
/// Returns false when the key is not an editing key.
fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

// =============================================================================
// TODAY
// =============================================================================

fn handle_today_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.today.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.today.select_prev(),
        KeyCode::Char(' ') => app.toggle_selected_active(),
        KeyCode::Char('d') => app.mark_selected(CheckInStatus::Done),
        KeyCode::Char('s') => app.mark_selected(CheckInStatus::Skipped),
        KeyCode::Char('n') => app.begin_note_edit(),
        KeyCode::Char('a') => app.begin_new_habit(),
        KeyCode::Char('r') => app.refresh_today(),
        _ => {}
    }
}

fn handle_today_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.submit_today_edit(),
        _ => {
            edit_text(&mut app.today.input, key);
        }
    }
}

// =============================================================================
// INTERVIEW
// =============================================================================

fn handle_interview_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') | KeyCode::Enter => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('f') => app.apply_topic_filter(),
        KeyCode::Char('F') => app.clear_topic_filter(),
        KeyCode::Char('r') => app.refresh_interview(),
        KeyCode::Char('j') | KeyCode::Down => {
            let max = app.interview.entries.len().saturating_sub(1);
            app.interview.scroll = (app.interview.scroll + 1).min(max);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.interview.scroll = app.interview.scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_interview_editing(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.input_mode = InputMode::Normal;
        return;
    }

    let interview = &mut app.interview;
    match key.code {
        KeyCode::Tab => {
            interview.focus = interview.focus.next();
            return;
        }
        KeyCode::BackTab => {
            interview.focus = interview.focus.prev();
            return;
        }
        _ => {}
    }

    if interview.focus == FormField::Rating {
        match key.code {
            KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => interview.form.bump_rating(false),
            KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => interview.form.bump_rating(true),
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10) {
                    interview.form.set_rating(n as u8);
                }
            }
            KeyCode::Enter => interview.focus = interview.focus.next(),
            _ => {}
        }
        return;
    }

    let focus = interview.focus;
    if key.code == KeyCode::Enter {
        if focus == FormField::Answer {
            interview.form.answer.insert_char('\n');
        } else {
            interview.focus = focus.next();
        }
        return;
    }

    if let Some(input) = interview.form.input_mut(focus) {
        edit_text(input, key);
    }
}

// =============================================================================
// HEALTH
// =============================================================================

fn handle_health_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.refresh_health(),
        KeyCode::Char('j') | KeyCode::Down => app.health.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.health.scroll_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ApiEvent;
    use ops_core::models::{Habit, TodaySummary};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app_with_habits() -> App {
        let mut app = App::new(None);
        app.apply_api_event(ApiEvent::TodayLoaded {
            habits: vec![
                Habit {
                    id: "h1".into(),
                    name: "Run".into(),
                    active: true,
                },
                Habit {
                    id: "h2".into(),
                    name: "Read".into(),
                    active: true,
                },
            ],
            check_ins: vec![],
            summary: TodaySummary::default(),
        });
        app
    }

    #[test]
    fn test_tab_switching() {
        let mut app = App::new(None);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab, Tab::Interview);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Health);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Today);
    }

    #[test]
    fn test_q_quits_only_outside_editing() {
        let mut app = app_with_habits();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "quick");
        assert!(app.running);
        assert_eq!(app.today.input.value(), "quick");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_note_for_selected_habit() {
        let mut app = app_with_habits();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "ch. 3");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.today.note_for("h2"), "ch. 3");
        assert_eq!(app.today.note_for("h1"), "");
    }

    #[test]
    fn test_interview_form_navigation_and_answer_newline() {
        let mut app = App::new(None);
        app.switch_tab(Tab::Interview);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.interview.focus, FormField::Question);

        type_str(&mut app, "Why?");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.interview.focus, FormField::Answer);

        type_str(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "b");
        assert_eq!(app.interview.form.answer.value(), "a\nb");

        handle_key(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        handle_key(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.interview.focus, FormField::Rating);
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.interview.form.rating, 4);
    }

    #[test]
    fn test_ctrl_s_validates_form() {
        let mut app = App::new(None);
        app.switch_tab(Tab::Interview);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        assert_eq!(
            app.interview.error.as_deref(),
            Some("Question and answer are required")
        );
    }

    #[test]
    fn test_paste_into_single_line_field_flattens() {
        let mut app = App::new(None);
        app.switch_tab(Tab::Interview);
        press(&mut app, KeyCode::Enter);
        handle_paste(&mut app, "line one\r\nline two");
        assert_eq!(app.interview.form.question.value(), "line one line two");

        app.interview.focus = FormField::Answer;
        handle_paste(&mut app, "x\ny");
        assert_eq!(app.interview.form.answer.value(), "x\ny");
    }

    #[test]
    fn test_paste_ignored_outside_editing() {
        let mut app = App::new(None);
        handle_paste(&mut app, "stray");
        assert!(app.today.input.value().is_empty());
    }
}
