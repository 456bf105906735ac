use std::collections::HashMap;

use ops_core::models::{
    interview::RATING_RANGE, CheckIn, CheckInRequest, CheckInStatus, Habit, InterviewEntry,
    NewInterviewEntry, TodaySummary,
};
use ops_core::RecentActivity;
use serde_json::Value;

use crate::dispatch::{ApiDispatcher, ApiEvent};
use crate::ui::format::{pretty_json_lines, today_iso};
use crate::ui::notifications::{Notification, NotificationQueue};
use crate::ui::text_input::TextInput;

pub const DEFAULT_TOPIC: &str = "kubernetes";
pub const DEFAULT_RATING: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Today,
    Interview,
    Health,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Today, Tab::Interview, Tab::Health];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Today => "Today",
            Tab::Interview => "Interview",
            Tab::Health => "Health",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Today => 0,
            Tab::Interview => 1,
            Tab::Health => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

// =============================================================================
// TODAY
// =============================================================================

/// What the Today tab's text input is currently bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayEdit {
    Note(String),
    NewHabit,
}

#[derive(Debug, Default)]
pub struct TodayState {
    pub date: String,
    pub habits: Vec<Habit>,
    /// Today's check-ins keyed by habit id
    pub check_ins: HashMap<String, CheckIn>,
    pub summary: TodaySummary,
    /// Draft notes keyed by habit id
    pub notes: HashMap<String, String>,
    pub selected: usize,
    pub error: Option<String>,
    pub loading: bool,
    pub editing: Option<TodayEdit>,
    pub input: TextInput,
}

impl TodayState {
    fn new(date: String) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habits.get(self.selected)
    }

    pub fn note_for(&self, habit_id: &str) -> &str {
        self.notes.get(habit_id).map(String::as_str).unwrap_or("")
    }

    pub fn status_for(&self, habit_id: &str) -> Option<CheckInStatus> {
        self.check_ins.get(habit_id).map(|c| c.status)
    }

    fn apply_loaded(&mut self, habits: Vec<Habit>, check_ins: Vec<CheckIn>, summary: TodaySummary) {
        self.check_ins = check_ins
            .into_iter()
            .map(|c| (c.habit.id.clone(), c))
            .collect();

        // Server notes fill in drafts, except the one open in the editor
        let editing_note = match &self.editing {
            Some(TodayEdit::Note(id)) => Some(id.as_str()),
            _ => None,
        };
        for (habit_id, check_in) in &self.check_ins {
            if Some(habit_id.as_str()) == editing_note {
                continue;
            }
            if let Some(note) = check_in.note.as_ref().filter(|n| !n.is_empty()) {
                self.notes.insert(habit_id.clone(), note.clone());
            }
        }

        self.habits = habits;
        self.summary = summary;
        self.selected = self.selected.min(self.habits.len().saturating_sub(1));
        self.loading = false;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.habits.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// =============================================================================
// INTERVIEW
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Topic,
    Rating,
    Question,
    Answer,
    Tags,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Topic,
        FormField::Rating,
        FormField::Question,
        FormField::Answer,
        FormField::Tags,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> FormField {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> FormField {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Topic => "Topic",
            FormField::Rating => "Rating",
            FormField::Question => "Question",
            FormField::Answer => "Answer",
            FormField::Tags => "Tags",
        }
    }
}

#[derive(Debug)]
pub struct InterviewForm {
    pub topic: TextInput,
    pub rating: u8,
    pub question: TextInput,
    pub answer: TextInput,
    pub tags: TextInput,
}

impl Default for InterviewForm {
    fn default() -> Self {
        Self {
            topic: TextInput::with_value(DEFAULT_TOPIC),
            rating: DEFAULT_RATING,
            question: TextInput::new(),
            answer: TextInput::new(),
            tags: TextInput::new(),
        }
    }
}

impl InterviewForm {
    /// The text input behind a field; `None` for rating
    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::Topic => Some(&mut self.topic),
            FormField::Rating => None,
            FormField::Question => Some(&mut self.question),
            FormField::Answer => Some(&mut self.answer),
            FormField::Tags => Some(&mut self.tags),
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.clamp(*RATING_RANGE.start(), *RATING_RANGE.end());
    }

    pub fn bump_rating(&mut self, up: bool) {
        let next = if up {
            self.rating.saturating_add(1)
        } else {
            self.rating.saturating_sub(1)
        };
        self.set_rating(next);
    }

    /// Request body for the current form, or the validation message
    pub fn to_request(&self) -> Result<NewInterviewEntry, &'static str> {
        if self.question.is_blank() || self.answer.is_blank() {
            return Err("Question and answer are required");
        }
        Ok(NewInterviewEntry {
            topic: self.topic.value().trim().to_string(),
            question: self.question.value().trim().to_string(),
            answer: self.answer.value().trim().to_string(),
            rating: self.rating,
            tags: self.tags.value().trim().to_string(),
        })
    }

    /// Topic and rating carry over to the next entry
    fn clear_after_save(&mut self) {
        self.question.clear();
        self.answer.clear();
        self.tags.clear();
    }
}

#[derive(Debug)]
pub struct InterviewState {
    pub form: InterviewForm,
    pub focus: FormField,
    pub entries: Vec<InterviewEntry>,
    /// Topic the list is filtered by; empty means all
    pub filter: String,
    pub error: Option<String>,
    pub loading: bool,
    pub saving: bool,
    pub scroll: usize,
}

impl Default for InterviewState {
    fn default() -> Self {
        Self {
            form: InterviewForm::default(),
            focus: FormField::Question,
            entries: Vec::new(),
            filter: String::new(),
            error: None,
            loading: false,
            saving: false,
            scroll: 0,
        }
    }
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Debug, Default)]
pub struct HealthState {
    pub ready: Option<Value>,
    pub live: Option<Value>,
    pub webhooks: Vec<Value>,
    pub error: Option<String>,
    pub loading: bool,
    /// First visible line of the ready JSON
    pub scroll: usize,
}

impl HealthState {
    fn max_scroll(&self) -> usize {
        self.ready
            .as_ref()
            .map(|ready| pretty_json_lines(ready).len().saturating_sub(1))
            .unwrap_or(0)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

// =============================================================================
// APP
// =============================================================================

pub struct App {
    pub running: bool,
    /// First Ctrl+C seen; a second one quits
    pub pending_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,

    pub today: TodayState,
    pub interview: InterviewState,
    pub health: HealthState,

    /// Live activity, newest first. Owned here and dropped with the app.
    pub activity: RecentActivity,

    pub notifications: NotificationQueue,

    /// `None` runs the UI without a backend (tests)
    api: Option<ApiDispatcher>,
}

impl App {
    pub fn new(api: Option<ApiDispatcher>) -> Self {
        Self {
            running: true,
            pending_quit: false,
            tab: Tab::Today,
            input_mode: InputMode::Normal,
            today: TodayState::new(today_iso()),
            interview: InterviewState::default(),
            health: HealthState::default(),
            activity: RecentActivity::new(),
            notifications: NotificationQueue::new(),
            api,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
        self.today.editing = None;
    }

    /// Feed callback target: prepend and keep the newest entries
    pub fn record_activity(&mut self, payload: Value) {
        self.activity.push(payload);
    }

    pub fn refresh_all(&mut self) {
        self.refresh_today();
        self.refresh_interview();
        self.refresh_health();
    }

    // -------------------------------------------------------------------------
    // Today
    // -------------------------------------------------------------------------

    pub fn refresh_today(&mut self) {
        self.today.error = None;
        self.today.date = today_iso();
        if let Some(api) = &self.api {
            self.today.loading = true;
            api.refresh_today(self.today.date.clone());
        }
    }

    pub fn toggle_selected_active(&mut self) {
        let Some(habit) = self.today.selected_habit() else {
            return;
        };
        let (id, active) = (habit.id.clone(), !habit.active);
        self.today.error = None;
        if let Some(api) = &self.api {
            api.set_habit_active(id, active, self.today.date.clone());
        }
    }

    /// Check in the selected habit. Refused for inactive habits.
    pub fn mark_selected(&mut self, status: CheckInStatus) {
        let Some(habit) = self.today.selected_habit() else {
            return;
        };
        if !habit.active {
            let message = format!("{} is inactive", habit.name);
            self.notify(Notification::warning(message));
            return;
        }

        let request = CheckInRequest {
            habit_id: habit.id.clone(),
            date: self.today.date.clone(),
            status,
            note: self.today.note_for(&habit.id).to_string(),
        };
        self.today.error = None;
        if let Some(api) = &self.api {
            api.upsert_check_in(request);
        }
    }

    pub fn begin_note_edit(&mut self) {
        let Some(habit) = self.today.selected_habit() else {
            return;
        };
        let id = habit.id.clone();
        self.today.input = TextInput::with_value(self.today.note_for(&id));
        self.today.editing = Some(TodayEdit::Note(id));
        self.input_mode = InputMode::Editing;
    }

    pub fn begin_new_habit(&mut self) {
        self.today.input.clear();
        self.today.editing = Some(TodayEdit::NewHabit);
        self.input_mode = InputMode::Editing;
    }

    /// Enter in the Today editor. Notes are kept locally until the next
    /// check-in; a new habit name is sent right away.
    pub fn submit_today_edit(&mut self) {
        let value = self.today.input.value().trim().to_string();
        match self.today.editing.take() {
            Some(TodayEdit::Note(habit_id)) => {
                self.today.notes.insert(habit_id, value);
            }
            Some(TodayEdit::NewHabit) => {
                if !value.is_empty() {
                    self.today.error = None;
                    if let Some(api) = &self.api {
                        api.create_habit(value, self.today.date.clone());
                    }
                }
            }
            None => {}
        }
        self.today.input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.today.editing = None;
        self.today.input.clear();
        self.input_mode = InputMode::Normal;
    }

    // -------------------------------------------------------------------------
    // Interview
    // -------------------------------------------------------------------------

    pub fn refresh_interview(&mut self) {
        self.interview.error = None;
        if let Some(api) = &self.api {
            self.interview.loading = true;
            api.refresh_interview(self.interview.filter.clone());
        }
    }

    pub fn save_interview(&mut self) {
        if self.interview.saving {
            return;
        }
        match self.interview.form.to_request() {
            Ok(entry) => {
                self.interview.error = None;
                if let Some(api) = &self.api {
                    self.interview.saving = true;
                    api.save_interview(entry, self.interview.filter.clone());
                }
            }
            Err(message) => {
                self.interview.error = Some(message.to_string());
                self.notify(Notification::warning(message));
            }
        }
    }

    /// Filter the list by the form's topic
    pub fn apply_topic_filter(&mut self) {
        self.interview.filter = self.interview.form.topic.value().trim().to_string();
        self.interview.scroll = 0;
        if !self.interview.filter.is_empty() {
            let message = format!("Showing topic {}", self.interview.filter);
            self.notify(Notification::info(message));
        }
        self.refresh_interview();
    }

    pub fn clear_topic_filter(&mut self) {
        self.interview.filter.clear();
        self.interview.scroll = 0;
        self.refresh_interview();
    }

    // -------------------------------------------------------------------------
    // Health
    // -------------------------------------------------------------------------

    pub fn refresh_health(&mut self) {
        self.health.error = None;
        if let Some(api) = &self.api {
            self.health.loading = true;
            api.refresh_health();
        }
    }

    // -------------------------------------------------------------------------
    // API results
    // -------------------------------------------------------------------------

    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::TodayLoaded {
                habits,
                check_ins,
                summary,
            } => {
                self.today.apply_loaded(habits, check_ins, summary);
            }
            ApiEvent::TodayFailed(message) => {
                self.today.loading = false;
                self.report_error(message, |app, m| app.today.error = Some(m));
            }
            ApiEvent::HabitCreated(name) => {
                self.notify(Notification::success(format!("Added {}", name)));
            }
            ApiEvent::InterviewLoaded(entries) => {
                self.interview.loading = false;
                self.interview.entries = entries;
                self.interview.scroll = self
                    .interview
                    .scroll
                    .min(self.interview.entries.len().saturating_sub(1));
            }
            ApiEvent::InterviewSaved => {
                self.interview.saving = false;
                self.interview.form.clear_after_save();
                self.interview.focus = FormField::Question;
                self.notify(Notification::success("Entry saved"));
            }
            ApiEvent::InterviewFailed(message) => {
                self.interview.loading = false;
                self.interview.saving = false;
                self.report_error(message, |app, m| app.interview.error = Some(m));
            }
            ApiEvent::HealthLoaded {
                ready,
                live,
                webhooks,
            } => {
                self.health.loading = false;
                self.health.ready = Some(ready);
                self.health.live = live;
                self.health.webhooks = webhooks;
                self.health.scroll = self.health.scroll.min(self.health.max_scroll());
            }
            ApiEvent::HealthFailed(message) => {
                self.health.loading = false;
                self.report_error(message, |app, m| app.health.error = Some(m));
            }
        }
    }

    /// Show an API failure on its tab and in the status bar
    fn report_error(&mut self, message: String, set: impl FnOnce(&mut App, String)) {
        tracing::warn!(tab = self.tab.title(), error = %message, "api call failed");
        self.notify(Notification::error(message.clone()));
        set(self, message);
    }
}
