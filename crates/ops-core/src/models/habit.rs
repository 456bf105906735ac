use serde::{Deserialize, Serialize};

use super::{id_from_string_or_number, null_as_default, optional_id_from_string_or_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInStatus {
    Done,
    Skipped,
}

impl CheckInStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckInStatus::Done => "DONE",
            CheckInStatus::Skipped => "SKIPPED",
        }
    }
}

/// A habit's check-in for one day, as listed by the server (habit embedded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    #[serde(default, deserialize_with = "optional_id_from_string_or_number")]
    pub id: Option<String>,
    pub habit: Habit,
    /// Not read by the client; empty when the server leaves it out
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    pub status: CheckInStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Body of the check-in upsert call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub habit_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub status: CheckInStatus,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub done_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_active_habits: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streak_days: u32,
}
