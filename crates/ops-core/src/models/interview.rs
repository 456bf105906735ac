use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

/// Ratings run from 1 (bad) to 5 (solid)
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewEntry {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub rating: u8,
    #[serde(default)]
    pub tags: Option<String>,
    /// ISO-8601 timestamp as sent by the server
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterviewEntry {
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub rating: u8,
    /// Comma separated
    pub tags: String,
}

impl InterviewEntry {
    /// Tags with surrounding whitespace removed, empty ones dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_decodes_camel_case() {
        let entry: InterviewEntry = serde_json::from_value(json!({
            "id": 3,
            "topic": "kubernetes",
            "question": "What is a pod?",
            "answer": "Smallest deployable unit",
            "rating": 4,
            "tags": "k8s, basics,",
            "createdAt": "2026-10-17T09:30:00Z"
        }))
        .unwrap();
        assert_eq!(entry.id, "3");
        assert_eq!(entry.created_at.as_deref(), Some("2026-10-17T09:30:00Z"));
        assert_eq!(entry.tag_list(), vec!["k8s", "basics"]);
    }
}
