use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::constants::RECENT_ACTIVITY_CAPACITY;

/// One received activity payload, stamped with local arrival time
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub received_at: DateTime<Local>,
    pub payload: Value,
}

impl ActivityRecord {
    pub fn new(payload: Value) -> Self {
        Self::at(Local::now(), payload)
    }

    pub fn at(received_at: DateTime<Local>, payload: Value) -> Self {
        Self {
            received_at,
            payload,
        }
    }

    /// Local time of arrival, `HH:MM:SS`
    pub fn received_at_display(&self) -> String {
        self.received_at.format("%H:%M:%S").to_string()
    }

    /// Payload as single-line JSON
    pub fn payload_compact(&self) -> String {
        self.payload.to_string()
    }
}

/// Bounded newest-first list of activity records.
///
/// Insertion is always at the front; past capacity the oldest record falls off
/// the back.
#[derive(Debug, Clone)]
pub struct RecentActivity {
    records: VecDeque<ActivityRecord>,
    capacity: usize,
}

impl RecentActivity {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_ACTIVITY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a payload received now
    pub fn push(&mut self, payload: Value) {
        self.push_record(ActivityRecord::new(payload));
    }

    pub fn push_record(&mut self, record: ActivityRecord) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ActivityRecord> {
        self.records.front()
    }
}

impl Default for RecentActivity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn seqs(buffer: &RecentActivity) -> Vec<u64> {
        buffer
            .iter()
            .map(|r| r.payload["seq"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn test_length_is_min_of_count_and_capacity() {
        for n in [0usize, 1, 29, 30, 31, 100] {
            let mut buffer = RecentActivity::new();
            for i in 0..n {
                buffer.push(json!({ "seq": i }));
            }
            assert_eq!(buffer.len(), n.min(RECENT_ACTIVITY_CAPACITY), "n = {}", n);
        }
    }

    #[test]
    fn test_newest_first_and_oldest_dropped() {
        let mut buffer = RecentActivity::with_capacity(3);
        for i in 1..=5u64 {
            buffer.push(json!({ "seq": i }));
        }
        assert_eq!(seqs(&buffer), vec![5, 4, 3]);
        assert_eq!(buffer.latest().unwrap().payload["seq"], 5);
    }

    #[test]
    fn test_fewer_than_capacity_keeps_all_in_reverse() {
        let mut buffer = RecentActivity::new();
        for i in 1..=4u64 {
            buffer.push(json!({ "seq": i }));
        }
        assert_eq!(seqs(&buffer), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut buffer = RecentActivity::with_capacity(0);
        buffer.push(json!({}));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_record_display() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 7).unwrap();
        let record = ActivityRecord::at(at, json!({"data": "x"}));
        assert_eq!(record.received_at_display(), "09:05:07");
        assert_eq!(record.payload_compact(), r#"{"data":"x"}"#);
    }
}
