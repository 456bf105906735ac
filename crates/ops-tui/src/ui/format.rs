use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

/// Truncate string to a max length, adding an ellipsis when truncated.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    if max_len <= 3 {
        return ".".repeat(max_len);
    }

    let take = max_len - 3;
    let mut truncated: String = s.chars().take(take).collect();
    truncated.push_str("...");
    truncated
}

/// Local calendar date as `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today_iso() -> String {
    iso_date(Local::now().date_naive())
}

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Server timestamps shown in local time. RFC 3339 values are converted;
/// values without an offset are taken as local already. Anything else is
/// shown as sent.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(CREATED_AT_FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => match Local.from_local_datetime(&naive).earliest() {
            Some(local) => local.format(CREATED_AT_FORMAT).to_string(),
            None => naive.format(CREATED_AT_FORMAT).to_string(),
        },
        Err(_) => raw.to_string(),
    }
}

/// Two-space indented JSON, one string per line for rendering
pub fn pretty_json_lines(value: &Value) -> Vec<String> {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| value.to_string())
        .lines()
        .map(str::to_string)
        .collect()
}
