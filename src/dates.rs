use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Normalizes a date value to a calendar date. Accepts the DateOnly wire form
/// (`YYYY-MM-DD`), ISO-like date-times with or without an offset, and the
/// display form `DD/MM/YYYY`. Returns `None` for empty or unparseable input.
pub fn normalize(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    None
}

/// Formats a date value with a safe fallback: empty string when the input
/// does not normalize.
pub fn format_date(value: &str, pattern: &str) -> String {
    match normalize(value) {
        Some(date) => date.format(pattern).to_string(),
        None => String::new(),
    }
}

/// Effective timestamp of an optional date value, in milliseconds since the
/// epoch. Absent or unparseable dates map to negative infinity so they sink
/// to the end of any descending order.
pub fn time_value(value: Option<&str>) -> f64 {
    match value.and_then(normalize) {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64,
        None => f64::NEG_INFINITY,
    }
}
