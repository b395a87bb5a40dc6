//! Display helpers for salaries and posting dates.

use chrono::{DateTime, NaiveDate, Utc};

const NOT_AVAILABLE: &str = "N/A";

/// Seconds per unit, largest first, for relative timestamps.
const TIME_UNITS: [(&str, i64); 5] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// US dollars with thousands separators and no cents: `160000.0` -> `"$160,000"`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

/// Formats salary text as currency, or returns it untouched when it is not a number.
pub fn format_salary(salary: &str) -> String {
    match salary.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => format_currency(amount),
        _ => salary.to_string(),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Long calendar date (`"June 1, 2023"`), or `"N/A"` when missing or unparseable.
pub fn format_date(date: Option<&str>) -> String {
    match date.and_then(parse_timestamp) {
        Some(ts) => ts.format("%B %-d, %Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Relative age of `date` as of `now`, e.g. `"3 days ago"`.
pub fn time_ago(date: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(ts) = date.and_then(parse_timestamp) else {
        return "recently".to_string();
    };

    let seconds = (now - ts).num_seconds();
    for (unit, unit_seconds) in TIME_UNITS {
        let count = seconds.div_euclid(unit_seconds);
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{count} {unit}{plural} ago");
        }
    }
    "just now".to_string()
}

/// Cuts `text` to `max_chars` characters and appends `"..."` if anything was removed.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}
