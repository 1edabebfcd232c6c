//! Day argument parsing for CLI commands.

use chrono::{Duration, NaiveDate, TimeDelta};

/// Parses a day argument relative to `today`.
///
/// Accepts:
/// - Named: "today", "yesterday"
/// - Relative: "7d", "30d" (days before today)
/// - Absolute: "2024-01-15" (YYYY-MM-DD format)
pub fn parse_day(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let s = s.trim();

    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // Try relative format: Nd (e.g., "7d", "30d")
    if let Some(days_str) = s.strip_suffix('d') {
        let days: i64 = days_str
            .parse()
            .map_err(|_| format!("invalid relative date: {}", s))?;
        if days < 0 {
            return Err(format!("days must be non-negative: {}", s));
        }
        return TimeDelta::try_days(days)
            .and_then(|d| today.checked_sub_signed(d))
            .ok_or_else(|| format!("date out of range: {}", s));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        format!(
            "invalid date format (expected today, yesterday, Nd or YYYY-MM-DD): {}",
            s
        )
    })
}
