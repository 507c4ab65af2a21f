use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc, Weekday};

const MONTHS_LONG: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];
const MONTHS_SHORT: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 3;

/// Offset used to show fixture timestamps (Istanbul by default).
pub fn display_offset_from_env() -> FixedOffset {
    let hours = env::var("DISPLAY_UTC_OFFSET_HOURS")
        .ok()
        .and_then(|val| val.trim().parse::<i32>().ok())
        .unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
        .clamp(-12, 14);
    offset_hours(hours)
}

pub fn offset_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.clamp(-12, 14) * 3600).unwrap_or_else(|| Utc.fix())
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as UTC midnight).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Err(anyhow!("empty timestamp"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d")
        .with_context(|| format!("unrecognised timestamp {cleaned:?}"))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid midnight for {cleaned}"))?;
    Ok(naive.and_utc().fixed_offset())
}

fn localize(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    parse_timestamp(raw).ok().map(|dt| dt.with_timezone(&offset))
}

fn fallback(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        "TBD".to_string()
    } else {
        cleaned.replace('T', " ")
    }
}

/// `19:00`
pub fn format_time(raw: &str, offset: FixedOffset) -> String {
    match localize(raw, offset) {
        Some(dt) => format!("{:02}:{:02}", dt.hour(), dt.minute()),
        None => fallback(raw),
    }
}

/// `20 Ocak 2024 Cumartesi`
pub fn format_date_long(raw: &str, offset: FixedOffset) -> String {
    match localize(raw, offset) {
        Some(dt) => format!(
            "{} {} {} {}",
            dt.day(),
            month_long(dt.month()),
            dt.year(),
            weekday_long(dt.weekday())
        ),
        None => fallback(raw),
    }
}

/// `20 Ocak 2024`
pub fn format_date(raw: &str, offset: FixedOffset) -> String {
    match localize(raw, offset) {
        Some(dt) => format!("{} {} {}", dt.day(), month_long(dt.month()), dt.year()),
        None => fallback(raw),
    }
}

/// `20 Oca`
pub fn format_date_short(raw: &str, offset: FixedOffset) -> String {
    match localize(raw, offset) {
        Some(dt) => format!("{} {}", dt.day(), month_short(dt.month())),
        None => fallback(raw),
    }
}

pub fn format_odds(value: f64) -> String {
    format!("{value:.2}")
}

fn month_long(month: u32) -> &'static str {
    MONTHS_LONG
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

fn month_short(month: u32) -> &'static str {
    MONTHS_SHORT
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

fn weekday_long(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Pazartesi",
        Weekday::Tue => "Salı",
        Weekday::Wed => "Çarşamba",
        Weekday::Thu => "Perşembe",
        Weekday::Fri => "Cuma",
        Weekday::Sat => "Cumartesi",
        Weekday::Sun => "Pazar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kickoff_time_in_istanbul() {
        let tz = offset_hours(3);
        assert_eq!(format_time("2024-01-20T19:00:00Z", tz), "22:00");
        assert_eq!(format_time("2024-01-20T17:30:00Z", offset_hours(0)), "17:30");
    }

    #[test]
    fn dates_use_turkish_names() {
        let tz = offset_hours(3);
        assert_eq!(format_date_long("2024-01-20", tz), "20 Ocak 2024 Cumartesi");
        assert_eq!(format_date("2023-12-10", tz), "10 Aralık 2023");
        assert_eq!(format_date_short("2024-02-15", tz), "15 Şub");
    }

    #[test]
    fn late_kickoff_rolls_into_next_day() {
        assert_eq!(
            format_date_short("2024-01-20T22:30:00Z", offset_hours(3)),
            "21 Oca"
        );
    }

    #[test]
    fn unparseable_values_fall_back() {
        let tz = offset_hours(3);
        assert_eq!(format_time("", tz), "TBD");
        assert_eq!(format_time("soon", tz), "soon");
        assert!(parse_timestamp("2024-13-40").is_err());
    }

    #[test]
    fn odds_have_two_decimals() {
        assert_eq!(format_odds(2.1), "2.10");
        assert_eq!(format_odds(1.754), "1.75");
    }
}
