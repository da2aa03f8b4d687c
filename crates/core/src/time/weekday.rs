use anyhow::Context;
use chrono::{Datelike, NaiveDate};

pub const UNKNOWN_WEEKDAY: &str = "Unknown";

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Day-of-week context rendered into the prompt. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayContext {
    pub weekday: String,
    pub is_weekend: bool,
}

impl DayContext {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            weekday: date.format("%A").to_string(),
            is_weekend: is_weekend(date),
        }
    }

    /// Never fails: an unparseable date yields `Unknown` on a weekday.
    pub fn parse(date: &str) -> Self {
        match parse_ymd(date) {
            Some(date) => Self::from_date(date),
            None => Self {
                weekday: UNKNOWN_WEEKDAY.to_string(),
                is_weekend: false,
            },
        }
    }
}

/// `YYYY-M-D` with a four-digit year and one- or two-digit month and day. Nothing else may
/// surround it.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |p: &str, widths: std::ops::RangeInclusive<usize>| {
        widths.contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4..=4) || !digits(month, 1..=2) || !digits(day, 1..=2) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}

pub fn today_jst() -> anyhow::Result<NaiveDate> {
    let jst = chrono::FixedOffset::east_opt(JST_OFFSET_SECS).context("invalid JST offset")?;
    Ok(chrono::Utc::now().with_timezone(&jst).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturday_is_weekend() {
        // 2024-06-15 is Saturday.
        let ctx = DayContext::parse("2024-06-15");
        assert_eq!(ctx.weekday, "Saturday");
        assert!(ctx.is_weekend);
    }

    #[test]
    fn monday_is_not_weekend() {
        let ctx = DayContext::from_date(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
        assert_eq!(ctx.weekday, "Monday");
        assert!(!ctx.is_weekend);
    }

    #[test]
    fn sunday_is_weekend() {
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()));
    }

    #[test]
    fn parse_ymd_accepts_unpadded_month_and_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 5);
        assert_eq!(parse_ymd("2024-6-5"), expected);
        assert_eq!(parse_ymd("2024-06-5"), expected);
        assert_eq!(parse_ymd("2024-06-05"), expected);
    }

    #[test]
    fn parse_ymd_rejects_malformed_input() {
        for s in [
            "20240101", "2024-13-40", "", "24-06-05", "2024-006-05", "2024-06-05x",
            "2024-06-05-01", " 2024-06-05", "2024-+6-05", "2023-02-29",
        ] {
            assert_eq!(parse_ymd(s), None, "input: {s:?}");
        }
    }

    #[test]
    fn unparseable_date_is_unknown_weekday() {
        let ctx = DayContext::parse("not-a-date");
        assert_eq!(ctx.weekday, UNKNOWN_WEEKDAY);
        assert!(!ctx.is_weekend);
    }
}
