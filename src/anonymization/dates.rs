//! Calendar-aware date perturbation
//!
//! HL7 dates start with `YYYYMMDD`. A date is moved forward by 0-29 days,
//! the offset being derived from the hash of the whole original value, so the
//! same input always lands on the same output. Any time-of-day component is
//! discarded and replaced by noon.

use super::hashing::stable_hash;
use chrono::{Datelike, Days, NaiveDate};

/// Shift window in days; offsets fall in `0..MAX_SHIFT_DAYS`
pub const MAX_SHIFT_DAYS: u32 = 30;

/// Time appended when the original value carried a time component
pub const NOON: &str = "120000";

/// Shift an HL7 date or datetime value
///
/// Values that are blank, shorter than eight characters, or whose first
/// eight characters are not a valid calendar date are returned unchanged.
pub fn shift_date(value: &str) -> String {
    if value.trim().is_empty() {
        return value.to_string();
    }
    shifted(value).unwrap_or_else(|| value.to_string())
}

fn shifted(value: &str) -> Option<String> {
    let head = value.get(..8)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = head[..4].parse().ok()?;
    let month: u32 = head[4..6].parse().ok()?;
    let day: u32 = head[6..8].parse().ok()?;
    if year < 1 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let offset = Days::new(u64::from(stable_hash(value) % MAX_SHIFT_DAYS));
    let shifted = date.checked_add_days(offset)?;
    if shifted.year() > 9999 {
        return None;
    }

    let mut rendered = shifted.format("%Y%m%d").to_string();
    if value.len() > 8 {
        rendered.push_str(NOON);
    }
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // Offsets: stable_hash(value) % 30
    #[test_case("19800515", "19800609" ; "25 days within the year")]
    #[test_case("20251231", "20260126" ; "rolls into the next year")]
    #[test_case("20250107120000", "20250109120000" ; "datetime gets noon")]
    fn test_shift_date(input: &str, expected: &str) {
        assert_eq!(shift_date(input), expected);
    }

    #[test_case("20251345" ; "invalid month")]
    #[test_case("20250230" ; "invalid day")]
    #[test_case("00000101" ; "year zero")]
    #[test_case("2025" ; "too short")]
    #[test_case("2025-01-07" ; "not digits")]
    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    #[test_case("ÄÄÄÄ1234" ; "multibyte prefix")]
    fn test_unparseable_passthrough(input: &str) {
        assert_eq!(shift_date(input), input);
    }

    #[test]
    fn test_time_component_discarded() {
        let shifted = shift_date("20250107083015");
        assert_eq!(shifted.len(), 14);
        assert!(shifted.ends_with(NOON));
    }

    #[test]
    fn test_shift_within_window() {
        let original = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        for suffix in ["", "0000", "1200", "235959", "+0100"] {
            let value = format!("20240220{suffix}");
            let shifted = shift_date(&value);
            let date = NaiveDate::parse_from_str(&shifted[..8], "%Y%m%d").unwrap();
            let delta = (date - original).num_days();
            assert!((0..i64::from(MAX_SHIFT_DAYS)).contains(&delta));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(shift_date("19750320"), shift_date("19750320"));
    }
}
