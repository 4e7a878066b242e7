//! Small shared helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// Truncate `value` to at most `max` characters, on a char boundary.
pub(crate) fn truncate_chars(value: &mut String, max: usize) {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
}

/// Today's date in UTC, used when a request leaves `startDate` out.
pub(crate) fn today_utc(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_chars_ascii() {
        let mut s = "Fjellheisen".to_string();
        truncate_chars(&mut s, 5);
        assert_eq!(s, "Fjell");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let mut s = "Tromsø Ishavskatedralen".to_string();
        truncate_chars(&mut s, 6);
        assert_eq!(s, "Tromsø");
    }

    #[test]
    fn test_truncate_chars_shorter_than_max_is_untouched() {
        let mut s = "Polaria".to_string();
        truncate_chars(&mut s, 120);
        assert_eq!(s, "Polaria");
    }

    #[test]
    fn test_today_utc() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 23, 30, 0).unwrap();
        assert_eq!(today_utc(now), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }
}
