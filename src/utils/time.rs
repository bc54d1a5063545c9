//! Calendar helpers for quota key lifetimes
//!
//! Hit and generation quotas are scoped to the current UTC calendar month,
//! so their keys carry the month tag and expire at the first instant of
//! the next month.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Default short URL TTL
pub const ONE_YEAR_SECONDS: u64 = 31_536_000; // 60 * 60 * 24 * 365

/// Fallback monthly TTL for keys expired relatively rather than absolutely
pub const ONE_MONTH_SECONDS: i64 = 2_592_000; // 60 * 60 * 24 * 30

/// `YYYY-MM` tag of the given instant, UTC
pub fn month_tag(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// First instant of the UTC calendar month following `at`
///
/// Used as the absolute expiry (`EXAT`) of monthly quota keys so that all
/// callers within a month agree on the same boundary.
pub fn next_month_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if at.month() == 12 {
        (at.year() + 1, 1)
    } else {
        (at.year(), at.month() + 1)
    };

    // 每月 1 日 00:00:00 UTC 总是一个有效时刻
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first day of month is a valid UTC timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 15).single().unwrap()
    }

    #[test]
    fn test_month_tag_zero_pads() {
        assert_eq!(month_tag(utc(2025, 3, 9, 12)), "2025-03");
        assert_eq!(month_tag(utc(2025, 11, 30, 23)), "2025-11");
    }

    #[test]
    fn test_next_month_start_mid_month() {
        let boundary = next_month_start(utc(2025, 10, 15, 8));
        assert_eq!(boundary, Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_next_month_start_rolls_over_year() {
        let boundary = next_month_start(utc(2025, 12, 31, 23));
        assert_eq!(boundary, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_next_month_start_is_strictly_in_the_future() {
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(next_month_start(at) > at);
    }
}
