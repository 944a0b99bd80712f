//! Gregorian calendar to Julian Day conversion.
//!
//! Meeus, Astronomical Algorithms, ch. 7. Valid for Gregorian dates
//! (after 1582-10-15), which is all a birth chart needs.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Day at 2000-01-01 12:00 UTC.
pub const J2000: f64 = 2_451_545.0;

/// Julian Day for a Gregorian date and fractional UTC hour.
pub fn calendar_to_jd(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}

/// Hour of day as a decimal, including sub-second precision.
pub fn fractional_hour(dt: &DateTime<Utc>) -> f64 {
    dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + dt.second() as f64 / 3600.0
        + dt.nanosecond() as f64 / 3_600_000_000_000.0
}

pub fn datetime_to_jd(dt: &DateTime<Utc>) -> f64 {
    calendar_to_jd(dt.year(), dt.month(), dt.day(), fractional_hour(dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_epoch() {
        assert!((calendar_to_jd(2000, 1, 1, 12.0) - J2000).abs() < 1e-9);
    }

    #[test]
    fn test_meeus_examples() {
        // Meeus example 7.a: 1957 Oct 4.81
        assert!((calendar_to_jd(1957, 10, 4, 0.81 * 24.0) - 2_436_116.31).abs() < 1e-6);
        // 1987 Jan 27.0
        assert!((calendar_to_jd(1987, 1, 27, 0.0) - 2_446_822.5).abs() < 1e-9);
        // 1600 Dec 31.0
        assert!((calendar_to_jd(1600, 12, 31, 0.0) - 2_305_812.5).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_hour() {
        let dt = Utc.with_ymd_and_hms(2025, 5, 15, 4, 6, 36).unwrap();
        let expected = 4.0 + 6.0 / 60.0 + 36.0 / 3600.0;
        assert!((fractional_hour(&dt) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_datetime_to_jd() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((datetime_to_jd(&dt) - J2000).abs() < 1e-9);
    }
}
