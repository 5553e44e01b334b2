//! Julian Day conversions for the proleptic Gregorian calendar.
//!
//! Source: Meeus, *Astronomical Algorithms* (2nd ed.), ch. 7.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Day of the J2000.0 epoch (2000-Jan-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Gregorian calendar date to Julian Day.
///
/// `day_frac` carries the time of day as a fraction (e.g. 15.5 = noon
/// on the 15th).
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day_frac + b
        - 1524.5
}

/// Julian Day to Gregorian `(year, month, day_frac)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_frac = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day_frac)
}

/// Fractional UT hour of an instant: h + m/60 + s/3600.
pub fn ut_hour(utc: &DateTime<Utc>) -> f64 {
    let secs = utc.second() as f64 + utc.nanosecond() as f64 / 1.0e9;
    utc.hour() as f64 + utc.minute() as f64 / 60.0 + secs / 3600.0
}

/// Julian Day (UT) of a UTC instant.
pub fn jd_ut_from_utc(utc: &DateTime<Utc>) -> f64 {
    calendar_to_jd(utc.year(), utc.month(), utc.day() as f64 + ut_hour(utc) / 24.0)
}

/// UTC instant of a Julian Day, rounded to the microsecond.
///
/// Returns `None` if the JD is outside chrono's representable range.
pub fn utc_from_jd(jd: f64) -> Option<DateTime<Utc>> {
    let micros = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1.0e6).round();
    if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}
