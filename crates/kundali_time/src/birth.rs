//! Resolved birth instant.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, jd_ut_from_utc, ut_hour};
use crate::parse::{ParseStrategy, parse_local_datetime};
use crate::zone::normalize_timezone;

/// A birth date/time resolved against its zone.
///
/// Built once per chart request and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthMoment {
    /// Wall-clock instant in the birth zone.
    pub local: DateTime<Tz>,
    /// Same instant in UTC.
    pub utc: DateTime<Utc>,
    /// Julian Day (UT).
    pub jd_ut: f64,
    /// Zone actually used.
    pub zone: Tz,
    /// Corrected zone spelling when the input needed fixing.
    pub corrected_zone: Option<String>,
    /// Parse strategy that matched the input.
    pub strategy: ParseStrategy,
}

impl BirthMoment {
    /// Parse, zone-resolve and convert a free-form birth date/time.
    pub fn resolve(date: &str, time: &str, timezone: &str) -> Result<Self, TimeError> {
        let zone = normalize_timezone(timezone)?;
        let parsed = parse_local_datetime(date, time)?;
        let local = localize(&zone.tz, parsed.naive);
        let utc = local.with_timezone(&Utc);
        Ok(Self {
            jd_ut: jd_ut_from_utc(&utc),
            local,
            utc,
            zone: zone.tz,
            corrected_zone: zone.corrected,
            strategy: parsed.strategy,
        })
    }

    /// Fractional UT hour of the birth instant.
    pub fn ut_hour(&self) -> f64 {
        ut_hour(&self.utc)
    }

    /// The instant `days` after birth, in the birth zone.
    ///
    /// Offsets are rounded to the microsecond.
    pub fn after_days(&self, days: f64) -> Result<DateTime<Tz>, TimeError> {
        let micros = (days * SECONDS_PER_DAY * 1.0e6).round();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(TimeError::OutOfRange("day offset"));
        }
        self.local
            .checked_add_signed(TimeDelta::microseconds(micros as i64))
            .ok_or(TimeError::OutOfRange("day offset"))
    }
}

/// Attach a zone to a wall-clock time.
///
/// An ambiguous time (DST fold) takes the earlier instant. A nonexistent
/// time (DST gap) is read with the offset in force before the gap, which
/// moves it forward by the gap length.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                .fix();
            let utc = naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}
