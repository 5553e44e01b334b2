//! Birth-time normalization: flexible parsing, timezone resolution,
//! Julian Day (UT) and sidereal time.
//!
//! Timezone data comes from the IANA database bundled in `chrono-tz`.

pub mod birth;
pub mod error;
pub mod julian;
pub mod parse;
pub mod sidereal;
pub mod zone;

pub use birth::{BirthMoment, localize};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar, jd_ut_from_utc,
    ut_hour, utc_from_jd,
};
pub use parse::{DATE_FORMATS, ParseStrategy, ParsedLocal, TIME_FORMATS, parse_local_datetime};
pub use sidereal::{Hms, gmst_hours, hours_to_hms, local_sidereal_time_hours, normalize_24};
pub use zone::{ZoneResolution, normalize_timezone};
