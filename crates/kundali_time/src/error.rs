//! Error types for birth-time normalization.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from date/time parsing and timezone resolution.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// No ISO form and no date/time format combination matched.
    UnparseableDateTime { date: String, time: String },
    /// Timezone name is not a known IANA zone, even after correction.
    UnknownTimezone(String),
    /// Resolved instant falls outside the representable range.
    OutOfRange(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnparseableDateTime { date, time } => write!(
                f,
                "unrecognized date/time '{date} {time}'; try 1936-05-08 and 07:22:00 or 07:22:00 AM"
            ),
            Self::UnknownTimezone(tz) => write!(f, "unknown timezone: {tz}"),
            Self::OutOfRange(msg) => write!(f, "time out of range: {msg}"),
        }
    }
}

impl Error for TimeError {}
