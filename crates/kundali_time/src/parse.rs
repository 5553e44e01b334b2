//! Flexible local date/time parsing.
//!
//! Parsing is an ordered strategy list: strict ISO-8601 first, then every
//! (date format × time format) pair in [`DATE_FORMATS`] × [`TIME_FORMATS`]
//! order. The first strategy that parses wins, so the order is part of the
//! contract: `03/04/2020` is read as March 4 because `MM/DD/YYYY` precedes
//! `DD/MM/YYYY`.

use chrono::NaiveDateTime;

use crate::error::TimeError;

/// Date formats tried after ISO, in order: Y-M-D, MM/DD/YYYY, DD/MM/YYYY,
/// M/D/YYYY, D/M/YYYY.
pub const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%-m/%-d/%Y", "%-d/%-m/%Y"];

/// Time formats tried for each date format, in order: HH:mm:ss, HH:mm,
/// H:mm, h:mm a, h:mm:ss a, hh:mm a, hh:mm:ss a.
pub const TIME_FORMATS: [&str; 7] = [
    "%H:%M:%S",
    "%H:%M",
    "%-H:%M",
    "%-I:%M %p",
    "%-I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S %p",
];

/// ISO-8601 combined forms accepted by the first strategy.
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Which strategy produced a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Strict ISO-8601 `{date}T{time}`.
    Iso,
    /// A `{date} {time}` pair from the fallback lists.
    Formats {
        date: &'static str,
        time: &'static str,
    },
}

/// A wall-clock time with no zone attached yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLocal {
    pub naive: NaiveDateTime,
    pub strategy: ParseStrategy,
}

/// Every strategy in the order it is attempted.
pub fn strategies() -> impl Iterator<Item = ParseStrategy> {
    std::iter::once(ParseStrategy::Iso).chain(DATE_FORMATS.iter().flat_map(|&date| {
        TIME_FORMATS
            .iter()
            .map(move |&time| ParseStrategy::Formats { date, time })
    }))
}

/// Parse a free-form local date and time.
///
/// Both inputs are trimmed; the time is uppercased so `7:22 pm` matches
/// the AM/PM formats.
pub fn parse_local_datetime(date: &str, time: &str) -> Result<ParsedLocal, TimeError> {
    let d = date.trim();
    let t = time.trim().to_uppercase();

    for strategy in strategies() {
        if let Some(naive) = try_strategy(strategy, d, &t) {
            tracing::trace!(?strategy, "date/time parsed");
            return Ok(ParsedLocal { naive, strategy });
        }
    }

    Err(TimeError::UnparseableDateTime {
        date: d.to_string(),
        time: t,
    })
}

fn try_strategy(strategy: ParseStrategy, date: &str, time: &str) -> Option<NaiveDateTime> {
    match strategy {
        ParseStrategy::Iso => {
            let combined = format!("{date}T{time}");
            ISO_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
        }
        ParseStrategy::Formats { date: df, time: tf } => {
            let combined = format!("{date} {time}");
            NaiveDateTime::parse_from_str(&combined, &format!("{df} {tf}")).ok()
        }
    }
}
