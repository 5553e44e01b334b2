//! IANA timezone lookup with correction of common input mistakes.

use chrono_tz::Tz;

use crate::error::TimeError;

/// Known reversed or historical spellings.
const QUICK_MAP: [(&str, &str); 5] = [
    ("Chicago/America", "America/Chicago"),
    ("Kolkata/Asia", "Asia/Kolkata"),
    ("Calcutta/Asia", "Asia/Kolkata"),
    ("Bombay/Asia", "Asia/Kolkata"),
    ("Madras/Asia", "Asia/Kolkata"),
];

/// A resolved zone plus the corrected spelling, if one was needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneResolution {
    pub tz: Tz,
    pub corrected: Option<String>,
}

/// Resolve a user-supplied zone name.
///
/// Order: exact IANA name, then [`QUICK_MAP`], then `City/Region`
/// swapped to `Region/City` (whitespace becomes `_`).
pub fn normalize_timezone(raw: &str) -> Result<ZoneResolution, TimeError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TimeError::UnknownTimezone(String::new()));
    }
    if let Ok(tz) = name.parse::<Tz>() {
        return Ok(ZoneResolution {
            tz,
            corrected: None,
        });
    }

    if let Some(&(_, fixed)) = QUICK_MAP.iter().find(|(k, _)| *k == name) {
        if let Ok(tz) = fixed.parse::<Tz>() {
            return Ok(ZoneResolution {
                tz,
                corrected: Some(fixed.to_string()),
            });
        }
    }

    if let Some((first, second)) = name.split_once('/') {
        let second = second.split('/').next().unwrap_or(second);
        let candidate: String = format!("{second}/{first}")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        if let Ok(tz) = candidate.parse::<Tz>() {
            tracing::debug!(from = name, to = %candidate, "timezone corrected");
            return Ok(ZoneResolution {
                tz,
                corrected: Some(candidate),
            });
        }
    }

    Err(TimeError::UnknownTimezone(name.to_string()))
}
