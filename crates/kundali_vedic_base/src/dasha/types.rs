//! Core types for dasha period calculations.

use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Year length for dasha arithmetic: the mean Gregorian year.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// A single mahadasha period.
///
/// Bounds are Julian Days (UT); consecutive periods share the exact same
/// boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Body,
    pub start_jd: f64,
    pub end_jd: f64,
}

impl DashaPeriod {
    /// Duration in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Duration in years of [`DAYS_PER_YEAR`].
    pub fn duration_years(&self) -> f64 {
        self.duration_days() / DAYS_PER_YEAR
    }

    /// Whether the JD falls within [start, end).
    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_and_contains() {
        let p = DashaPeriod {
            lord: Body::Venus,
            start_jd: 2_451_545.0,
            end_jd: 2_451_545.0 + 20.0 * DAYS_PER_YEAR,
        };
        assert!((p.duration_years() - 20.0).abs() < 1e-12);
        assert!(p.contains(2_451_545.0));
        assert!(!p.contains(p.end_jd));
    }
}
