//! Vimshottari mahadasha sequence.

use crate::body::Body;
use crate::nakshatra::VIMSHOTTARI_LORDS;

use super::balance::nakshatra_birth_balance;
use super::types::{DAYS_PER_YEAR, DashaPeriod};

/// Mahadasha lengths in years, parallel to [`VIMSHOTTARI_LORDS`].
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Full cycle length in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Mahadasha length in years for a lord, or `None` for a non-lord body.
pub fn vimshottari_years(lord: Body) -> Option<f64> {
    VIMSHOTTARI_LORDS
        .iter()
        .position(|&b| b == lord)
        .map(|i| VIMSHOTTARI_YEARS[i])
}

/// Generate the 9 mahadashas from the birth JD and Moon longitude.
///
/// The sequence starts at the Moon's nakshatra lord and wraps through
/// the lord cycle. Period `i + 1` starts at the exact end value of
/// period `i`.
pub fn vimshottari_mahadashas(birth_jd: f64, moon_sidereal_lon: f64) -> [DashaPeriod; 9] {
    let nak_idx = nakshatra_birth_balance(moon_sidereal_lon, 0.0).0;
    let start = (nak_idx % 9) as usize;
    let entry_days = VIMSHOTTARI_YEARS[start] * DAYS_PER_YEAR;
    let (_, balance_days, _) = nakshatra_birth_balance(moon_sidereal_lon, entry_days);

    let mut cursor = birth_jd;
    std::array::from_fn(|offset| {
        let seq = (start + offset) % 9;
        let duration = if offset == 0 {
            balance_days
        } else {
            VIMSHOTTARI_YEARS[seq] * DAYS_PER_YEAR
        };
        let end = cursor + duration;
        let period = DashaPeriod {
            lord: VIMSHOTTARI_LORDS[seq],
            start_jd: cursor,
            end_jd: end,
        };
        cursor = end;
        period
    })
}
