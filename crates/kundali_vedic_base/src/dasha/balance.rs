//! Birth balance of the first mahadasha.

use crate::nakshatra::NAKSHATRA_SPAN_27;
use crate::util::normalize_360;

/// Compute nakshatra birth balance.
///
/// Returns `(nakshatra_index, balance_days, remaining_fraction)`:
/// - `nakshatra_index`: 0-based index (0=Ashwini..26=Revati) of the Moon's nakshatra
/// - `balance_days`: `entry_period_days × remaining_fraction`
/// - `remaining_fraction`: `(span − position_in_nakshatra) / span`, in (0, 1]
pub fn nakshatra_birth_balance(moon_sidereal_lon: f64, entry_period_days: f64) -> (u8, f64, f64) {
    let lon = normalize_360(moon_sidereal_lon);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let position_in_nak = lon - (nak_idx as f64) * NAKSHATRA_SPAN_27;
    let remaining = (NAKSHATRA_SPAN_27 - position_in_nak) / NAKSHATRA_SPAN_27;
    (nak_idx, entry_period_days * remaining, remaining)
}
