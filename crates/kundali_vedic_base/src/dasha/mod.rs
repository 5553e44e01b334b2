//! Vimshottari dasha (planetary period) timeline.
//!
//! The 120-year cycle is apportioned among the 9 nakshatra lords. The
//! first mahadasha is the Moon's nakshatra lord, shortened to the part of
//! the nakshatra still ahead of the Moon at birth.

pub mod balance;
pub mod types;
pub mod vimshottari;

pub use balance::nakshatra_birth_balance;
pub use types::{DAYS_PER_YEAR, DashaPeriod};
pub use vimshottari::{
    VIMSHOTTARI_TOTAL_YEARS, VIMSHOTTARI_YEARS, vimshottari_mahadashas, vimshottari_years,
};
