//! Sidereal chart assembly.
//!
//! Validates a [`ChartRequest`], computes the D1 frame through the
//! ephemeris adapter with engine fallback, derives D9, nakshatras, the
//! Vimshottari timeline, panchanga and aspects, and returns one
//! [`ChartReport`]. Failures carry a stable kind code and status.

pub mod chart;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod request;

pub use chart::{compute_chart, search_place};
pub use error::{ChartError, EphemerisFailure, ErrorBody, HouseFailure};
pub use pipeline::{D1Positions, compute_d1, compute_positions, compute_sidereal_houses};
pub use report::{ChartReport, DashaEntry, ZoneReport, iso_local};
pub use request::{ChartRequest, DEFAULT_HOUSE_SYSTEM, ValidatedRequest, house_system_letter};
