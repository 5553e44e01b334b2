//! Pure sidereal chart math.
//!
//! This crate provides:
//! - Rashi, nakshatra and pada classification of sidereal longitudes
//! - The navamsa (D9) transform and its whole-sign house frame
//! - Vimshottari mahadasha periods
//! - Panchanga limbs (tithi, yoga, karana, weekday)
//! - Major aspects between bodies and the ascendant
//!
//! Nothing here touches an ephemeris. Inputs are sidereal longitudes in
//! degrees; outputs are reduced to [0, 360).

pub mod amsha;
pub mod aspect;
pub mod body;
pub mod dasha;
pub mod error;
pub mod frame;
pub mod nakshatra;
pub mod panchanga;
pub mod rashi;
pub mod util;

pub use amsha::{
    NAVAMSA_SEGMENT, navamsa_frame, navamsa_longitude, navamsa_start_sign, whole_sign_cusps,
};
pub use aspect::{
    ASPECT_TABLE, AspectKind, AspectRecord, ascendant_aspects, chart_aspects, classify_aspect,
    merge_aspects, pairwise_aspects,
};
pub use body::{Body, ChartPoint, QUERIED_BODIES, TABLE_BODIES, ketu_from_rahu, table_points};
pub use dasha::{DAYS_PER_YEAR, DashaPeriod, vimshottari_mahadashas};
pub use error::VedicError;
pub use frame::ChartFrame;
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraEntry, NakshatraInfo, PADA_SPAN,
    VIMSHOTTARI_LORDS, nakshatra_from_longitude, nakshatra_table,
};
pub use panchanga::{
    Paksha, PanchangaSnapshot, TithiPosition, Vaar, karana_from_elongation, panchanga,
    tithi_from_elongation, yoga_from_sum,
};
pub use rashi::{
    ALL_RASHIS, Dms, Modality, Rashi, RashiInfo, deg_to_dms, format_sign_degree,
    rashi_from_longitude,
};
pub use util::{angular_separation, normalize_360};
