//! Nakshatra (lunar mansion) classification.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each, and each nakshatra into 4 padas of 3 deg 20'.
//! A longitude exactly on a boundary belongs to the nakshatra that starts
//! there.
//!
//! Rulership follows the Vimshottari lord cycle: Ashwini is ruled by Ketu,
//! Bharani by Venus, and so on, repeating every 9 nakshatras.

use serde::{Deserialize, Serialize};

use crate::body::{Body, ChartPoint, table_points};
use crate::error::VedicError;
use crate::frame::ChartFrame;
use crate::rashi::rashi_from_longitude;
use crate::util::normalize_360;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// Vimshottari lord cycle, indexed by `nakshatra_index % 9`.
pub const VIMSHOTTARI_LORDS: [Body; 9] = [
    Body::Ketu,
    Body::Venus,
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Rahu,
    Body::Jupiter,
    Body::Saturn,
    Body::Mercury,
];

// ---------------------------------------------------------------------------
// 27-Nakshatra scheme
// ---------------------------------------------------------------------------

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishta,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Display name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishta => "Dhanishta",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub fn index(self) -> u8 {
        ALL_NAKSHATRAS_27
            .iter()
            .position(|&n| n == self)
            .unwrap_or(0) as u8
    }

    /// Vimshottari ruling lord.
    pub fn lord(self) -> Body {
        VIMSHOTTARI_LORDS[(self.index() % 9) as usize]
    }
}

/// Result of nakshatra computation from a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Pada (quarter) 1-4.
    pub pada: u8,
    /// Decimal degrees traversed within the nakshatra [0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Decimal degrees traversed within the pada [0, 3.333...).
    pub degrees_in_pada: f64,
    /// Ruling lord.
    pub lord: Body,
}

/// Determine nakshatra and pada from a sidereal longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - idx as f64 * NAKSHATRA_SPAN_27;
    let pada_idx = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3);
    let degrees_in_pada = degrees_in_nakshatra - pada_idx as f64 * PADA_SPAN;
    let nakshatra = ALL_NAKSHATRAS_27[idx as usize];

    NakshatraInfo {
        nakshatra,
        nakshatra_index: idx,
        pada: pada_idx + 1,
        degrees_in_nakshatra,
        degrees_in_pada,
        lord: VIMSHOTTARI_LORDS[(idx % 9) as usize],
    }
}

/// One row of the nakshatra table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraEntry {
    pub body: ChartPoint,
    /// Western sign name of the point.
    pub sign: String,
    pub longitude: f64,
    pub nakshatra: String,
    pub pada: u8,
    pub lord: Body,
}

/// Nakshatra table for the 13 reference points of a frame, in table order
/// (Ascendant, then the 12 bodies).
pub fn nakshatra_table(frame: &ChartFrame) -> Result<Vec<NakshatraEntry>, VedicError> {
    table_points()
        .map(|point| {
            let longitude = frame.point(point)?;
            let info = nakshatra_from_longitude(longitude);
            Ok(NakshatraEntry {
                body: point,
                sign: rashi_from_longitude(longitude).rashi.western_name().to_string(),
                longitude,
                nakshatra: info.nakshatra.name().to_string(),
                pada: info.pada,
                lord: info.lord,
            })
        })
        .collect()
}
