//! Chart report shapes.

use chrono::{DateTime, SecondsFormat, TimeZone};
use kundali_ephem::EngineKind;
use kundali_vedic_base::{AspectRecord, Body, ChartFrame, NakshatraEntry, PanchangaSnapshot};
use serde::{Deserialize, Serialize};

/// One Vimshottari mahadasha with local-time bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaEntry {
    pub lord: Body,
    pub start: String,
    pub end: String,
    pub years: f64,
}

/// Birth-zone details used for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReport {
    /// Zone name as given in the request.
    pub requested: String,
    /// IANA zone actually used.
    pub resolved: String,
    /// Set when the requested spelling had to be corrected.
    pub corrected: Option<String>,
    pub local_time: String,
    pub utc_time: String,
}

/// Complete chart for one birth moment and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    pub engine: EngineKind,
    pub jd_ut: f64,
    pub lst_hours: f64,
    pub lst_hms: String,
    pub timezone: ZoneReport,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: String,
    pub ayanamsa: f64,
    pub d1: ChartFrame,
    pub d9: ChartFrame,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub nakshatras: Vec<NakshatraEntry>,
    pub dasha: Vec<DashaEntry>,
    pub aspects: Vec<AspectRecord>,
    pub panchanga: PanchangaSnapshot,
}

/// RFC 3339 with millisecond precision and the zone's offset.
pub fn iso_local<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.to_rfc3339_opts(SecondsFormat::Millis, false)
}
