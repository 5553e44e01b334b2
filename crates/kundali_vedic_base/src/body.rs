//! Chart bodies and reference points.
//!
//! Twelve bodies are tracked: the seven classical grahas, the three outer
//! planets, the true lunar node (Rahu) and its opposite point (Ketu).
//! Ketu is always derived from Rahu and never queried.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util::normalize_360;

/// A tracked chart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Rahu,
    Ketu,
}

/// The 11 bodies obtained from the ephemeris, in query order.
pub const QUERIED_BODIES: [Body; 11] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Rahu,
];

/// All 12 bodies in table order (nodes before the outer planets).
pub const TABLE_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// English name, as used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Whether the body is derived from another rather than queried.
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::Ketu)
    }

    /// Look up a body by its English name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE_BODIES
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ketu longitude from Rahu: norm360(Rahu + 180).
pub fn ketu_from_rahu(rahu_deg: f64) -> f64 {
    normalize_360(rahu_deg + 180.0)
}

/// A point that can appear in tables and aspects: the ascendant or a body.
///
/// Serializes as its bare name ("Ascendant", "Sun", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartPoint {
    Ascendant,
    Body(Body),
}

impl ChartPoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascendant => "Ascendant",
            Self::Body(b) => b.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("ascendant") {
            Some(Self::Ascendant)
        } else {
            Body::from_name(name).map(Self::Body)
        }
    }
}

impl From<Body> for ChartPoint {
    fn from(b: Body) -> Self {
        Self::Body(b)
    }
}

impl std::fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ChartPoint {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        Self::from_name(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown chart point: {name}")))
    }
}

/// The 13 table rows in order: Ascendant, then [`TABLE_BODIES`].
pub fn table_points() -> impl Iterator<Item = ChartPoint> {
    std::iter::once(ChartPoint::Ascendant).chain(TABLE_BODIES.iter().copied().map(ChartPoint::Body))
}
