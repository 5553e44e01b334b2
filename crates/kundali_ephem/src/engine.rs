//! Ephemeris engines, calculation flags and provider body codes.

use std::fmt::{Display, Formatter};
use std::ops::BitOr;
use std::str::FromStr;

use kundali_vedic_base::Body;
use serde::{Deserialize, Serialize};

use crate::error::EphemError;

/// Calculation flag bits, as understood by Swiss ephemeris providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalcFlags(pub u32);

impl CalcFlags {
    pub const NONE: Self = Self(0);
    pub const SWIEPH: Self = Self(2);
    pub const MOSEPH: Self = Self(4);
    pub const SPEED: Self = Self(256);
    pub const SIDEREAL: Self = Self(64 * 1024);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags used for every body query with `engine`.
    pub const fn body_query(engine: EngineKind) -> Self {
        Self(Self::SPEED.0 | Self::SIDEREAL.0 | engine.flag().0)
    }
}

impl BitOr for CalcFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The two ephemeris engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// File-backed Swiss ephemeris. Needs data files in the ephemeris directory.
    #[serde(rename = "SWIEPH")]
    Swieph,
    /// Built-in analytic Moshier ephemeris.
    #[serde(rename = "MOSEPH")]
    Moseph,
}

impl EngineKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Swieph => "SWIEPH",
            Self::Moseph => "MOSEPH",
        }
    }

    pub const fn flag(self) -> CalcFlags {
        match self {
            Self::Swieph => CalcFlags::SWIEPH,
            Self::Moseph => CalcFlags::MOSEPH,
        }
    }

    /// The engine selected by a flag set, if any.
    pub const fn from_flags(flags: CalcFlags) -> Option<Self> {
        if flags.contains(CalcFlags::MOSEPH) {
            Some(Self::Moseph)
        } else if flags.contains(CalcFlags::SWIEPH) {
            Some(Self::Swieph)
        } else {
            None
        }
    }
}

impl Display for EngineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = EphemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SWIEPH" => Ok(Self::Swieph),
            "MOSEPH" => Ok(Self::Moseph),
            _ => Err(EphemError::InvalidConfig("engine must be SWIEPH or MOSEPH")),
        }
    }
}

/// Order in which engines are tried for a body set.
///
/// A forced engine goes first with the other as fallback. Unforced, the
/// file-backed engine leads only when its data files are present.
pub fn engine_try_order(forced: Option<EngineKind>, primary_available: bool) -> Vec<EngineKind> {
    match forced {
        Some(EngineKind::Moseph) => vec![EngineKind::Moseph, EngineKind::Swieph],
        Some(EngineKind::Swieph) => vec![EngineKind::Swieph, EngineKind::Moseph],
        None if primary_available => vec![EngineKind::Swieph, EngineKind::Moseph],
        None => vec![EngineKind::Moseph],
    }
}

/// Swiss ephemeris planet number (`SE_*`) for a queried body.
///
/// Rahu maps to the true node. Ketu has no code.
pub const fn provider_body_code(body: Body) -> Option<i32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::Rahu => Some(11),
        Body::Ketu => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_vedic_base::QUERIED_BODIES;

    #[test]
    fn try_orders() {
        use EngineKind::*;
        assert_eq!(engine_try_order(Some(Moseph), true), vec![Moseph, Swieph]);
        assert_eq!(engine_try_order(Some(Moseph), false), vec![Moseph, Swieph]);
        assert_eq!(engine_try_order(Some(Swieph), false), vec![Swieph, Moseph]);
        assert_eq!(engine_try_order(None, true), vec![Swieph, Moseph]);
        assert_eq!(engine_try_order(None, false), vec![Moseph]);
    }

    #[test]
    fn flag_bits() {
        let f = CalcFlags::body_query(EngineKind::Moseph);
        assert_eq!(f.bits(), 4 | 256 | 65536);
        assert!(f.contains(CalcFlags::SIDEREAL));
        assert_eq!(EngineKind::from_flags(f), Some(EngineKind::Moseph));
        assert_eq!(
            EngineKind::from_flags(CalcFlags::SWIEPH | CalcFlags::SPEED),
            Some(EngineKind::Swieph)
        );
        assert_eq!(EngineKind::from_flags(CalcFlags::SPEED), None);
    }

    #[test]
    fn engine_parse() {
        assert_eq!(" moseph ".parse::<EngineKind>().unwrap(), EngineKind::Moseph);
        assert_eq!("SWIEPH".parse::<EngineKind>().unwrap(), EngineKind::Swieph);
        assert!("JPL".parse::<EngineKind>().is_err());
    }

    #[test]
    fn every_queried_body_has_code() {
        for b in QUERIED_BODIES {
            assert!(provider_body_code(b).is_some(), "{b}");
        }
        assert_eq!(provider_body_code(Body::Ketu), None);
        assert_eq!(provider_body_code(Body::Rahu), Some(11));
    }
}
