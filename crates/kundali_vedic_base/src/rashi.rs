//! Rashi (zodiac sign) and DMS (degrees-minutes-seconds) formatting.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg. Sign modality (movable, fixed,
//! dual) drives the navamsa mapping.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Sign modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Chara: Mesha, Karka, Tula, Makara.
    Movable,
    /// Sthira: Vrishabha, Simha, Vrischika, Kumbha.
    Fixed,
    /// Dwiswabhava: Mithuna, Kanya, Dhanu, Meena.
    Dual,
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western zodiac name; reports use this form.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Mesha => 0,
            Self::Vrishabha => 1,
            Self::Mithuna => 2,
            Self::Karka => 3,
            Self::Simha => 4,
            Self::Kanya => 5,
            Self::Tula => 6,
            Self::Vrischika => 7,
            Self::Dhanu => 8,
            Self::Makara => 9,
            Self::Kumbha => 10,
            Self::Meena => 11,
        }
    }

    /// Rashi from a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    pub const fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }
}

/// Degrees, minutes and whole seconds of arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}° {}′ {}″", self.degrees, self.minutes, self.seconds)
    }
}

/// Convert an angle to DMS, rounding to the nearest arcsecond.
///
/// The angle is reduced to [0, 360) first. 60″ carries into minutes,
/// 60′ into degrees, and degrees wrap at 360.
pub fn deg_to_dms(deg: f64) -> Dms {
    // Rounding the total arcseconds first makes the carry implicit.
    let total = (normalize_360(deg) * 3600.0).round() as u32;
    let d = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    Dms {
        degrees: (d % 360) as u16,
        minutes: m as u8,
        seconds: s as u8,
    }
}

/// Result of rashi computation from a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// 0-based index (0 = Mesha).
    pub rashi_index: u8,
    /// Decimal degrees within the rashi [0, 30).
    pub degrees_in_rashi: f64,
}

/// Determine rashi from a sidereal longitude.
///
/// Each rashi spans exactly 30 degrees: Mesha = [0, 30), Vrishabha = [30, 60), etc.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let rashi_index = ((lon / 30.0).floor() as u8).min(11);
    RashiInfo {
        rashi: ALL_RASHIS[rashi_index as usize],
        rashi_index,
        degrees_in_rashi: lon - rashi_index as f64 * 30.0,
    }
}

/// Sign name plus within-sign DMS, e.g. `Aries 12°05′09″`.
///
/// Rounding that reaches 30° is shown as 30°00′00″ of the same sign.
pub fn format_sign_degree(sidereal_lon_deg: f64) -> String {
    let info = rashi_from_longitude(sidereal_lon_deg);
    let dms = deg_to_dms(info.degrees_in_rashi);
    format!(
        "{} {}°{:02}′{:02}″",
        info.rashi.western_name(),
        dms.degrees,
        dms.minutes,
        dms.seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rashi_boundaries() {
        assert_eq!(rashi_from_longitude(0.0).rashi, Rashi::Mesha);
        assert_eq!(rashi_from_longitude(29.999).rashi, Rashi::Mesha);
        assert_eq!(rashi_from_longitude(30.0).rashi, Rashi::Vrishabha);
        assert_eq!(rashi_from_longitude(359.999).rashi, Rashi::Meena);
        assert_eq!(rashi_from_longitude(-1.0).rashi, Rashi::Meena);
    }

    #[test]
    fn modality_cycle() {
        assert_eq!(Rashi::Mesha.modality(), Modality::Movable);
        assert_eq!(Rashi::Vrishabha.modality(), Modality::Fixed);
        assert_eq!(Rashi::Mithuna.modality(), Modality::Dual);
        assert_eq!(Rashi::Makara.modality(), Modality::Movable);
        assert_eq!(Rashi::Kumbha.modality(), Modality::Fixed);
        assert_eq!(Rashi::Meena.modality(), Modality::Dual);
    }

    #[test]
    fn index_roundtrip() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), *r);
        }
        assert_eq!(Rashi::from_index(13), Rashi::Vrishabha);
    }

    #[test]
    fn dms_basic() {
        let dms = deg_to_dms(45.0 + 30.0 / 60.0 + 15.0 / 3600.0);
        assert_eq!(dms, Dms { degrees: 45, minutes: 30, seconds: 15 });
    }

    #[test]
    fn dms_rounding_carries() {
        // 12° 59′ 59.7″ rounds to 13° 0′ 0″
        let dms = deg_to_dms(12.0 + 59.0 / 60.0 + 59.7 / 3600.0);
        assert_eq!(dms, Dms { degrees: 13, minutes: 0, seconds: 0 });
    }

    #[test]
    fn dms_wraps_at_360() {
        let dms = deg_to_dms(359.99999);
        assert_eq!(dms, Dms { degrees: 0, minutes: 0, seconds: 0 });
    }

    #[test]
    fn dms_negative_normalized() {
        assert_eq!(deg_to_dms(-0.5), Dms { degrees: 359, minutes: 30, seconds: 0 });
    }

    #[test]
    fn sign_degree_format() {
        let s = format_sign_degree(42.0 + 5.0 / 60.0 + 9.0 / 3600.0);
        assert_eq!(s, "Taurus 12°05′09″");
    }
}
