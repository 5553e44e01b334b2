//! Panchanga: vaar (weekday), tithi, yoga and karana at birth.
//!
//! All four limbs come from the sidereal Sun and Moon:
//! - tithi: Moon−Sun elongation in 12 deg steps (30 per lunar month)
//! - karana: the same elongation in 6 deg steps (60 per lunar month)
//! - yoga: Moon+Sun sum in nakshatra-sized steps (27 per circle)
//!
//! The weekday is supplied by the caller in the birth timezone.

use serde::{Deserialize, Serialize};

use crate::nakshatra::{NAKSHATRA_SPAN_27, nakshatra_from_longitude};
use crate::util::normalize_360;

/// Degrees of elongation per tithi.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Degrees of elongation per karana (half-tithi).
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// Names for the 15 tithis of one paksha, reused for both halves.
pub const TITHI_NAMES_15: [&str; 15] = [
    "Pratipada",
    "Dvitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

/// Name of tithi 30, the new moon.
pub const AMAVASYA: &str = "Amavasya";

/// The 27 yogas from Vishkumbha to Vaidhriti.
pub const YOGA_NAMES_27: [&str; 27] = [
    "Vishkumbha",
    "Preeti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shoola",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// The 7 movable karanas, repeating 8 times through half-tithis 1..=56.
pub const MOVABLE_KARANAS: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garaja", "Vanija", "Vishti",
];

/// Fixed karana for half-tithi 0.
pub const FIRST_FIXED_KARANA: &str = "Kimstughna";

/// Fixed karanas for half-tithis 57, 58, 59.
pub const LAST_FIXED_KARANAS: [&str; 3] = ["Shakuni", "Chatushpada", "Naga"];

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    /// Waxing (tithis 1-15).
    Shukla,
    /// Waning (tithis 16-30).
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Weekday (vaar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vaar {
    Ravivaar,
    Somvaar,
    Mangalvaar,
    Budhvaar,
    Guruvaar,
    Shukravaar,
    Shanivaar,
}

const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivaar,
    Vaar::Somvaar,
    Vaar::Mangalvaar,
    Vaar::Budhvaar,
    Vaar::Guruvaar,
    Vaar::Shukravaar,
    Vaar::Shanivaar,
];

impl Vaar {
    /// Weekday from days since Sunday (0 = Sunday .. 6 = Saturday).
    pub const fn from_days_from_sunday(days: u32) -> Self {
        ALL_VAARS[(days % 7) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Ravivaar",
            Self::Somvaar => "Somvaar",
            Self::Mangalvaar => "Mangalvaar",
            Self::Budhvaar => "Budhvaar",
            Self::Guruvaar => "Guruvaar",
            Self::Shukravaar => "Shukravaar",
            Self::Shanivaar => "Shanivaar",
        }
    }

    /// Long English weekday name; reports use this form.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Sunday",
            Self::Somvaar => "Monday",
            Self::Mangalvaar => "Tuesday",
            Self::Budhvaar => "Wednesday",
            Self::Guruvaar => "Thursday",
            Self::Shukravaar => "Friday",
            Self::Shanivaar => "Saturday",
        }
    }
}

/// Tithi position from Moon−Sun elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TithiPosition {
    /// 1-based tithi number, 1..=30.
    pub number: u8,
    pub paksha: Paksha,
    pub name: &'static str,
}

/// Classify a Moon−Sun elongation into a tithi.
///
/// Elongation 12.0 is tithi 2 (Dvitiya); 180.0 is tithi 16 (Krishna
/// Pratipada); tithi 30 is Amavasya.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let e = normalize_360(elongation_deg);
    let number = (((e / TITHI_SEGMENT_DEG).floor() as u8) + 1).clamp(1, 30);
    let paksha = if number <= 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    };
    let idx15 = ((number - 1) % 15) as usize;
    let name = if number == 30 {
        AMAVASYA
    } else {
        TITHI_NAMES_15[idx15]
    };
    TithiPosition {
        number,
        paksha,
        name,
    }
}

/// Yoga index (0..=26) and name from the sidereal Sun+Moon sum.
pub fn yoga_from_sum(sum_deg: f64) -> (u8, &'static str) {
    let idx = ((normalize_360(sum_deg) / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    (idx, YOGA_NAMES_27[idx as usize])
}

/// Karana half-tithi index (0..=59) and name from the elongation.
///
/// Index 0 is Kimstughna; 1..=56 cycle through the movable karanas;
/// 57..=59 are Shakuni, Chatushpada and Naga.
pub fn karana_from_elongation(elongation_deg: f64) -> (u8, &'static str) {
    let idx = ((normalize_360(elongation_deg) / KARANA_SEGMENT_DEG).floor() as u8).min(59);
    let name = match idx {
        0 => FIRST_FIXED_KARANA,
        57..=59 => LAST_FIXED_KARANAS[(idx - 57) as usize],
        _ => MOVABLE_KARANAS[((idx - 1) % 7) as usize],
    };
    (idx, name)
}

/// Panchanga at the birth instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangaSnapshot {
    /// Long English weekday in the birth timezone.
    pub weekday: String,
    pub tithi_number: u8,
    pub tithi_name: String,
    pub paksha: Paksha,
    /// Moon's nakshatra.
    pub nakshatra: String,
    pub pada: u8,
    pub yoga: String,
    pub karana: String,
}

/// Build the panchanga from sidereal Sun and Moon longitudes.
pub fn panchanga(sun_deg: f64, moon_deg: f64, vaar: Vaar) -> PanchangaSnapshot {
    let elongation = normalize_360(moon_deg - sun_deg);
    let tithi = tithi_from_elongation(elongation);
    let (_, yoga) = yoga_from_sum(moon_deg + sun_deg);
    let (_, karana) = karana_from_elongation(elongation);
    let nak = nakshatra_from_longitude(moon_deg);

    PanchangaSnapshot {
        weekday: vaar.english_name().to_string(),
        tithi_number: tithi.number,
        tithi_name: tithi.name.to_string(),
        paksha: tithi.paksha,
        nakshatra: nak.nakshatra.name().to_string(),
        pada: nak.pada,
        yoga: yoga.to_string(),
        karana: karana.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tithi_at_zero() {
        let t = tithi_from_elongation(0.0);
        assert_eq!(t.number, 1);
        assert_eq!(t.paksha, Paksha::Shukla);
        assert_eq!(t.name, "Pratipada");
    }

    #[test]
    fn tithi_boundary_12() {
        let t = tithi_from_elongation(12.0);
        assert_eq!(t.number, 2);
        assert_eq!(t.name, "Dvitiya");
        assert_eq!(t.paksha, Paksha::Shukla);
    }

    #[test]
    fn tithi_purnima_and_krishna_start() {
        assert_eq!(tithi_from_elongation(179.9).name, "Purnima");
        let t = tithi_from_elongation(180.0);
        assert_eq!(t.number, 16);
        assert_eq!(t.paksha, Paksha::Krishna);
        assert_eq!(t.name, "Pratipada");
    }

    #[test]
    fn tithi_full_circle_wraps() {
        // 360 reduces to 0, which is Shukla Pratipada.
        let t = tithi_from_elongation(360.0);
        assert_eq!(t.number, 1);
    }

    #[test]
    fn amavasya_is_tithi_30() {
        let t = tithi_from_elongation(355.0);
        assert_eq!(t.number, 30);
        assert_eq!(t.name, AMAVASYA);
        assert_eq!(t.paksha, Paksha::Krishna);
        assert_eq!(tithi_from_elongation(343.0).name, "Chaturdashi");
    }

    #[test]
    fn yoga_bounds() {
        assert_eq!(yoga_from_sum(0.0), (0, "Vishkumbha"));
        assert_eq!(yoga_from_sum(359.99), (26, "Vaidhriti"));
        assert_eq!(yoga_from_sum(NAKSHATRA_SPAN_27).1, "Preeti");
    }

    #[test]
    fn karana_fixed_and_movable() {
        assert_eq!(karana_from_elongation(0.0), (0, "Kimstughna"));
        assert_eq!(karana_from_elongation(6.0), (1, "Bava"));
        assert_eq!(karana_from_elongation(42.0), (7, "Vishti"));
        assert_eq!(karana_from_elongation(48.0), (8, "Bava"));
        assert_eq!(karana_from_elongation(336.0), (56, "Vishti"));
        assert_eq!(karana_from_elongation(342.0), (57, "Shakuni"));
        assert_eq!(karana_from_elongation(348.0), (58, "Chatushpada"));
        assert_eq!(karana_from_elongation(359.0), (59, "Naga"));
    }

    #[test]
    fn vaar_from_sunday_index() {
        assert_eq!(Vaar::from_days_from_sunday(0), Vaar::Ravivaar);
        assert_eq!(Vaar::from_days_from_sunday(1).english_name(), "Monday");
        assert_eq!(Vaar::from_days_from_sunday(6).english_name(), "Saturday");
    }

    #[test]
    fn snapshot_combines_limbs() {
        // Sun 10, Moon 101: elongation 91 → tithi 8 (Ashtami), karana 15;
        // sum 111 → yoga 8 (Shoola); Moon in Pushya pada 3.
        let p = panchanga(10.0, 101.0, Vaar::Somvaar);
        assert_eq!(p.weekday, "Monday");
        assert_eq!(p.tithi_number, 8);
        assert_eq!(p.tithi_name, "Ashtami");
        assert_eq!(p.paksha, Paksha::Shukla);
        assert_eq!(p.yoga, "Shoola");
        assert_eq!(p.karana, MOVABLE_KARANAS[(15 - 1) % 7]);
        assert_eq!(p.nakshatra, "Pushya");
        assert_eq!(p.pada, 3);
    }
}
