//! Navamsa (D9) harmonic transform.
//!
//! Each 30 deg sign is split into 9 segments of 3 deg 20'. The segment
//! index counts forward from a starting sign fixed by the modality of the
//! source sign:
//! - movable (Mesha, Karka, Tula, Makara): the sign itself
//! - fixed (Vrishabha, Simha, Vrischika, Kumbha): 9th from it (s + 8)
//! - dual (Mithuna, Kanya, Dhanu, Meena): 5th from it (s + 4)
//!
//! The position inside the segment is stretched ×9 onto the target sign.
//!
//! The D9 house frame is whole-sign, anchored at the D9 ascendant's sign.
//! It is not obtained by transforming the D1 cusps.

use std::collections::BTreeMap;

use crate::error::VedicError;
use crate::frame::ChartFrame;
use crate::rashi::{Modality, Rashi};
use crate::util::normalize_360;

/// Width of one navamsa segment: 30/9 = 3.3333... degrees.
pub const NAVAMSA_SEGMENT: f64 = 30.0 / 9.0;

/// Sign index where the navamsa count starts for a D1 sign.
pub const fn navamsa_start_sign(rashi: Rashi) -> u8 {
    let s = rashi.index();
    match rashi.modality() {
        Modality::Movable => s,
        Modality::Fixed => (s + 8) % 12,
        Modality::Dual => (s + 4) % 12,
    }
}

/// Map a D1 sidereal longitude to its D9 longitude in [0, 360).
pub fn navamsa_longitude(sidereal_lon_deg: f64) -> f64 {
    let lon = normalize_360(sidereal_lon_deg);
    let s = ((lon / 30.0).floor() as u8).min(11);
    let offset = lon - s as f64 * 30.0;
    let n = ((offset / NAVAMSA_SEGMENT).floor() as u8).min(8);

    let start = navamsa_start_sign(Rashi::from_index(s));
    let sign = (start + n) % 12;
    let within = ((offset - n as f64 * NAVAMSA_SEGMENT) * 9.0).max(0.0);
    normalize_360(sign as f64 * 30.0 + within)
}

/// Whole-sign cusps anchored at the ascendant's sign.
///
/// cusp[i] = (ascSign·30 + (i−1)·30) mod 360 for i = 1..=12; cusp[0] = 0.
pub fn whole_sign_cusps(ascendant_deg: f64) -> [f64; 13] {
    let asc_sign = (normalize_360(ascendant_deg) / 30.0).floor().min(11.0);
    let mut cusps = [0.0; 13];
    for (i, cusp) in cusps.iter_mut().enumerate().skip(1) {
        *cusp = (asc_sign * 30.0 + (i as f64 - 1.0) * 30.0) % 360.0;
    }
    cusps
}

/// Derive the D9 frame from a D1 frame.
pub fn navamsa_frame(d1: &ChartFrame) -> Result<ChartFrame, VedicError> {
    let ascendant = navamsa_longitude(d1.ascendant);
    let positions: BTreeMap<_, _> = d1
        .positions
        .iter()
        .map(|(&body, &lon)| (body, navamsa_longitude(lon)))
        .collect();
    ChartFrame::new(ascendant, whole_sign_cusps(ascendant), positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    #[test]
    fn movable_sign_starts_at_itself() {
        // Mesha 5 deg: segment 1 → Vrishabha, 15 deg
        assert!((navamsa_longitude(5.0) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_sign_starts_ninth() {
        // Vrishabha 15.5 deg: segment 4, start Makara → Vrishabha 19.5
        assert!((navamsa_longitude(45.5) - 49.5).abs() < 1e-9);
    }

    #[test]
    fn dual_sign_starts_fifth() {
        // Mithuna 0 deg → Tula 0
        assert!((navamsa_longitude(60.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn karka_maps_to_itself() {
        assert!((navamsa_longitude(90.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn start_signs_all_twelve() {
        let expected = [0, 9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3];
        for (i, &start) in expected.iter().enumerate() {
            let d9 = navamsa_longitude(i as f64 * 30.0);
            assert!(
                (d9 - start as f64 * 30.0).abs() < 1e-9,
                "sign {i}: got {d9}, want start {start}"
            );
        }
    }

    #[test]
    fn output_range() {
        let mut lon = -720.0;
        while lon < 720.0 {
            let d9 = navamsa_longitude(lon);
            assert!((0.0..360.0).contains(&d9), "{lon} -> {d9}");
            lon += 0.37;
        }
        assert!((0.0..360.0).contains(&navamsa_longitude(359.999_999_999)));
    }

    #[test]
    fn whole_sign_frame() {
        let cusps = whole_sign_cusps(200.0);
        assert_eq!(cusps[0], 0.0);
        assert_eq!(cusps[1], 180.0);
        assert_eq!(cusps[6], 330.0);
        assert_eq!(cusps[7], 0.0);
        assert_eq!(cusps[12], 150.0);
    }

    #[test]
    fn frame_transforms_bodies_and_ascendant() {
        let positions = BTreeMap::from([(Body::Sun, 5.0), (Body::Moon, 45.5)]);
        let d1 = ChartFrame::new(60.0, [0.0; 13], positions).unwrap();
        let d9 = navamsa_frame(&d1).unwrap();
        assert!((d9.ascendant - 180.0).abs() < 1e-9);
        assert_eq!(d9.cusps[1], 180.0);
        assert!((d9.position(Body::Sun).unwrap() - 45.0).abs() < 1e-9);
        assert!((d9.position(Body::Moon).unwrap() - 49.5).abs() < 1e-9);
    }
}
