//! Greenwich and local sidereal time in hours.
//!
//! GMST = ERA + polynomial(T), taking UT as a stand-in for UT1 (|UT1−UTC| < 0.9 s).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::TAU;
use std::fmt::{Display, Formatter};

use crate::julian::J2000_JD;

/// Earth Rotation Angle in degrees, [0, 360).
pub fn earth_rotation_angle_deg(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let turns = 0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du;
    (turns.rem_euclid(1.0) * TAU).to_degrees()
}

/// Greenwich Mean Sidereal Time in hours, [0, 24).
pub fn gmst_hours(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    let gmst_deg = earth_rotation_angle_deg(jd_ut) + poly_arcsec / 3600.0;
    normalize_24(gmst_deg / 15.0)
}

/// Local Sidereal Time in hours: GMST + east longitude / 15, in [0, 24).
pub fn local_sidereal_time_hours(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    normalize_24(gmst_hours(jd_ut) + longitude_east_deg / 15.0)
}

/// Reduce an hour value to [0, 24).
pub fn normalize_24(hours: f64) -> f64 {
    let r = hours % 24.0;
    if r < 0.0 { r + 24.0 } else { r }
}

/// Hours, minutes, whole seconds of a time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// Split fractional hours into H:M:S with rounding carry.
///
/// Seconds are rounded; 60 s carries into minutes, 60 min into hours,
/// and hours wrap modulo 24.
pub fn hours_to_hms(hours: f64) -> Hms {
    let hours = normalize_24(hours);
    let mut h = hours.floor() as u32;
    let m_float = (hours - h as f64) * 60.0;
    let mut m = m_float.floor() as u32;
    let mut s = ((m_float - m as f64) * 60.0).round() as u32;
    if s >= 60 {
        s = 0;
        m += 1;
    }
    if m >= 60 {
        m = 0;
        h += 1;
    }
    Hms {
        hours: (h % 24) as u8,
        minutes: m as u8,
        seconds: s as u8,
    }
}

impl Display for Hms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
