//! Sunrise and sunset.
//!
//! Uses the NOAA low-precision solar model (Meeus, "Astronomical
//! Algorithms", ch. 25): apparent solar declination and the equation of
//! time at a given instant. Events are found from the hour angle at which
//! the Sun's centre reaches −0.833° (refraction plus semidiameter), then
//! refined by re-evaluating the model at the event estimate.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use kundali_time::{J2000_JD, calendar_to_jd, utc_from_jd};
use serde::{Deserialize, Serialize};

use crate::error::SolarError;

/// Altitude of the Sun's centre at apparent rise/set, degrees.
pub const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Refinement passes for each event.
const MAX_ITERATIONS: usize = 4;

/// Convergence threshold in minutes.
const CONVERGENCE_MIN: f64 = 0.01;

/// Sunrise and sunset on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// Solar-times capability.
///
/// `date` is the local calendar date at the observer.
#[async_trait]
pub trait SolarTimes: Send + Sync {
    async fn sun_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<SunTimes, SolarError>;
}

/// Built-in solar-times implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaSolarTimes;

#[async_trait]
impl SolarTimes for NoaaSolarTimes {
    async fn sun_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<SunTimes, SolarError> {
        compute_sun_times(date, latitude, longitude)
    }
}

/// Apparent solar declination (degrees) and equation of time (minutes).
fn solar_position(jd: f64) -> (f64, f64) {
    let t = (jd - J2000_JD) / 36525.0;

    let l0 = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0);
    let m = 357.52911 + t * (35999.05029 - t * 0.0001537);
    let e = 0.016708634 - t * (0.000042037 + t * 0.0000001267);
    let m_rad = m.to_radians();

    let center = m_rad.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m_rad).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m_rad).sin() * 0.000289;
    let omega = (125.04 - 1934.136 * t).to_radians();
    let lambda = (l0 + center - 0.00569 - 0.00478 * omega.sin()).to_radians();

    let eps0 = 23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let eps = (eps0 + 0.00256 * omega.cos()).to_radians();

    let decl = (eps.sin() * lambda.sin()).asin().to_degrees();

    let y = (eps / 2.0).tan().powi(2);
    let l0r = l0.to_radians();
    let eq_time = y * (2.0 * l0r).sin() - 2.0 * e * m_rad.sin()
        + 4.0 * e * y * m_rad.sin() * (2.0 * l0r).cos()
        - 0.5 * y * y * (4.0 * l0r).sin()
        - 1.25 * e * e * (2.0 * m_rad).sin();

    (decl, 4.0 * eq_time.to_degrees())
}

/// Hour angle (degrees, positive) at which the Sun reaches `altitude_deg`.
fn hour_angle_deg(latitude: f64, decl: f64, altitude_deg: f64) -> Result<f64, SolarError> {
    let phi = latitude.to_radians();
    let d = decl.to_radians();
    let cos_h = (altitude_deg.to_radians().sin() - phi.sin() * d.sin()) / (phi.cos() * d.cos());
    if cos_h > 1.0 {
        return Err(SolarError::NeverRises);
    }
    if cos_h < -1.0 {
        return Err(SolarError::NeverSets);
    }
    Ok(cos_h.acos().to_degrees())
}

/// Event time in minutes after 0h UT of the date.
fn event_minutes(
    jd0: f64,
    latitude: f64,
    longitude: f64,
    rising: bool,
) -> Result<f64, SolarError> {
    let sign = if rising { -1.0 } else { 1.0 };
    // Start from local apparent noon.
    let mut minutes = 720.0 - 4.0 * longitude;
    for _ in 0..MAX_ITERATIONS {
        let (decl, eq_time) = solar_position(jd0 + minutes / 1440.0);
        let ha = hour_angle_deg(latitude, decl, SUNRISE_ALTITUDE_DEG)?;
        let next = 720.0 - 4.0 * (longitude - sign * ha) - eq_time;
        let delta = (next - minutes).abs();
        minutes = next;
        if delta < CONVERGENCE_MIN {
            break;
        }
    }
    Ok(minutes)
}

/// Sunrise and sunset for a date and location.
///
/// Polar day or night yields [`SolarError::NeverSets`] or
/// [`SolarError::NeverRises`].
pub fn compute_sun_times(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
) -> Result<SunTimes, SolarError> {
    if !(latitude.is_finite() && longitude.is_finite())
        || latitude.abs() > 90.0
        || longitude.abs() > 180.0
    {
        return Err(SolarError::InvalidLocation);
    }
    let jd0 = calendar_to_jd(date.year(), date.month(), date.day() as f64);

    let rise = event_minutes(jd0, latitude, longitude, true)?;
    let set = event_minutes(jd0, latitude, longitude, false)?;
    let to_utc = |minutes: f64| utc_from_jd(jd0 + minutes / 1440.0).ok_or(SolarError::OutOfRange);
    Ok(SunTimes {
        sunrise: to_utc(rise)?,
        sunset: to_utc(set)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn minutes_of_day(t: DateTime<Utc>) -> i64 {
        (t.hour() * 60 + t.minute()) as i64
    }

    #[test]
    fn equator_equinox_twelve_hours() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let st = compute_sun_times(d, 0.0, 0.0).unwrap();
        let rise = minutes_of_day(st.sunrise);
        let set = minutes_of_day(st.sunset);
        // ~06:04 and ~18:11 UTC
        assert!((rise - 364).abs() <= 4, "sunrise {}", st.sunrise);
        assert!((set - 1091).abs() <= 4, "sunset {}", st.sunset);
        assert!(set - rise > 720 && set - rise < 735);
    }

    #[test]
    fn london_midsummer() {
        // 03:43 and 20:21 UTC
        let d = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let st = compute_sun_times(d, 51.5074, -0.1278).unwrap();
        assert!((minutes_of_day(st.sunrise) - 223).abs() <= 3, "{}", st.sunrise);
        assert!((minutes_of_day(st.sunset) - 1221).abs() <= 3, "{}", st.sunset);
    }

    #[test]
    fn polar_day_and_night() {
        let june = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let dec = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        assert_eq!(compute_sun_times(june, 80.0, 0.0), Err(SolarError::NeverSets));
        assert_eq!(compute_sun_times(dec, 80.0, 0.0), Err(SolarError::NeverRises));
    }

    #[test]
    fn invalid_location() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(compute_sun_times(d, 91.0, 0.0), Err(SolarError::InvalidLocation));
        assert_eq!(compute_sun_times(d, f64::NAN, 0.0), Err(SolarError::InvalidLocation));
    }

    #[test]
    fn equation_of_time_extremes() {
        // Early November: sundial fast by ~16.4 min; mid-February: slow by ~14.2 min.
        let (_, nov) = solar_position(calendar_to_jd(2024, 11, 3.5));
        let (_, feb) = solar_position(calendar_to_jd(2024, 2, 11.5));
        assert!((nov - 16.4).abs() < 0.5, "{nov}");
        assert!((feb + 14.2).abs() < 0.5, "{feb}");
    }

    #[tokio::test]
    async fn trait_object_usable() {
        let solar: &dyn SolarTimes = &NoaaSolarTimes;
        let d = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!(solar.sun_times(d, 13.08, 80.27).await.is_ok());
    }
}
