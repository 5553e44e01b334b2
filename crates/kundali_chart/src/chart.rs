//! End-to-end chart computation.

use chrono::{Datelike, NaiveDate};
use kundali_ephem::EphemerisAdapter;
use kundali_geo::{GeocodeHit, Geocoder, SolarTimes, SunTimes};
use kundali_time::{BirthMoment, hours_to_hms, local_sidereal_time_hours};
use kundali_vedic_base::{
    Body, Vaar, chart_aspects, nakshatra_table, navamsa_frame, panchanga, vimshottari_mahadashas,
};

use crate::error::ChartError;
use crate::pipeline::compute_d1;
use crate::report::{ChartReport, DashaEntry, ZoneReport, iso_local};
use crate::request::ChartRequest;

/// Compute a chart.
///
/// Validation runs before any ephemeris call. Solar times are optional;
/// a failure or timeout there leaves sunrise and sunset empty.
pub async fn compute_chart(
    adapter: &EphemerisAdapter,
    solar: Option<&dyn SolarTimes>,
    request: &ChartRequest,
) -> Result<ChartReport, ChartError> {
    let req = request.validate()?;
    let birth = &req.birth;
    let jd_ut = birth.jd_ut;

    let d1 = compute_d1(
        adapter,
        jd_ut,
        req.latitude,
        req.longitude,
        req.house_system,
        req.force_engine,
    )
    .await?;
    let d9 = navamsa_frame(&d1.frame)?;

    let sun = d1.frame.position(Body::Sun)?;
    let moon = d1.frame.position(Body::Moon)?;

    let lst_hours = local_sidereal_time_hours(jd_ut, req.longitude);
    let hms = hours_to_hms(lst_hours);

    let dasha = dasha_entries(birth, moon)?;
    let vaar = Vaar::from_days_from_sunday(birth.local.weekday().num_days_from_sunday());

    let (sunrise, sunset) = match solar {
        Some(s) => {
            let date = birth.local.date_naive();
            match sun_times(s, date, req.latitude, req.longitude, adapter).await {
                Some(t) => (
                    Some(iso_local(&t.sunrise.with_timezone(&birth.zone))),
                    Some(iso_local(&t.sunset.with_timezone(&birth.zone))),
                ),
                None => (None, None),
            }
        }
        None => (None, None),
    };

    let report = ChartReport {
        engine: d1.engine,
        jd_ut,
        lst_hours,
        lst_hms: format!("{:02}:{:02}:{:02}", hms.hours, hms.minutes, hms.seconds),
        timezone: zone_report(&req.timezone, birth),
        latitude: req.latitude,
        longitude: req.longitude,
        house_system: req.house_system.to_string(),
        ayanamsa: d1.ayanamsa,
        nakshatras: nakshatra_table(&d1.frame)?,
        aspects: chart_aspects(&d1.frame)?,
        panchanga: panchanga(sun, moon, vaar),
        d1: d1.frame,
        d9,
        sunrise,
        sunset,
        dasha,
    };
    tracing::info!(
        engine = %report.engine,
        jd_ut,
        house_system = %req.house_system,
        "chart computed"
    );
    Ok(report)
}

fn zone_report(requested: &str, birth: &BirthMoment) -> ZoneReport {
    ZoneReport {
        requested: requested.to_string(),
        resolved: birth.zone.name().to_string(),
        corrected: birth.corrected_zone.clone(),
        local_time: iso_local(&birth.local),
        utc_time: iso_local(&birth.utc),
    }
}

/// Mahadashas with bounds expressed in the birth zone.
fn dasha_entries(birth: &BirthMoment, moon: f64) -> Result<Vec<DashaEntry>, ChartError> {
    vimshottari_mahadashas(birth.jd_ut, moon)
        .iter()
        .map(|p| -> Result<DashaEntry, ChartError> {
            let start = birth.after_days(p.start_jd - birth.jd_ut)?;
            let end = birth.after_days(p.end_jd - birth.jd_ut)?;
            Ok(DashaEntry {
                lord: p.lord,
                start: iso_local(&start),
                end: iso_local(&end),
                years: p.duration_years(),
            })
        })
        .collect()
}

/// Solar times bounded by the ephemeris timeout. Failures become `None`.
async fn sun_times(
    solar: &dyn SolarTimes,
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    adapter: &EphemerisAdapter,
) -> Option<SunTimes> {
    let limit = adapter.config().timeout;
    match tokio::time::timeout(limit, solar.sun_times(date, latitude, longitude)).await {
        Ok(Ok(t)) => Some(t),
        Ok(Err(e)) => {
            tracing::warn!(%date, latitude, error = %e, "no sunrise/sunset");
            None
        }
        Err(_) => {
            tracing::warn!(%date, ?limit, "solar times timed out");
            None
        }
    }
}

/// Place search with failures mapped to chart error kinds.
pub async fn search_place(geocoder: &Geocoder, query: &str) -> Result<Vec<GeocodeHit>, ChartError> {
    Ok(geocoder.search(query).await?)
}
