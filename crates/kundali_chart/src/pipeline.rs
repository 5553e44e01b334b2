//! D1 positions: body longitudes under one engine, then sidereal houses.

use std::collections::BTreeMap;

use kundali_ephem::{CalcFlags, EngineKind, EphemError, EphemerisAdapter};
use kundali_vedic_base::{Body, ChartFrame, QUERIED_BODIES, ketu_from_rahu, normalize_360};

use crate::error::{ChartError, EphemerisFailure, HouseFailure};

/// Sidereal D1 frame and the engine that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct D1Positions {
    pub engine: EngineKind,
    pub ayanamsa: f64,
    pub frame: ChartFrame,
}

/// All queried bodies under a single engine, stopping at the first failure.
async fn body_set(
    adapter: &EphemerisAdapter,
    jd_ut: f64,
    engine: EngineKind,
) -> Result<BTreeMap<Body, f64>, (Body, EphemError)> {
    let flags = CalcFlags::body_query(engine);
    let mut positions = BTreeMap::new();
    for body in QUERIED_BODIES {
        let reply = adapter
            .compute_longitude(jd_ut, body, flags)
            .await
            .map_err(|e| (body, e))?;
        tracing::debug!(%body, %engine, longitude = reply.longitude, "body computed");
        positions.insert(body, normalize_360(reply.longitude));
    }
    if let Some(&rahu) = positions.get(&Body::Rahu) {
        positions.insert(Body::Ketu, ketu_from_rahu(rahu));
    }
    Ok(positions)
}

/// Sidereal longitudes of all 12 bodies.
///
/// Engines are tried in the adapter's order. A failure on any body retries
/// the full set with the next engine, so the result never mixes engines.
pub async fn compute_positions(
    adapter: &EphemerisAdapter,
    jd_ut: f64,
    forced: Option<EngineKind>,
) -> Result<(EngineKind, BTreeMap<Body, f64>), ChartError> {
    let order = adapter.engine_order(forced);
    let mut last_failure = None;
    for (attempt, &engine) in order.iter().enumerate() {
        tracing::debug!(%engine, attempt, jd_ut, "computing body set");
        match body_set(adapter, jd_ut, engine).await {
            Ok(positions) => {
                if attempt > 0 {
                    tracing::warn!(%engine, "body set computed with fallback engine");
                }
                return Ok((engine, positions));
            }
            Err((body, err)) => {
                tracing::warn!(%engine, %body, error = %err, "engine failed");
                last_failure = Some((body, err));
            }
        }
    }

    let (body, detail) = match last_failure {
        Some((body, err)) => (body, err.to_string()),
        None => (Body::Sun, "no engine available".to_string()),
    };
    Err(ChartError::Ephemeris(Box::new(EphemerisFailure {
        body,
        engines: order,
        detail,
        ephe_path: adapter.config().ephe_path.clone(),
        ephe_files: adapter.ephe_files().to_vec(),
        version: adapter.version(),
        jd_ut,
    })))
}

/// Sidereal ascendant and cusps: tropical houses minus the ayanamsa.
///
/// Cusp 0 stays 0.
pub async fn compute_sidereal_houses(
    adapter: &EphemerisAdapter,
    jd_ut: f64,
    latitude: f64,
    longitude: f64,
    house_system: char,
    engine: EngineKind,
) -> Result<(f64, [f64; 13], f64), ChartError> {
    let failure = |err: EphemError| {
        let keys = match &err {
            EphemError::UnexpectedHouseShape { keys } => keys.clone(),
            _ => Vec::new(),
        };
        ChartError::Houses(Box::new(HouseFailure {
            keys,
            detail: err.to_string(),
            ephe_path: adapter.config().ephe_path.clone(),
            ephe_files: adapter.ephe_files().to_vec(),
            jd_ut,
        }))
    };

    let houses = adapter
        .compute_houses(jd_ut, latitude, longitude, house_system)
        .await
        .map_err(failure)?;
    let ayanamsa = adapter.ayanamsa(jd_ut, engine).await.map_err(failure)?;

    let ascendant = normalize_360(houses.ascendant - ayanamsa);
    let mut cusps = [0.0; 13];
    for (i, c) in houses.cusps.iter().enumerate().skip(1) {
        cusps[i] = normalize_360(c - ayanamsa);
    }
    Ok((ascendant, cusps, ayanamsa))
}

/// Bodies, then houses, assembled into the D1 frame.
pub async fn compute_d1(
    adapter: &EphemerisAdapter,
    jd_ut: f64,
    latitude: f64,
    longitude: f64,
    house_system: char,
    forced: Option<EngineKind>,
) -> Result<D1Positions, ChartError> {
    let (engine, positions) = compute_positions(adapter, jd_ut, forced).await?;
    let (ascendant, cusps, ayanamsa) =
        compute_sidereal_houses(adapter, jd_ut, latitude, longitude, house_system, engine).await?;
    let frame = ChartFrame::new(ascendant, cusps, positions)?;
    Ok(D1Positions {
        engine,
        ayanamsa,
        frame,
    })
}
