//! Divisional chart frame: ascendant, house cusps and body positions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::body::{Body, ChartPoint};
use crate::error::VedicError;
use crate::util::normalize_360;

/// One divisional chart (D1 rasi or D9 navamsa).
///
/// `cusps` has 13 slots; index 0 is always 0.0 and cusps 1..=12 are the
/// houses. All values are sidereal longitudes in [0, 360).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub ascendant: f64,
    pub cusps: [f64; 13],
    pub positions: BTreeMap<Body, f64>,
}

impl ChartFrame {
    /// Build a frame, reducing every angle with `normalize_360`.
    ///
    /// Cusp 0 is forced to 0. Fails on any non-finite value.
    pub fn new(
        ascendant: f64,
        cusps: [f64; 13],
        positions: BTreeMap<Body, f64>,
    ) -> Result<Self, VedicError> {
        if !ascendant.is_finite() {
            return Err(VedicError::NonFiniteLongitude("ascendant".to_string()));
        }
        let mut reduced = [0.0; 13];
        for (i, c) in cusps.iter().enumerate().skip(1) {
            if !c.is_finite() {
                return Err(VedicError::NonFiniteLongitude(format!("cusp {i}")));
            }
            reduced[i] = normalize_360(*c);
        }
        let mut normalized = BTreeMap::new();
        for (body, lon) in positions {
            if !lon.is_finite() {
                return Err(VedicError::NonFiniteLongitude(body.name().to_string()));
            }
            normalized.insert(body, normalize_360(lon));
        }
        Ok(Self {
            ascendant: normalize_360(ascendant),
            cusps: reduced,
            positions: normalized,
        })
    }

    pub fn position(&self, body: Body) -> Result<f64, VedicError> {
        self.positions
            .get(&body)
            .copied()
            .ok_or(VedicError::MissingBody(body))
    }

    /// Longitude of a chart point (ascendant or body).
    pub fn point(&self, point: ChartPoint) -> Result<f64, VedicError> {
        match point {
            ChartPoint::Ascendant => Ok(self.ascendant),
            ChartPoint::Body(b) => self.position(b),
        }
    }
}
