//! Chart failures with stable kind codes.

use std::path::PathBuf;
use std::time::Duration;

use kundali_ephem::EngineKind;
use kundali_geo::GeocodeError;
use kundali_time::TimeError;
use kundali_vedic_base::{Body, VedicError};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Context for an exhausted engine list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EphemerisFailure {
    /// First body that failed under the last engine.
    pub body: Body,
    /// Engines tried, in order.
    pub engines: Vec<EngineKind>,
    /// Provider detail for `body`.
    pub detail: String,
    pub ephe_path: PathBuf,
    pub ephe_files: Vec<String>,
    pub version: String,
    pub jd_ut: f64,
}

impl EphemerisFailure {
    pub fn last_engine(&self) -> Option<EngineKind> {
        self.engines.last().copied()
    }
}

/// Context for a house computation that could not be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseFailure {
    /// Top-level keys of the provider reply, when its shape was the problem.
    pub keys: Vec<String>,
    pub detail: String,
    pub ephe_path: PathBuf,
    pub ephe_files: Vec<String>,
    pub jd_ut: f64,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("computation failed for {}", .0.body)]
    Ephemeris(Box<EphemerisFailure>),

    #[error("computation failed (houses): {}", .0.detail)]
    Houses(Box<HouseFailure>),

    #[error("geocoding timed out after {0:?}")]
    GeocodeTimeout(Duration),

    #[error("geocoding failed")]
    Geocode(#[source] GeocodeError),

    #[error("chart assembly failed: {0}")]
    Internal(#[from] VedicError),
}

impl From<GeocodeError> for ChartError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::Timeout(d) => Self::GeocodeTimeout(d),
            other => Self::Geocode(other),
        }
    }
}

impl ChartError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Time(TimeError::UnparseableDateTime { .. }) => "unparseable_datetime",
            Self::Time(_) => "validation_error",
            Self::Ephemeris(_) => "ephemeris_failure",
            Self::Houses(_) => "house_computation_failed",
            Self::GeocodeTimeout(_) => "geocode_timeout",
            Self::Geocode(_) => "geocode_failure",
            Self::Internal(_) => "internal_error",
        }
    }

    /// HTTP-style status for the kind.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Time(_) => 400,
            Self::Ephemeris(_) | Self::Houses(_) | Self::Internal(_) => 500,
            Self::GeocodeTimeout(_) | Self::Geocode(_) => 502,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let details = match self {
            Self::Ephemeris(f) => json!({
                "body": f.body,
                "engineTried": f.last_engine(),
                "engines": f.engines,
                "serr": f.detail,
                "ephePath": f.ephe_path,
                "epheFiles": f.ephe_files,
                "version": f.version,
                "jd_ut": f.jd_ut,
            }),
            Self::Houses(f) => json!({
                "hRawKeys": f.keys,
                "detail": f.detail,
                "ephePath": f.ephe_path,
                "epheFiles": f.ephe_files,
                "jd_ut": f.jd_ut,
            }),
            Self::Geocode(e) => json!({ "detail": e.to_string() }),
            _ => Value::Null,
        };
        ErrorBody {
            kind: self.kind(),
            status: self.status(),
            error: self.to_string(),
            details,
        }
    }
}

/// Serializable failure payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_statuses() {
        let v = ChartError::Validation("Missing required fields.".into());
        assert_eq!((v.kind(), v.status()), ("validation_error", 400));

        let t = ChartError::from(TimeError::UnparseableDateTime {
            date: "x".into(),
            time: "y".into(),
        });
        assert_eq!((t.kind(), t.status()), ("unparseable_datetime", 400));

        let z = ChartError::from(TimeError::UnknownTimezone("Mars/Base".into()));
        assert_eq!(z.kind(), "validation_error");

        let g = ChartError::from(GeocodeError::Timeout(Duration::from_secs(3)));
        assert_eq!((g.kind(), g.status()), ("geocode_timeout", 502));
        let g = ChartError::from(GeocodeError::EmptyQuery);
        assert_eq!(g.kind(), "geocode_failure");
    }

    #[test]
    fn ephemeris_details_serialized() {
        let e = ChartError::Ephemeris(Box::new(EphemerisFailure {
            body: Body::Moon,
            engines: vec![EngineKind::Swieph, EngineKind::Moseph],
            detail: "boom".into(),
            ephe_path: PathBuf::from("/ephe"),
            ephe_files: vec!["semo_18.se1".into()],
            version: "fake".into(),
            jd_ut: 2_447_907.0,
        }));
        assert_eq!(e.to_string(), "computation failed for Moon");
        let body = serde_json::to_value(e.body()).unwrap();
        assert_eq!(body["kind"], "ephemeris_failure");
        assert_eq!(body["status"], 500);
        assert_eq!(body["details"]["engineTried"], "MOSEPH");
        assert_eq!(body["details"]["serr"], "boom");
        assert_eq!(body["details"]["epheFiles"][0], "semo_18.se1");
    }

    #[test]
    fn validation_has_no_details() {
        let body = serde_json::to_value(ChartError::Validation("bad".into()).body()).unwrap();
        assert!(body.get("details").is_none());
        assert_eq!(body["error"], "bad");
    }
}
