//! Errors from geocoding and solar-times lookups.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeocodeError {
    #[error("missing place")]
    EmptyQuery,

    #[error("invalid geocode config: {0}")]
    InvalidConfig(&'static str),

    #[error("geocode timeout after {0:?}")]
    Timeout(Duration),

    /// The primary service answered with a non-success status.
    #[error("{service} HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("geocode request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl GeocodeError {
    /// Map a transport error, separating timeouts.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Request(e)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SolarError {
    #[error("latitude/longitude out of range")]
    InvalidLocation,

    #[error("sun never rises on this date")]
    NeverRises,

    #[error("sun never sets on this date")]
    NeverSets,

    #[error("solar event outside representable time range")]
    OutOfRange,

    #[error("solar times timed out")]
    Timeout,
}
