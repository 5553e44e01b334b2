//! Errors raised by ephemeris providers and the adapter.

use std::path::PathBuf;
use std::time::Duration;

use kundali_vedic_base::Body;
use thiserror::Error;

/// Errors from a single provider call or adapter operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EphemError {
    /// The configuration cannot be used.
    #[error("invalid ephemeris config: {0}")]
    InvalidConfig(&'static str),

    /// The reply carried no finite longitude.
    #[error("no longitude returned{}", .serr.as_deref().map(|s| format!(": {s}")).unwrap_or_default())]
    NoLongitude { serr: Option<String> },

    /// The house reply could not be normalized; `keys` are its top-level fields.
    #[error("unexpected houses shape (keys: {})", .keys.join(", "))]
    UnexpectedHouseShape { keys: Vec<String> },

    /// The ayanamsa reply was not a finite number.
    #[error("no ayanamsa returned")]
    NoAyanamsa,

    /// The body has no provider code (Ketu is derived, never queried).
    #[error("body {0} cannot be queried")]
    UnsupportedBody(Body),

    /// The provider reported an error of its own.
    #[error("provider error: {0}")]
    Provider(String),

    /// A callback provider did not complete in time.
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    /// A callback provider dropped its completion without calling it.
    #[error("provider dropped the completion")]
    CompletionDropped,

    /// Spawning or talking to the provider process failed.
    #[error("provider process {bin:?}: {source}")]
    Process {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
