//! Error types for Vedic chart calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::body::Body;

/// Errors from Vedic base calculations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VedicError {
    /// A longitude was NaN or infinite.
    NonFiniteLongitude(String),
    /// A chart frame has no position for the body.
    MissingBody(Body),
}

impl Display for VedicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteLongitude(what) => write!(f, "non-finite longitude: {what}"),
            Self::MissingBody(b) => write!(f, "no position for {b}"),
        }
    }
}

impl Error for VedicError {}
