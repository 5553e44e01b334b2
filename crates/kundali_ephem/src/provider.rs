//! Provider seam and reply normalization.
//!
//! A provider answers three questions (body longitude, houses, ayanamsa)
//! with loosely shaped JSON replies. It follows one of two conventions:
//! - [`DirectEphemeris`]: async calls that return the reply;
//! - [`CallbackEphemeris`]: calls that hand the reply to a completion.
//!
//! The normalizers below turn either convention's replies into typed values.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::CalcFlags;
use crate::error::EphemError;

/// Completion handed to a callback provider. Must be called at most once.
pub type Completion = Box<dyn FnOnce(Value) + Send + 'static>;

/// Provider whose calls return their reply.
#[async_trait]
pub trait DirectEphemeris: Send + Sync {
    /// Body position at a UT Julian day. `ipl` is the Swiss ephemeris body code.
    async fn calc_ut(&self, jd_ut: f64, ipl: i32, flags: CalcFlags) -> Result<Value, EphemError>;

    /// Tropical house cusps and angles.
    async fn houses(&self, jd_ut: f64, lat: f64, lon: f64, hsys: char)
    -> Result<Value, EphemError>;

    /// Ayanamsa in degrees at a UT Julian day.
    async fn ayanamsa_ut(&self, jd_ut: f64, flags: CalcFlags) -> Result<Value, EphemError>;

    fn version(&self) -> String {
        "n/a".to_string()
    }
}

/// Provider that reports through a completion closure.
pub trait CallbackEphemeris: Send + Sync {
    fn calc_ut(&self, jd_ut: f64, ipl: i32, flags: CalcFlags, done: Completion);

    fn houses(&self, jd_ut: f64, lat: f64, lon: f64, hsys: char, done: Completion);

    fn ayanamsa_ut(&self, jd_ut: f64, flags: CalcFlags, done: Completion);

    fn version(&self) -> String {
        "n/a".to_string()
    }
}

/// A provider in either convention.
#[derive(Clone)]
pub enum Provider {
    Direct(Arc<dyn DirectEphemeris>),
    Callback(Arc<dyn CallbackEphemeris>),
}

impl Provider {
    pub fn direct(p: impl DirectEphemeris + 'static) -> Self {
        Self::Direct(Arc::new(p))
    }

    pub fn callback(p: impl CallbackEphemeris + 'static) -> Self {
        Self::Callback(Arc::new(p))
    }

    pub fn version(&self) -> String {
        match self {
            Self::Direct(p) => p.version(),
            Self::Callback(p) => p.version(),
        }
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Provider::Direct"),
            Self::Callback(_) => f.write_str("Provider::Callback"),
        }
    }
}

/// Normalized body reply.
#[derive(Debug, Clone, PartialEq)]
pub struct LongitudeReply {
    pub longitude: f64,
    /// Daily motion in longitude, when the reply carries it.
    pub speed: Option<f64>,
    /// Provider warning text that accompanied a usable reply.
    pub serr: Option<String>,
}

/// Normalized house reply. Cusps are tropical; index 0 is a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseReply {
    pub cusps: [f64; 13],
    pub ascendant: f64,
}

fn finite(v: &Value) -> Option<f64> {
    v.as_f64().filter(|x| x.is_finite())
}

/// Provider error text (`serr`), if non-empty.
pub fn serr_from_reply(reply: &Value) -> Option<String> {
    reply
        .get("serr")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Longitude from `xx[0]`, else `longitude`.
pub fn longitude_from_reply(reply: &Value) -> Result<LongitudeReply, EphemError> {
    let xx = reply.get("xx").and_then(Value::as_array);
    let longitude = xx
        .and_then(|a| a.first())
        .and_then(finite)
        .or_else(|| reply.get("longitude").and_then(finite));
    let serr = serr_from_reply(reply);
    let Some(longitude) = longitude else {
        return Err(EphemError::NoLongitude { serr });
    };
    let speed = xx
        .and_then(|a| a.get(3))
        .and_then(finite)
        .or_else(|| reply.get("longitudeSpeed").and_then(finite));
    Ok(LongitudeReply {
        longitude,
        speed,
        serr,
    })
}

const CUSP_KEYS: [&str; 4] = ["cusp", "cusps", "house", "houses"];

fn reply_keys(reply: &Value) -> Vec<String> {
    reply
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default()
}

/// Cusps and ascendant from a house reply.
///
/// Cusps come from the first present of `cusp`, `cusps`, `house`, `houses`.
/// A 12-element array gets a leading 0; otherwise the first 13 values are
/// used. The ascendant is `ascmc[0]`, else `ascendant`, else `asc`.
pub fn houses_from_reply(reply: &Value) -> Result<HouseReply, EphemError> {
    let shape_err = || EphemError::UnexpectedHouseShape {
        keys: reply_keys(reply),
    };

    let raw = CUSP_KEYS
        .iter()
        .find_map(|k| reply.get(*k).and_then(Value::as_array))
        .ok_or_else(shape_err)?;
    let ascendant = match reply.get("ascmc").and_then(Value::as_array) {
        Some(ascmc) => ascmc.first().and_then(finite),
        None => reply
            .get("ascendant")
            .and_then(finite)
            .or_else(|| reply.get("asc").and_then(finite)),
    }
    .ok_or_else(shape_err)?;

    let values: Vec<f64> = raw.iter().map(finite).collect::<Option<_>>().ok_or_else(shape_err)?;
    let mut cusps = [0.0; 13];
    if values.len() == 12 {
        cusps[1..].copy_from_slice(&values);
    } else if values.len() >= 13 {
        cusps.copy_from_slice(&values[..13]);
    } else {
        return Err(shape_err());
    }
    Ok(HouseReply { cusps, ascendant })
}

/// Ayanamsa from a bare number, `ayanamsa`, or `xx[0]`.
pub fn ayanamsa_from_reply(reply: &Value) -> Result<f64, EphemError> {
    finite(reply)
        .or_else(|| reply.get("ayanamsa").and_then(finite))
        .or_else(|| {
            reply
                .get("xx")
                .and_then(Value::as_array)
                .and_then(|a| a.first())
                .and_then(finite)
        })
        .ok_or(EphemError::NoAyanamsa)
}
