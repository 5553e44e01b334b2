//! Place lookup and solar rise/set times for chart requests.

pub mod error;
pub mod geocode;
pub mod solar;

pub use error::{GeocodeError, SolarError};
pub use geocode::{
    DEFAULT_FALLBACK_URL, DEFAULT_PRIMARY_URL, DEFAULT_USER_AGENT, GeocodeConfig, GeocodeHit,
    Geocoder,
};
pub use solar::{NoaaSolarTimes, SUNRISE_ALTITUDE_DEG, SolarTimes, SunTimes, compute_sun_times};
