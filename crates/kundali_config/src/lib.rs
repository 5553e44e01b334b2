//! TOML and environment configuration for the kundali tools.

pub mod config;
pub mod error;

pub use config::{
    CONFIG_PATH_VAR, ChartSection, ConfigBuilder, EphemerisSection, GeocodeSection, KundaliConfig,
};
pub use error::ConfigError;
