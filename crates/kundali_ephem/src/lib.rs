//! Ephemeris adapter for sidereal chart computation.
//!
//! Body positions, houses and the ayanamsa come from an external Swiss
//! ephemeris provider. This crate hides the provider's calling convention
//! and reply shapes behind [`EphemerisAdapter`], and owns the engine
//! selection policy (file-backed SWIEPH with MOSEPH fallback).

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod swetest;

pub use adapter::EphemerisAdapter;
pub use config::{
    EphemerisConfig, SiderealMode, is_primary_data_file, primary_available, scan_ephe_files,
};
pub use engine::{CalcFlags, EngineKind, engine_try_order, provider_body_code};
pub use error::EphemError;
pub use provider::{
    CallbackEphemeris, Completion, DirectEphemeris, HouseReply, LongitudeReply, Provider,
    ayanamsa_from_reply, houses_from_reply, longitude_from_reply, serr_from_reply,
};
pub use swetest::SwetestProvider;
