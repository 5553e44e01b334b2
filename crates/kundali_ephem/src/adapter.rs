//! Uniform async front for either provider convention.

use std::future::Future;
use std::sync::Arc;

use kundali_vedic_base::Body;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::config::{EphemerisConfig, primary_available, scan_ephe_files};
use crate::engine::{CalcFlags, EngineKind, engine_try_order, provider_body_code};
use crate::error::EphemError;
use crate::provider::{
    Completion, HouseReply, LongitudeReply, Provider, ayanamsa_from_reply, houses_from_reply,
    longitude_from_reply,
};

/// Ephemeris adapter.
///
/// Holds the shared configuration and the ephemeris file listing taken at
/// construction. Every call is bounded by `config.timeout`.
#[derive(Debug, Clone)]
pub struct EphemerisAdapter {
    provider: Provider,
    config: Arc<EphemerisConfig>,
    ephe_files: Vec<String>,
}

impl EphemerisAdapter {
    /// Create an adapter, scanning the ephemeris directory once.
    pub fn new(provider: Provider, config: Arc<EphemerisConfig>) -> Result<Self, EphemError> {
        config.validate()?;
        let ephe_files = scan_ephe_files(&config.ephe_path);
        tracing::debug!(
            path = %config.ephe_path.display(),
            files = ephe_files.len(),
            primary = primary_available(&ephe_files),
            "ephemeris adapter ready"
        );
        Ok(Self {
            provider,
            config,
            ephe_files,
        })
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// File names found in the ephemeris directory.
    pub fn ephe_files(&self) -> &[String] {
        &self.ephe_files
    }

    pub fn primary_available(&self) -> bool {
        primary_available(&self.ephe_files)
    }

    /// Engine try order for this adapter's data files.
    pub fn engine_order(&self, forced: Option<EngineKind>) -> Vec<EngineKind> {
        engine_try_order(forced, self.primary_available())
    }

    pub fn version(&self) -> String {
        self.provider.version()
    }

    /// Longitude of a queried body.
    pub async fn compute_longitude(
        &self,
        jd_ut: f64,
        body: Body,
        flags: CalcFlags,
    ) -> Result<LongitudeReply, EphemError> {
        let ipl = provider_body_code(body).ok_or(EphemError::UnsupportedBody(body))?;
        let reply = match &self.provider {
            Provider::Direct(p) => self.bounded(p.calc_ut(jd_ut, ipl, flags)).await?,
            Provider::Callback(p) => self.bridge(|done| p.calc_ut(jd_ut, ipl, flags, done)).await?,
        };
        longitude_from_reply(&reply)
    }

    /// Tropical houses and ascendant for a location and house system letter.
    pub async fn compute_houses(
        &self,
        jd_ut: f64,
        lat: f64,
        lon: f64,
        hsys: char,
    ) -> Result<HouseReply, EphemError> {
        let reply = match &self.provider {
            Provider::Direct(p) => self.bounded(p.houses(jd_ut, lat, lon, hsys)).await?,
            Provider::Callback(p) => self.bridge(|done| p.houses(jd_ut, lat, lon, hsys, done)).await?,
        };
        houses_from_reply(&reply)
    }

    /// Ayanamsa in degrees for the configured sidereal mode.
    pub async fn ayanamsa(&self, jd_ut: f64, engine: EngineKind) -> Result<f64, EphemError> {
        let flags = engine.flag() | CalcFlags::SIDEREAL;
        let reply = match &self.provider {
            Provider::Direct(p) => self.bounded(p.ayanamsa_ut(jd_ut, flags)).await?,
            Provider::Callback(p) => self.bridge(|done| p.ayanamsa_ut(jd_ut, flags, done)).await?,
        };
        ayanamsa_from_reply(&reply)
    }

    async fn bounded<F>(&self, fut: F) -> Result<Value, EphemError>
    where
        F: Future<Output = Result<Value, EphemError>>,
    {
        tokio::time::timeout(self.config.timeout, fut)
            .await
            .map_err(|_| EphemError::Timeout(self.config.timeout))?
    }

    /// Run a callback-style call and wait for its completion.
    async fn bridge<F>(&self, start: F) -> Result<Value, EphemError>
    where
        F: FnOnce(Completion),
    {
        let (tx, rx) = oneshot::channel();
        start(Box::new(move |reply| {
            // The receiver is gone only if the wait already timed out.
            let _ = tx.send(reply);
        }));
        match tokio::time::timeout(self.config.timeout, rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(EphemError::CompletionDropped),
            Err(_) => Err(EphemError::Timeout(self.config.timeout)),
        }
    }
}
