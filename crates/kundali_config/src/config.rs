//! Layered configuration.
//!
//! Precedence, highest first:
//! 1. Builder overrides (CLI flags)
//! 2. `KUNDALI_*` environment variables
//! 3. Config file (`--config`, `KUNDALI_CONFIG_PATH`, `./kundali.toml` or
//!    `~/.config/kundali/config.toml`)
//! 4. Built-in defaults
//!
//! ```toml
//! [ephemeris]
//! path = "./ephe"
//! swetest = "swetest"
//! timeout_secs = 10
//! sidereal_mode = "lahiri"
//!
//! [geocode]
//! primary_url = "https://nominatim.openstreetmap.org/search"
//! fallback_url = "https://geocode.maps.co/search"
//! user_agent = "kundali/0.1.0"
//! timeout_secs = 10
//! limit = 5
//!
//! [chart]
//! house_system = "P"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use kundali_ephem::{EphemerisConfig, SiderealMode};
use kundali_geo::{DEFAULT_FALLBACK_URL, DEFAULT_PRIMARY_URL, DEFAULT_USER_AGENT, GeocodeConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_PATH_VAR: &str = "KUNDALI_CONFIG_PATH";
pub const EPHE_PATH_VAR: &str = "KUNDALI_EPHE_PATH";
pub const SWETEST_VAR: &str = "KUNDALI_SWETEST";
pub const EPHEMERIS_TIMEOUT_VAR: &str = "KUNDALI_EPHEMERIS_TIMEOUT_SECS";
pub const SIDEREAL_MODE_VAR: &str = "KUNDALI_SIDEREAL_MODE";
pub const GEOCODE_PRIMARY_URL_VAR: &str = "KUNDALI_GEOCODE_PRIMARY_URL";
pub const GEOCODE_FALLBACK_URL_VAR: &str = "KUNDALI_GEOCODE_FALLBACK_URL";
pub const GEOCODE_USER_AGENT_VAR: &str = "KUNDALI_GEOCODE_USER_AGENT";
pub const GEOCODE_TIMEOUT_VAR: &str = "KUNDALI_GEOCODE_TIMEOUT_SECS";
pub const GEOCODE_LIMIT_VAR: &str = "KUNDALI_GEOCODE_LIMIT";
pub const HOUSE_SYSTEM_VAR: &str = "KUNDALI_HOUSE_SYSTEM";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KundaliConfig {
    pub ephemeris: EphemerisSection,
    pub geocode: GeocodeSection,
    pub chart: ChartSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisSection {
    /// Directory with Swiss ephemeris data files.
    pub path: PathBuf,
    /// `swetest` executable.
    pub swetest: PathBuf,
    pub timeout_secs: u64,
    pub sidereal_mode: SiderealMode,
}

impl Default for EphemerisSection {
    fn default() -> Self {
        let d = EphemerisConfig::default();
        Self {
            path: d.ephe_path,
            swetest: d.swetest_bin,
            timeout_secs: d.timeout.as_secs(),
            sidereal_mode: d.sidereal_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeSection {
    pub primary_url: String,
    pub fallback_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub limit: usize,
}

impl Default for GeocodeSection {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    /// Default house system letter.
    pub house_system: String,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            house_system: "P".to_string(),
        }
    }
}

impl KundaliConfig {
    /// Load with the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn ephemeris_config(&self) -> EphemerisConfig {
        EphemerisConfig {
            ephe_path: self.ephemeris.path.clone(),
            sidereal_mode: self.ephemeris.sidereal_mode,
            swetest_bin: self.ephemeris.swetest.clone(),
            timeout: Duration::from_secs(self.ephemeris.timeout_secs),
        }
    }

    pub fn geocode_config(&self) -> GeocodeConfig {
        GeocodeConfig {
            primary_url: self.geocode.primary_url.clone(),
            fallback_url: self.geocode.fallback_url.clone(),
            user_agent: self.geocode.user_agent.clone(),
            timeout: Duration::from_secs(self.geocode.timeout_secs),
            limit: self.geocode.limit,
        }
    }

    /// Configured house system as a single uppercase letter.
    pub fn house_system(&self) -> char {
        self.chart
            .house_system
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('P')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ephemeris_config().validate()?;
        self.geocode_config().validate()?;
        let hsys = self.chart.house_system.trim();
        if hsys.chars().count() != 1 || !hsys.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid("house_system must be a single letter"));
        }
        Ok(())
    }
}

/// Builder applying file, environment and explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    ephe_path: Option<PathBuf>,
    swetest: Option<PathBuf>,
    ephemeris_timeout_secs: Option<u64>,
    geocode_timeout_secs: Option<u64>,
    house_system: Option<String>,
}

impl ConfigBuilder {
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn ephe_path(mut self, path: Option<PathBuf>) -> Self {
        self.ephe_path = path;
        self
    }

    pub fn swetest(mut self, bin: Option<PathBuf>) -> Self {
        self.swetest = bin;
        self
    }

    pub fn ephemeris_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.ephemeris_timeout_secs = secs;
        self
    }

    pub fn geocode_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.geocode_timeout_secs = secs;
        self
    }

    pub fn house_system(mut self, hsys: Option<String>) -> Self {
        self.house_system = hsys;
        self
    }

    /// Build against the process environment.
    pub fn build(self) -> Result<KundaliConfig, ConfigError> {
        self.build_with_env(|var| std::env::var(var).ok())
    }

    /// Build with an explicit environment lookup.
    pub fn build_with_env<F>(self, env: F) -> Result<KundaliConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.locate_file(&env)? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                KundaliConfig::from_file(&path)?
            }
            None => KundaliConfig::default(),
        };
        apply_env(&mut config, &env)?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn locate_file<F>(&self, env: &F) -> Result<Option<PathBuf>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = self
            .config_path
            .clone()
            .or_else(|| env(CONFIG_PATH_VAR).map(PathBuf::from));
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Some(path));
        }

        let local = PathBuf::from("kundali.toml");
        if local.is_file() {
            return Ok(Some(local));
        }
        let user = env("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("kundali")
                .join("config.toml")
        });
        Ok(user.filter(|p| p.is_file()))
    }

    fn apply_overrides(&self, config: &mut KundaliConfig) {
        if let Some(path) = &self.ephe_path {
            config.ephemeris.path = path.clone();
        }
        if let Some(bin) = &self.swetest {
            config.ephemeris.swetest = bin.clone();
        }
        if let Some(secs) = self.ephemeris_timeout_secs {
            config.ephemeris.timeout_secs = secs;
        }
        if let Some(secs) = self.geocode_timeout_secs {
            config.geocode.timeout_secs = secs;
        }
        if let Some(hsys) = &self.house_system {
            config.chart.house_system = hsys.clone();
        }
    }
}

fn parsed<T, F>(env: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}

fn apply_env<F>(config: &mut KundaliConfig, env: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env(EPHE_PATH_VAR) {
        config.ephemeris.path = PathBuf::from(path);
    }
    if let Some(bin) = env(SWETEST_VAR) {
        config.ephemeris.swetest = PathBuf::from(bin);
    }
    if let Some(secs) = parsed(env, EPHEMERIS_TIMEOUT_VAR)? {
        config.ephemeris.timeout_secs = secs;
    }
    if let Some(mode) = parsed::<SiderealMode, _>(env, SIDEREAL_MODE_VAR)? {
        config.ephemeris.sidereal_mode = mode;
    }
    if let Some(url) = env(GEOCODE_PRIMARY_URL_VAR) {
        config.geocode.primary_url = url;
    }
    if let Some(url) = env(GEOCODE_FALLBACK_URL_VAR) {
        config.geocode.fallback_url = url;
    }
    if let Some(agent) = env(GEOCODE_USER_AGENT_VAR) {
        config.geocode.user_agent = agent;
    }
    if let Some(secs) = parsed(env, GEOCODE_TIMEOUT_VAR)? {
        config.geocode.timeout_secs = secs;
    }
    if let Some(limit) = parsed(env, GEOCODE_LIMIT_VAR)? {
        config.geocode.limit = limit;
    }
    if let Some(hsys) = env(HOUSE_SYSTEM_VAR) {
        config.chart.house_system = hsys;
    }
    Ok(())
}
