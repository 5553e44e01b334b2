//! Startup configuration for the ephemeris adapter.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::EphemError;

/// Swiss ephemeris data files: `*.se1`, `*.se2`, ..., or `*.se`/`*.sef`.
static PRIMARY_DATA_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.se\d$|\.sef?$").expect("static pattern"));

/// Sidereal reference system passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiderealMode {
    #[default]
    Lahiri,
}

impl SiderealMode {
    /// Swiss ephemeris `SE_SIDM_*` code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Lahiri => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
        }
    }
}

impl FromStr for SiderealMode {
    type Err = EphemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lahiri" | "chitrapaksha" => Ok(Self::Lahiri),
            _ => Err(EphemError::InvalidConfig("unknown sidereal mode")),
        }
    }
}

/// Ephemeris configuration built once at startup and shared via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemerisConfig {
    /// Directory holding Swiss ephemeris data files.
    pub ephe_path: PathBuf,
    pub sidereal_mode: SiderealMode,
    /// `swetest` executable used by the process provider.
    pub swetest_bin: PathBuf,
    /// Bound on a single provider call.
    pub timeout: Duration,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            ephe_path: PathBuf::from("./ephe"),
            sidereal_mode: SiderealMode::Lahiri,
            swetest_bin: PathBuf::from("swetest"),
            timeout: Duration::from_secs(10),
        }
    }
}

impl EphemerisConfig {
    pub fn validate(&self) -> Result<(), EphemError> {
        if self.ephe_path.as_os_str().is_empty() {
            return Err(EphemError::InvalidConfig("ephe_path must not be empty"));
        }
        if self.swetest_bin.as_os_str().is_empty() {
            return Err(EphemError::InvalidConfig("swetest_bin must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(EphemError::InvalidConfig("timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Whether a file name looks like a Swiss ephemeris data file.
pub fn is_primary_data_file(name: &str) -> bool {
    PRIMARY_DATA_FILE.is_match(name)
}

/// File names in the ephemeris directory, sorted.
///
/// A missing or unreadable directory yields an empty list.
pub fn scan_ephe_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "ephemeris directory not readable");
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

/// The primary engine is usable iff at least one data file is present.
pub fn primary_available(files: &[String]) -> bool {
    files.iter().any(|f| is_primary_data_file(f))
}
