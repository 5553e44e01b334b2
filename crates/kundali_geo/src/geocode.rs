//! Place-name lookup over HTTP.
//!
//! Nominatim is queried first. Only when it returns no usable place is the
//! geocode.maps.co fallback asked. A fallback that answers with an error
//! status yields an empty result rather than a failure.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeocodeError;

pub const DEFAULT_PRIMARY_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_FALLBACK_URL: &str = "https://geocode.maps.co/search";
pub const DEFAULT_USER_AGENT: &str = concat!("kundali/", env!("CARGO_PKG_VERSION"));

/// Geocoding service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeConfig {
    pub primary_url: String,
    pub fallback_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout: Duration,
    /// Maximum number of hits returned.
    pub limit: usize,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            limit: 5,
        }
    }
}

impl GeocodeConfig {
    pub fn validate(&self) -> Result<(), GeocodeError> {
        if self.primary_url.trim().is_empty() {
            return Err(GeocodeError::InvalidConfig("primary_url must not be empty"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(GeocodeError::InvalidConfig("user_agent must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(GeocodeError::InvalidConfig("timeout must be greater than zero"));
        }
        if self.limit == 0 {
            return Err(GeocodeError::InvalidConfig("limit must be greater than zero"));
        }
        Ok(())
    }
}

/// One candidate place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// OSM class, e.g. `place` or `boundary`.
    pub category: Option<String>,
    /// OSM type, e.g. `city`.
    pub kind: Option<String>,
}

fn coordinate(v: Option<&Value>) -> Option<f64> {
    let x = match v? {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        other => other.as_f64()?,
    };
    x.is_finite().then_some(x)
}

fn text(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Convert one raw search result. Entries without finite coordinates are dropped.
fn hit_from_place(place: &Value) -> Option<GeocodeHit> {
    let latitude = coordinate(place.get("lat"))?;
    let longitude = coordinate(place.get("lon"))?;
    let label = text(place.get("display_name"))
        .or_else(|| text(place.get("name")))
        .unwrap_or_else(|| format!("{latitude}, {longitude}"));
    Some(GeocodeHit {
        label,
        latitude,
        longitude,
        category: text(place.get("class")),
        kind: text(place.get("type")),
    })
}

fn hits_from_body(body: &Value, limit: usize) -> Vec<GeocodeHit> {
    body.as_array()
        .map(|places| {
            places
                .iter()
                .take(limit)
                .filter_map(hit_from_place)
                .collect()
        })
        .unwrap_or_default()
}

/// HTTP geocoder.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    config: GeocodeConfig,
}

impl Geocoder {
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        config.validate()?;
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| GeocodeError::InvalidConfig("user_agent is not a valid header value"))?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(GeocodeError::Request)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeocodeConfig {
        &self.config
    }

    /// Up to `limit` candidate places for a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let hits = self.search_primary(query).await?;
        if !hits.is_empty() {
            tracing::debug!(query, hits = hits.len(), "geocoded via primary");
            return Ok(hits);
        }
        tracing::debug!(query, "primary geocoder returned nothing, trying fallback");
        self.search_fallback(query).await
    }

    async fn search_primary(&self, query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        let limit = self.config.limit.to_string();
        let resp = self
            .client
            .get(&self.config.primary_url)
            .query(&[
                ("format", "jsonv2"),
                ("q", query),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .header(ACCEPT_LANGUAGE, "en")
            .send()
            .await
            .map_err(|e| GeocodeError::from_reqwest(e, self.config.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                service: "Nominatim",
                status,
            });
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| GeocodeError::from_reqwest(e, self.config.timeout))?;
        Ok(hits_from_body(&body, self.config.limit))
    }

    async fn search_fallback(&self, query: &str) -> Result<Vec<GeocodeHit>, GeocodeError> {
        if self.config.fallback_url.trim().is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .get(&self.config.fallback_url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| GeocodeError::from_reqwest(e, self.config.timeout))?;

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "fallback geocoder failed");
            return Ok(Vec::new());
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| GeocodeError::from_reqwest(e, self.config.timeout))?;
        Ok(hits_from_body(&body, self.config.limit))
    }
}
