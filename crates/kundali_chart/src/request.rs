//! Chart request and its validation.

use kundali_ephem::EngineKind;
use kundali_time::BirthMoment;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ChartError;

pub const DEFAULT_HOUSE_SYSTEM: char = 'P';

/// Raw chart input. Every field is optional so that absence is reported
/// as a validation failure rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
    #[serde(default, alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub house_system: Option<String>,
    pub force_engine: Option<String>,
}

/// Accepts a number or a numeric string. Unparseable strings become NaN
/// so range validation rejects them.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// A request that passed validation, with its birth instant resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub birth: BirthMoment,
    /// Timezone as supplied.
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: char,
    pub force_engine: Option<EngineKind>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// First character of the house system, uppercased. Blank means Placidus.
pub fn house_system_letter(raw: Option<&str>) -> char {
    raw.and_then(|s| s.trim().chars().next())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or(DEFAULT_HOUSE_SYSTEM)
}

impl ChartRequest {
    /// Validate and resolve the birth instant. Makes no external call.
    pub fn validate(&self) -> Result<ValidatedRequest, ChartError> {
        let missing = || ChartError::Validation("Missing required fields.".to_string());
        let date = present(&self.date).ok_or_else(missing)?;
        let time = present(&self.time).ok_or_else(missing)?;
        let timezone = present(&self.timezone).ok_or_else(missing)?;
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(missing());
        };

        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(ChartError::Validation(
                "Invalid latitude/longitude.".to_string(),
            ));
        }

        let house_system = house_system_letter(self.house_system.as_deref());
        if !house_system.is_ascii_alphabetic() {
            return Err(ChartError::Validation(format!(
                "Invalid house system '{house_system}'."
            )));
        }

        let force_engine = match present(&self.force_engine) {
            None => None,
            Some(raw) => Some(raw.parse::<EngineKind>().map_err(|_| {
                ChartError::Validation(format!(
                    "Unknown engine '{raw}'; expected SWIEPH or MOSEPH."
                ))
            })?),
        };

        let birth = BirthMoment::resolve(date, time, timezone)?;
        Ok(ValidatedRequest {
            birth,
            timezone: timezone.to_string(),
            latitude,
            longitude,
            house_system,
            force_engine,
        })
    }
}
