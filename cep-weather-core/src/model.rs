use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::convert::{to_fahrenheit, to_kelvin};

/// Address returned by ViaCEP for a postal code.
///
/// ViaCEP answers an unknown code with a 200 and the body `{"erro": true}`, so
/// every field defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub erro: bool,
}

impl LocationRecord {
    /// City name.
    pub fn city(&self) -> &str {
        &self.localidade
    }

    /// Two-letter state abbreviation.
    pub fn state(&self) -> &str {
        &self.uf
    }
}

/// WeatherAPI.com `current.json` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: WeatherLocation,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tz_id: String,
    #[serde(default)]
    pub localtime_epoch: Option<i64>,
    #[serde(default)]
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub last_updated_epoch: Option<i64>,
    #[serde(default)]
    pub last_updated: String,
    pub temp_c: f64,
    #[serde(default)]
    pub temp_f: f64,
    #[serde(default)]
    pub is_day: u8,
    #[serde(default)]
    pub condition: Condition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

impl WeatherRecord {
    pub fn temp_c(&self) -> f64 {
        self.current.temp_c
    }

    /// When the reading was taken, falling back to the location's local time.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.current
            .last_updated_epoch
            .or(self.location.localtime_epoch)
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
    }
}

/// Successful response body: one reading in three units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResult {
    #[serde(rename = "temp_C", serialize_with = "whole_as_integer")]
    pub temp_c: f64,
    #[serde(rename = "temp_F", serialize_with = "whole_as_integer")]
    pub temp_f: f64,
    #[serde(rename = "temp_K", serialize_with = "whole_as_integer")]
    pub temp_k: f64,
}

/// Writes `25.0` as `25` so whole readings render without a fractional part.
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    if value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl TemperatureResult {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: to_fahrenheit(celsius),
            temp_k: to_kelvin(celsius),
        }
    }
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub message: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
