//! CEP → address → current weather → three-unit temperature.

use thiserror::Error;

use crate::{
    cep::{Cep, InvalidCep},
    error::LookupError,
    model::TemperatureResult,
    provider::{ViaCepClient, WeatherApiClient},
};

/// Why a request did not produce a temperature. Each variant maps to exactly
/// one public status code and message; the wrapped cause stays server-side.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidZipcode(#[from] InvalidCep),

    #[error("location lookup failed: {0}")]
    ZipcodeNotFound(#[source] LookupError),

    #[error("weather lookup failed: {0}")]
    Weather(#[source] LookupError),
}

impl PipelineError {
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::InvalidZipcode(_) => 422,
            PipelineError::ZipcodeNotFound(_) => 404,
            PipelineError::Weather(_) => 500,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            PipelineError::InvalidZipcode(_) => "invalid zipcode",
            PipelineError::ZipcodeNotFound(_) => "can not find zipcode",
            PipelineError::Weather(_) => "error getting weather information",
        }
    }
}

/// Runs the whole lookup for one raw, possibly formatted, CEP.
///
/// Validation happens before any network call.
pub async fn resolve(
    raw_cep: &str,
    location: &ViaCepClient,
    weather: &WeatherApiClient,
) -> Result<TemperatureResult, PipelineError> {
    let cep = Cep::parse(raw_cep)?;

    let address = location
        .get_info(cep.as_str())
        .await
        .map_err(PipelineError::ZipcodeNotFound)?;

    let reading = weather
        .get_temperature(address.city(), address.state())
        .await
        .map_err(PipelineError::Weather)?;

    tracing::debug!(
        cep = %cep.formatted(),
        city = address.city(),
        state = address.state(),
        temp_c = reading.temp_c(),
        observed_at = ?reading.observed_at(),
        "resolved temperature"
    );

    Ok(TemperatureResult::from_celsius(reading.temp_c()))
}
