use std::{env::VarError, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    http::{HttpGet, ReqwestHttp},
    provider::{ViaCepClient, WeatherApiClient, viacep, weatherapi},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

fn env_var(key: &str) -> Result<String, VarError> {
    std::env::var(key)
}

/// Process-wide settings, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub weather_api_key: String,
    pub port: u16,
    pub http_timeout: Duration,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub viacep_base_url: String,
    pub weatherapi_base_url: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read the process environment without touching `.env` files.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build from an arbitrary variable lookup, so parsing can be tested
    /// without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let or_default = |var: &str, default: &str| -> String {
            lookup(var).unwrap_or_else(|_| default.to_string())
        };

        let weather_api_key = lookup("WEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("WEATHER_API_KEY".to_string()))?;

        let port = or_default("PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar { var: "PORT".to_string(), reason: e.to_string() })?;

        let timeout_secs = or_default("HTTP_TIMEOUT_SECS", "10").parse::<u64>().map_err(|e| {
            ConfigError::InvalidEnvVar { var: "HTTP_TIMEOUT_SECS".to_string(), reason: e.to_string() }
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "HTTP_TIMEOUT_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            weather_api_key,
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            log_level: or_default("LOG_LEVEL", "info"),
            viacep_base_url: or_default("VIACEP_BASE_URL", viacep::DEFAULT_BASE_URL),
            weatherapi_base_url: or_default("WEATHERAPI_BASE_URL", weatherapi::DEFAULT_BASE_URL),
        })
    }

    /// Both lookup clients sharing one reqwest-backed transport.
    pub fn clients(&self) -> Result<(ViaCepClient, WeatherApiClient), ConfigError> {
        let http: Arc<dyn HttpGet> = Arc::new(ReqwestHttp::new(self.http_timeout)?);
        Ok(self.clients_with(http))
    }

    /// Both lookup clients over the given transport.
    pub fn clients_with(&self, http: Arc<dyn HttpGet>) -> (ViaCepClient, WeatherApiClient) {
        let location = ViaCepClient::with_base_url(Arc::clone(&http), self.viacep_base_url.as_str());
        let weather = WeatherApiClient::with_base_url(
            http,
            self.weather_api_key.clone(),
            self.weatherapi_base_url.as_str(),
        );
        (location, weather)
    }
}
