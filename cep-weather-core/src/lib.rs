//! Core library for the `cep-weather` service.
//!
//! This crate defines:
//! - CEP validation and normalization
//! - Celsius to Fahrenheit/Kelvin conversion
//! - ViaCEP and WeatherAPI.com clients over an injectable HTTP seam
//! - The pipeline that turns a CEP into a three-unit temperature
//! - Startup configuration
//!
//! It is used by the `cep-weather` binary, but carries no HTTP server of its own.

pub mod cep;
pub mod config;
pub mod convert;
pub mod error;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use cep::{Cep, InvalidCep};
pub use config::{Config, ConfigError};
pub use error::LookupError;
pub use http::{HttpGet, HttpResponse, ReqwestHttp, TransportError};
pub use model::{ErrorResult, LocationRecord, TemperatureResult, WeatherRecord};
pub use pipeline::{PipelineError, resolve};
pub use provider::{ViaCepClient, WeatherApiClient};
