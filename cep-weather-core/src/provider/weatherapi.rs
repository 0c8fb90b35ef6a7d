use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
    error::LookupError,
    http::{HttpGet, redact, truncate_body},
    model::WeatherRecord,
};

use super::trim_base_url;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// Bytes that must be escaped inside a query parameter value. Commas stay literal.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>');

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    http: Arc<dyn HttpGet>,
    api_key: String,
    base_url: String,
}

impl WeatherApiClient {
    pub fn new(http: Arc<dyn HttpGet>, api_key: String) -> Self {
        Self::with_base_url(http, api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: Arc<dyn HttpGet>, api_key: String, base_url: impl Into<String>) -> Self {
        Self { http, api_key, base_url: trim_base_url(base_url) }
    }

    /// `current.json` URL for a Brazilian city; accents are removed from `city`.
    pub fn current_url(&self, city: &str, state: &str) -> String {
        let query = format!("{},{state},Brazil", strip_accents(city));

        format!(
            "{}/v1/current.json?key={}&q={}&aqi=no",
            self.base_url,
            utf8_percent_encode(&self.api_key, QUERY_VALUE),
            utf8_percent_encode(&query, QUERY_VALUE),
        )
    }

    pub async fn get_temperature(&self, city: &str, state: &str) -> Result<WeatherRecord, LookupError> {
        let url = self.current_url(city, state);
        tracing::debug!(url = %redact(&url), "querying WeatherAPI current conditions");

        let res = self.http.get(&url).await?;

        if !res.is_success() {
            tracing::warn!(
                status = res.status,
                body = truncate_body(&res.body),
                "WeatherAPI current request failed"
            );
            return Err(LookupError::Upstream { status: res.status, service: "WeatherAPI" });
        }

        serde_json::from_str(&res.body)
            .map_err(|source| LookupError::Decode { context: "WeatherAPI current response", source })
    }
}

/// Drops combining marks after canonical decomposition, so "São Paulo" becomes "Sao Paulo".
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
