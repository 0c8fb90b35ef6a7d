use std::sync::Arc;

use crate::{
    error::LookupError,
    http::{HttpGet, truncate_body},
    model::LocationRecord,
};

use super::trim_base_url;

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(http: Arc<dyn HttpGet>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: Arc<dyn HttpGet>, base_url: impl Into<String>) -> Self {
        Self { http, base_url: trim_base_url(base_url) }
    }

    pub fn lookup_url(&self, cep: &str) -> String {
        format!("{}/ws/{cep}/json/", self.base_url)
    }

    /// Resolve a normalized (digits only) CEP to its address.
    ///
    /// The HTTP status is not inspected: ViaCEP reports unknown codes through
    /// the `erro` flag of a 200 body, which surfaces as [`LookupError::NotFound`].
    pub async fn get_info(&self, cep: &str) -> Result<LocationRecord, LookupError> {
        let url = self.lookup_url(cep);
        tracing::debug!(%url, "querying ViaCEP");

        let res = self.http.get(&url).await?;

        let record: LocationRecord = serde_json::from_str(&res.body).map_err(|source| {
            tracing::warn!(
                status = res.status,
                body = truncate_body(&res.body),
                "ViaCEP returned an undecodable body"
            );
            LookupError::Decode { context: "ViaCEP response", source }
        })?;

        if record.erro {
            return Err(LookupError::NotFound { cep: cep.to_string() });
        }

        Ok(record)
    }
}
