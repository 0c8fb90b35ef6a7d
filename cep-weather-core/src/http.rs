//! The outbound HTTP seam shared by both lookup clients.

use std::{error::Error as StdError, fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

#[cfg(any(test, feature = "test-util"))]
pub mod stub;

/// Status and raw body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a complete response (DNS, connect, TLS, timeout, body read).
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    /// Target URL with credentials redacted.
    pub url: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(url: &str, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { url: redact(url), source: source.into() }
    }
}

/// Issue a single GET and hand back whatever came back.
#[async_trait]
pub trait HttpGet: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpGet`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttp {
    http: Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpGet for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let res = self.http.get(url).send().await.map_err(|e| TransportError::new(url, e))?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| TransportError::new(url, e))?;

        Ok(HttpResponse { status, body })
    }
}

/// Masks the value of a `key=` query parameter so URLs can be logged.
pub fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", _)) => "key=***".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{query}")
}

/// Shortens an upstream body for log lines.
pub(crate) fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_masks_api_key_only() {
        assert_eq!(
            redact("https://api.weatherapi.com/v1/current.json?key=secret&q=Recife,PE,Brazil&aqi=no"),
            "https://api.weatherapi.com/v1/current.json?key=***&q=Recife,PE,Brazil&aqi=no"
        );
    }

    #[test]
    fn redact_leaves_urls_without_query_alone() {
        let url = "https://viacep.com.br/ws/01310100/json/";
        assert_eq!(redact(url), url);
    }

    #[test]
    fn transport_error_hides_key() {
        let err = TransportError::new(
            "http://localhost/v1/current.json?key=secret&q=x",
            std::io::Error::other("connection refused"),
        );
        let msg = err.to_string();
        assert!(msg.contains("key=***"));
        assert!(!msg.contains("secret"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == 'é'));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(400, "").is_success());
    }
}
