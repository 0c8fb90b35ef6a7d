//! In-memory [`HttpGet`] double keyed by exact URL.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;

use super::{HttpGet, HttpResponse, TransportError};

#[derive(Debug, Clone)]
enum Canned {
    Response(HttpResponse),
    Failure(String),
}

/// Unknown URLs answer 404 with an empty body. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct StubHttp {
    routes: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .insert(url.into(), Canned::Response(HttpResponse::new(status, body)));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Canned::Failure(reason.into()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl HttpGet for StubHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        match self.routes.get(url) {
            Some(Canned::Response(res)) => Ok(res.clone()),
            Some(Canned::Failure(reason)) => {
                Err(TransportError::new(url, std::io::Error::other(reason.clone())))
            }
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}
