use thiserror::Error;

use crate::http::TransportError;

/// Failure of a single upstream lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("CEP {cep} not found")]
    NotFound { cep: String },

    #[error("unexpected HTTP status {status} from {service}")]
    Upstream { status: u16, service: &'static str },
}
