use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The third-party API an upstream failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    NewsApi,
    Gemini,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::NewsApi => f.write_str("NewsAPI"),
            Service::Gemini => f.write_str("Gemini"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to fetch data from {service} (status {status}). Check server logs.")]
    Upstream {
        service: Service,
        status: u16,
        details: Value,
    },

    #[error("Received malformed data from {service}.")]
    MalformedUpstreamResponse { service: Service, raw: String },

    #[error("AI response was not in the expected JSON format.")]
    MalformedAiResponse { raw: String },

    #[error("Failed to get a valid response from AI. Response was empty or blocked.")]
    EmptyOrBlockedResponse { block_reason: Option<String> },

    #[error("AI response JSON structure was incorrect: {reason}")]
    InvalidAiResponseShape { reason: String, details: Value },

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Upstream failure carrying the body as JSON when it parses, raw text otherwise.
    pub fn upstream(service: Service, status: u16, body: &str) -> Self {
        let details = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        Error::Upstream {
            service,
            status,
            details,
        }
    }

    /// HTTP status the error is reported with at the handler boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidRequest(_) => 400,
            Error::Upstream { status, .. } => *status,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
