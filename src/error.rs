// src/error.rs
// Error types shared by the transport and the gateway

use serde_json::Value;
use thiserror::Error;

/// The request never produced an HTTP response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server could not be reached at all
    #[error("connection failed: {0}")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server responded with status {status}")]
    Status { status: u16, data: Value },
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("no player id configured")]
    MissingPlayer,
}

impl GatewayError {
    /// HTTP status of the failed response, if the server answered at all
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_failures() {
        let gone = GatewayError::Status { status: 410, data: Value::Null };
        assert_eq!(gone.status(), Some(410));
        assert_eq!(gone.to_string(), "server responded with status 410");

        let offline = GatewayError::from(TransportError::Connection("refused".to_string()));
        assert_eq!(offline.status(), None);
        assert_eq!(offline.to_string(), "connection failed: refused");
    }
}
