//! Error types used throughout the client

use thiserror::Error;

/// Main error type for docgate-client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request construction error: {0}")]
    Request(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with code {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Response decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw body bytes already received from the server.
        body: Vec<u8>,
    },
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
