//! Static client credentials for the token endpoint

use serde::Serialize;

/// Client id/secret pair posted to the token endpoint as
/// `{"clientId": ..., "secret": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), secret: secret.into() }
    }
}
