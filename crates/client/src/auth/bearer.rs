//! Bearer token type with expiry tracking

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Seconds before real expiry during which a token is treated as already
/// expired. Absorbs network latency and clock skew between client and server.
pub const RENEWAL_MARGIN_SECONDS: i64 = 60;

/// An opaque bearer credential with an absolute expiration instant.
///
/// Tokens are replaced wholesale on renewal, never mutated in place.
#[derive(Debug, Clone)]
pub struct Bearer {
    /// Opaque token value presented in the `Authorization` header.
    pub value: String,

    /// Absolute expiration timestamp (UTC), calculated from `expiresIn` at
    /// fetch time.
    pub expires_at: DateTime<Utc>,
}

impl Bearer {
    /// Create a bearer expiring `expires_in` seconds from now.
    #[must_use]
    pub fn new(value: String, expires_in: i64) -> Self {
        Self { value, expires_at: Utc::now() + Duration::seconds(expires_in) }
    }

    /// Check whether the token is expired or will expire within the renewal
    /// margin.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(RENEWAL_MARGIN_SECONDS) >= self.expires_at
    }
}

/// Token endpoint response: `{"accessToken": ..., "expiresIn": ...}`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,

    /// Token lifetime in seconds.
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

impl From<TokenResponse> for Bearer {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.expires_in)
    }
}
