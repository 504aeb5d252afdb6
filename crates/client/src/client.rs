//! Client facade: wallet + transport + request dispatch

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, Wallet};
use crate::errors::{ClientError, Result};
use crate::http::{ApiResponse, HttpClient};
use crate::request::{ApiRequest, Target};

/// Connection settings for one API instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL scheme, `http` or `https`.
    pub protocol: String,
    pub host: String,
    pub port: u16,
    /// Tenant/application scoping segment of the resource path.
    pub property: String,
    pub client_id: String,
    pub secret: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        property: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
            property: property.into(),
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.protocol.is_empty() {
            return Err(ClientError::Config("protocol must not be empty".into()));
        }
        if self.host.is_empty() {
            return Err(ClientError::Config("host must not be empty".into()));
        }
        if self.property.is_empty() {
            return Err(ClientError::Config("property namespace must not be empty".into()));
        }
        Ok(())
    }

    fn token_url(&self) -> Result<Url> {
        let raw = format!("{}://{}:{}/token", self.protocol, self.host, self.port);
        Url::parse(&raw)
            .map_err(|err| ClientError::Config(format!("invalid token URL {raw:?}: {err}")))
    }
}

/// Handle to one API instance.
///
/// Owns the credential wallet and the shared transport; safe to share across
/// tasks behind an `Arc`.
pub struct Client {
    target: Target,
    wallet: Wallet,
    http: HttpClient,
}

impl Client {
    /// Create a client for the given connection settings.
    ///
    /// # Errors
    /// Returns a configuration error for invalid settings or a transport
    /// that cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::new()?;
        let wallet = Wallet::new(
            config.token_url()?,
            Credentials::new(config.client_id.clone(), config.secret.clone()),
            http.clone(),
        );
        let target = Target {
            protocol: config.protocol,
            host: config.host,
            port: config.port,
            property: config.property,
        };

        Ok(Self { target, wallet, http })
    }

    /// Current bearer token value, renewing if needed.
    pub async fn bearer(&self) -> String {
        self.wallet.token().await
    }

    /// Materialize and execute a request, returning the raw response.
    pub async fn execute<R: ApiRequest>(&self, request: &mut R) -> Result<ApiResponse> {
        let bearer = self.wallet.token().await;
        request.initialize(&self.target, &bearer)?;

        debug!(url = %request.url().map(Url::as_str).unwrap_or_default(), "dispatching API request");
        request.execute(&self.http).await
    }

    /// Execute a request and decode the response body into `T`.
    ///
    /// The decoded value is `None` for bodyless responses (304). A decode
    /// failure carries the raw bytes already received.
    pub async fn execute_as<T, R>(&self, request: &mut R) -> Result<(Option<T>, ApiResponse)>
    where
        T: DeserializeOwned,
        R: ApiRequest,
    {
        let response = self.execute(request).await?;

        match &response.body {
            Some(bytes) => {
                let decoded = serde_json::from_slice(bytes)
                    .map_err(|source| ClientError::Decode { source, body: bytes.clone() })?;
                Ok((Some(decoded), response))
            }
            None => Ok((None, response)),
        }
    }
}
