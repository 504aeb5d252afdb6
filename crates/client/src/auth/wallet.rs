//! Credential wallet with lazy token renewal
//!
//! Owns the one cached bearer token of a client instance. Callers pull a
//! token before every request; the wallet renews it against the token
//! endpoint only when the cache is empty or the token is inside its renewal
//! margin. Renewal failures are swallowed: the previous cached value (even a
//! stale one) stays in place and the server rejects the subsequent call.

use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::bearer::{Bearer, TokenResponse};
use super::credentials::Credentials;
use crate::errors::{ClientError, Result};
use crate::http::{HttpClient, HttpRequest};

/// Lazy-refreshing bearer token cache.
///
/// The cache sits behind one async lock held across the whole
/// check-renew-store sequence, so concurrent callers racing past an expired
/// token serialize on a single renewal instead of each hitting the token
/// endpoint.
pub struct Wallet {
    credentials: Credentials,
    token_url: Url,
    http: HttpClient,
    bearer: Mutex<Option<Bearer>>,
}

impl Wallet {
    #[must_use]
    pub fn new(token_url: Url, credentials: Credentials, http: HttpClient) -> Self {
        Self { credentials, token_url, http, bearer: Mutex::new(None) }
    }

    /// Return a valid bearer token value, renewing first if the cached token
    /// is absent or inside the renewal margin.
    ///
    /// Always yields a string: empty only if no renewal has ever succeeded.
    pub async fn token(&self) -> String {
        let mut cached = self.bearer.lock().await;

        if cached.as_ref().map_or(true, Bearer::is_expired) {
            match self.renew().await {
                Ok(bearer) => {
                    info!("renewed bearer token");
                    *cached = Some(bearer);
                }
                // Keep whatever is cached; the next API call surfaces the
                // authorization failure.
                Err(err) => warn!(error = %err, "bearer token renewal failed"),
            }
        }

        cached.as_ref().map(|bearer| bearer.value.clone()).unwrap_or_default()
    }

    /// Whether a token (fresh or stale) is currently cached.
    pub async fn has_token(&self) -> bool {
        self.bearer.lock().await.is_some()
    }

    async fn renew(&self) -> Result<Bearer> {
        debug!(url = %self.token_url, "requesting bearer token");

        let body = serde_json::to_vec(&self.credentials)
            .map_err(|err| ClientError::Request(format!("credential encoding failed: {err}")))?;

        let mut request = HttpRequest::new(Method::POST, self.token_url.clone());
        request.set_header("Content-Type", "application/json")?;
        request.set_body(body);

        let response = self.http.execute(request).await?;
        let bytes = response.body.unwrap_or_default();
        let decoded: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|source| ClientError::Decode { source, body: bytes })?;

        Ok(Bearer::from(decoded))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn wallet_for(server: &MockServer) -> Wallet {
        let token_url = Url::parse(&format!("{}/token", server.uri())).unwrap();
        Wallet::new(token_url, Credentials::new("client", "secret"), HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn renews_on_first_use_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_json(serde_json::json!({"clientId": "client", "secret": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"accessToken": "abc", "expiresIn": 120}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let wallet = wallet_for(&server);
        assert_eq!(wallet.token().await, "abc");
        // Second call must hit the cache, not the endpoint.
        assert_eq!(wallet.token().await, "abc");
    }

    #[tokio::test]
    async fn token_inside_margin_triggers_renewal() {
        let server = MockServer::start().await;
        // 30s lifetime sits inside the 60s renewal margin, so every call
        // renews.
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"accessToken": "short", "expiresIn": 30}),
            ))
            .expect(2)
            .mount(&server)
            .await;

        let wallet = wallet_for(&server);
        assert_eq!(wallet.token().await, "short");
        assert_eq!(wallet.token().await, "short");
    }

    #[tokio::test]
    async fn failed_renewal_returns_empty_without_prior_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let wallet = wallet_for(&server);
        assert_eq!(wallet.token().await, "");
        assert!(!wallet.has_token().await);
    }

    #[tokio::test]
    async fn failed_renewal_keeps_stale_token() {
        let server = MockServer::start().await;
        // First renewal succeeds with an already-margin-expired token, the
        // second fails; the stale value must survive.
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"accessToken": "stale", "expiresIn": 10}),
            ))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let wallet = wallet_for(&server);
        assert_eq!(wallet.token().await, "stale");
        assert_eq!(wallet.token().await, "stale");
    }

    #[tokio::test]
    async fn undecodable_token_response_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let wallet = wallet_for(&server);
        assert_eq!(wallet.token().await, "");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_renewal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"accessToken": "abc", "expiresIn": 120}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let wallet = std::sync::Arc::new(wallet_for(&server));
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let wallet = wallet.clone();
                tokio::spawn(async move { wallet.token().await })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), "abc");
        }
    }
}
