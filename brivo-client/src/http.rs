//! HTTP plumbing: authentication, headers and response normalization

use base64::Engine;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::types::AccessToken;
use crate::{BrivoConfig, ClientError, ClientResult, TokenCache};

/// Header carrying the static API key
const API_KEY_HEADER: &str = "api-key";

/// HTTP client for the Brivo API
#[derive(Clone)]
pub struct BrivoClient {
    client: Client,
    config: BrivoConfig,
    tokens: TokenCache,
}

impl std::fmt::Debug for BrivoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrivoClient")
            .field("auth_url", &self.config.auth_url)
            .field("api_url", &self.config.api_url)
            .finish_non_exhaustive()
    }
}

impl BrivoClient {
    /// Create a new client from configuration
    pub fn new(config: BrivoConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        let tokens = TokenCache::new(Duration::from_secs(config.token_refresh_skew));

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &BrivoConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    fn basic_credentials(&self) -> String {
        let raw = format!("{}:{}", self.config.client_id, self.config.client_secret);
        base64::engine::general_purpose::STANDARD.encode(raw)
    }

    /// Request a fresh token with the password grant
    ///
    /// Always hits the token endpoint; use [`Self::bearer_token`] for the
    /// cached path.
    pub async fn authenticate(&self) -> ClientResult<AccessToken> {
        let url = self.config.token_url();
        tracing::info!(method = "POST", url = %url, "Brivo token request");

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.basic_credentials()),
            )
            .header(API_KEY_HEADER, &self.config.api_key)
            .form(&[
                ("grant_type", "password"),
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, "Brivo authentication failed");
            return Err(ClientError::Auth(format!("{status}: {text}")));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Cached bearer token, re-authenticating when missing or near expiry
    pub async fn bearer_token(&self) -> ClientResult<String> {
        let mut slot = self.tokens.lock().await;
        if let Some(token) = slot.valid() {
            return Ok(token);
        }

        let token = self.authenticate().await?;
        slot.store(&token);
        Ok(token.access_token)
    }

    /// Build an authenticated API request
    async fn request(&self, method: Method, path: &str) -> ClientResult<(RequestBuilder, String)> {
        let token = self.bearer_token().await?;
        let url = self.config.api(path);
        let builder = self
            .client
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, format!("bearer {token}"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        Ok((builder, url))
    }

    /// Call an endpoint that answers with a JSON body
    pub(crate) async fn call<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;
        Self::decode(response).await
    }

    /// Call an endpoint whose body is never decoded
    pub(crate) async fn call_no_content<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let (mut request, url) = self.request(method.clone(), path).await?;
        let payload = match body {
            Some(body) => {
                let json = serde_json::to_string(body)?;
                request = request.body(json.clone());
                json
            }
            None => String::new(),
        };

        tracing::info!(method = %method, url = %url, body = %payload, "Brivo API call");
        let response = request.send().await?;
        self.handle_response(response, &url).await
    }

    /// Normalize a response: success passes through, everything else becomes
    /// a [`ClientError`]
    pub(crate) async fn handle_response(&self, response: Response, url: &str) -> ClientResult<Response> {
        let status = response.status();
        tracing::info!(status = %status, url = %url, "Brivo API response");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, url = %url, body = %text, "Brivo API call failed");

        if status == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
            return Err(ClientError::Unauthorized);
        }

        Err(ClientError::Status {
            status,
            url: url.to_string(),
            message: text,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let text = response.text().await?;
        tracing::debug!(body = %text, "Response from Brivo");
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, "Cannot decode Brivo response");
            e.into()
        })
    }
}
