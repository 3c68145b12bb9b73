//! Client configuration

/// Default OAuth host
pub const DEFAULT_AUTH_URL: &str = "https://auth.brivo.com";
/// Default API host
pub const DEFAULT_API_URL: &str = "https://api.brivo.com";

/// Credentials and hosts for talking to Brivo
#[derive(Debug, Clone)]
pub struct BrivoConfig {
    /// OAuth host (e.g., "https://auth.brivo.com")
    pub auth_url: String,

    /// API host (e.g., "https://api.brivo.com")
    pub api_url: String,

    /// Application client id (HTTP Basic user on the token endpoint)
    pub client_id: String,

    /// Application client secret (HTTP Basic password on the token endpoint)
    pub client_secret: String,

    /// Administrator username for the password grant
    pub username: String,

    /// Administrator password for the password grant
    pub password: String,

    /// Static API key sent as the `api-key` header on every call
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Refresh the cached token this many seconds before it expires
    pub token_refresh_skew: u64,
}

impl BrivoConfig {
    /// Create a configuration against the public Brivo hosts
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            api_key: api_key.into(),
            timeout: 30,
            token_refresh_skew: 60,
        }
    }

    /// Point both hosts somewhere else (mock servers, sandboxes)
    pub fn with_hosts(mut self, auth_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.api_url = api_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set how early a cached token is refreshed
    pub fn with_token_refresh_skew(mut self, seconds: u64) -> Self {
        self.token_refresh_skew = seconds;
        self
    }

    /// Names of required settings that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
            ("api_key", &self.api_key),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/oauth/token", self.auth_url.trim_end_matches('/'))
    }

    pub(crate) fn api(&self, path: &str) -> String {
        format!(
            "{}/v1/api/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
