use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    DirectoryClient,
    config::{Config, ConfigLocation, read_config},
    endpoint::Endpoint,
    errors::Error,
    request_context::{ApiRequest, RequestDispatchContext},
    telemetry::refresh::RefreshTelemetry,
    token::{TokenPolicy, TokenSnapshot},
    types::AccessTokenResponse,
};

const USER_AGENT: &str = "wecom-directory-rust/0.1.0";

impl DirectoryClient {
    /// Create a new DirectoryClient
    /// # Arguments
    /// * `config` - Explicit configuration (`Config`), typically built with `Config::new`
    ///   or loaded via `Config::from_file` / `Config::from_env`.
    ///
    /// No network call is made; the first access token is fetched lazily.
    pub fn new(config: Config) -> Result<Self, Error> {
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        if config.corp_id.is_empty() {
            return Err(Error::Config("corp_id must not be empty".into()));
        }
        let policy = TokenPolicy::new(config.token_ttl)?;
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        info!(
            corp_id = %config.corp_id,
            base_url = %base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            token_ttl_secs = config.token_ttl.as_secs(),
            "directory client created"
        );
        Ok(DirectoryClient {
            corp_id: config.corp_id,
            corp_secret: config.corp_secret,
            context: RequestDispatchContext::build(http_client, base_url, policy),
        })
    }

    pub async fn from_location(loc: ConfigLocation) -> Result<Self, Error> {
        Self::new(read_config(loc).await?)
    }

    pub fn corp_id(&self) -> &str {
        &self.corp_id
    }

    /// Returns the cached access token, fetching a new one when the cache is empty or the
    /// validity window has elapsed.
    pub async fn authenticate(&self) -> Result<String, Error> {
        let guard = self.context.guard();
        let telemetry = RefreshTelemetry::new("authenticate");
        guard.ensure_fresh(|| self.fetch_token(), &telemetry).await
    }

    async fn fetch_token(&self) -> Result<String, Error> {
        let request = ApiRequest::new(Endpoint::GetToken)
            .query("corpid", &self.corp_id)
            .query("corpsecret", &self.corp_secret);
        let value = self.context.send(request, None).await?;
        let resp: AccessTokenResponse = serde_json::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("gettoken: {e}")))?;
        info!(
            expires_in = ?resp.expires_in,
            "access token acquired (len={})",
            resp.access_token.len()
        );
        Ok(resp.access_token)
    }

    /// Issues one directory API call. Every endpoint except `gettoken` gets the current
    /// access token as its `access_token` query parameter.
    pub async fn invoke(&self, request: ApiRequest) -> Result<Value, Error> {
        let endpoint = request.endpoint();
        let token = if endpoint.requires_token() {
            Some(self.authenticate().await?)
        } else {
            None
        };
        let value = self.context.send(request, token.as_deref()).await?;
        debug!(endpoint = %endpoint, "request ok");
        Ok(value)
    }

    /// The cached token, if one is inside its validity window.
    pub async fn token_snapshot(&self) -> Option<TokenSnapshot> {
        self.context.guard().snapshot().await
    }

    /// Drops the cached token so the next call fetches a fresh one.
    pub async fn invalidate_token(&self) {
        self.context.guard().invalidate().await;
    }
}
