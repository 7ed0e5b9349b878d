//! read client configuration from a file, the environment or a secret

use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com/cgi-bin/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7200);

pub enum ConfigLocation {
    File(String),
    Env,
    Secret,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub corp_id: String,
    pub corp_secret: String,
    pub base_url: String,
    /// Applied to every request, including `gettoken`.
    pub timeout: Duration,
    /// How long a fetched access token is served from the cache.
    pub token_ttl: Duration,
}

/// On-disk / secret representation; durations are plain integers.
#[derive(Deserialize)]
struct RawConfig {
    corp_id: String,
    corp_secret: String,
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    token_ttl_secs: Option<u64>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Config {
            corp_id: raw.corp_id,
            corp_secret: raw.corp_secret,
            base_url: raw.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: raw
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT),
            token_ttl: raw
                .token_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TOKEN_TTL),
        }
    }
}

impl Config {
    pub fn new(corp_id: impl Into<String>, corp_secret: impl Into<String>) -> Self {
        Config {
            corp_id: corp_id.into(),
            corp_secret: corp_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let raw: RawConfig = serde_json::from_str(&contents)?;
        Ok(raw.into())
    }

    pub fn from_env() -> Result<Self, Error> {
        let corp_id = std::env::var("WECOM_CORP_ID")
            .map_err(|_| Error::Config("Missing WECOM_CORP_ID env var".to_string()))?;
        let corp_secret = std::env::var("WECOM_CORP_SECRET")
            .map_err(|_| Error::Config("Missing WECOM_CORP_SECRET env var".to_string()))?;
        let mut config = Config::new(corp_id, corp_secret);
        if let Ok(base_url) = std::env::var("WECOM_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(ms) = env_u64("WECOM_TIMEOUT_MS")? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = env_u64("WECOM_TOKEN_TTL_SECS")? {
            config.token_ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub async fn from_secret() -> Result<Self, Error> {
        let secret_arn = std::env::var("WECOM_CONFIG_SECRET_ARN")
            .map_err(|_| Error::Config("Missing WECOM_CONFIG_SECRET_ARN env var".to_string()))?;
        let client = aws_sdk_secretsmanager::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        );
        let resp = client
            .get_secret_value()
            .secret_id(secret_arn)
            .send()
            .await
            .map_err(|e| Error::Config(format!("Failed to get secret: {}", e)))?;
        let secret = resp.secret_string().ok_or_else(|| {
            Error::Config("Failed to get secret string, returned None".to_string())
        })?;
        let raw: RawConfig = serde_json::from_str(secret)?;
        Ok(raw.into())
    }
}

pub async fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    match loc {
        ConfigLocation::File(path) => Config::from_file(path),
        ConfigLocation::Env => Config::from_env(),
        ConfigLocation::Secret => Config::from_secret().await,
    }
}

fn env_u64(name: &str) -> Result<Option<u64>, Error> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{name} must be an integer, got '{value}'"))),
        Err(_) => Ok(None),
    }
}
