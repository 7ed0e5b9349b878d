use std::time::Duration;

use crate::config::DEFAULT_TOKEN_TTL;
use crate::errors::Error;

/// How long a fetched access token may be served from the cache.
#[derive(Clone, Debug)]
pub struct TokenPolicy {
    pub validity: Duration,
}

impl TokenPolicy {
    pub fn new(validity: Duration) -> Result<Self, Error> {
        if validity.is_zero() {
            return Err(Error::Config("Token validity window must be > 0".into()));
        }
        Ok(Self { validity })
    }
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            validity: DEFAULT_TOKEN_TTL,
        }
    }
}
