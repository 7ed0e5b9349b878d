use std::time::Instant;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::errors::Error;
use crate::telemetry::refresh::RefreshTelemetry;

use super::{CachedToken, TokenPolicy, TokenSnapshot};

/// Convenience result alias for guard operations.
pub type TokenGuardResult<T> = Result<T, Error>;

/// Owns the token cache and serializes fetches so concurrent callers share one exchange.
pub struct TokenGuard {
    cache: RwLock<Option<CachedToken>>,
    policy: TokenPolicy,
    refresh_lock: Mutex<()>,
}

impl TokenGuard {
    pub fn new(policy: TokenPolicy) -> Self {
        Self {
            cache: RwLock::new(None),
            policy,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// The cached token if it is still inside the validity window.
    pub async fn current(&self) -> Option<String> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|token| token.is_valid(Instant::now(), self.policy.validity))
            .map(|token| token.value().to_string())
    }

    /// Returns the cached token, or runs `fetch` and caches its result when the cache is empty
    /// or expired.
    pub async fn ensure_fresh<F, Fut>(
        &self,
        fetch: F,
        telemetry: &RefreshTelemetry,
    ) -> TokenGuardResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = TokenGuardResult<String>>,
    {
        if let Some(token) = self.current().await {
            return Ok(token);
        }

        // Only one fetch should run at a time.
        let _lock = self.refresh_lock.lock().await;
        if let Some(token) = self.current().await {
            debug!(context = %telemetry.context(), "token fetched by concurrent caller");
            return Ok(token);
        }
        // Drop any expired value so a failed fetch leaves the cache empty.
        self.cache.write().await.take();

        telemetry.emit_start();
        match fetch().await {
            Ok(value) => {
                if value.is_empty() {
                    let err = Error::InvalidResponse("gettoken returned an empty access_token".into());
                    telemetry.emit_failure(&err);
                    return Err(err);
                }
                *self.cache.write().await = Some(CachedToken::new(value.clone()));
                telemetry.emit_success(value.len(), self.policy.validity);
                Ok(value)
            }
            Err(err) => {
                telemetry.emit_failure(&err);
                Err(err)
            }
        }
    }

    pub async fn invalidate(&self) {
        if self.cache.write().await.take().is_some() {
            debug!("access token invalidated");
        }
    }

    /// Snapshot of the cached token; `None` when the cache is empty or expired.
    pub async fn snapshot(&self) -> Option<TokenSnapshot> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|token| token.is_valid(Instant::now(), self.policy.validity))
            .map(|token| token.to_snapshot(self.policy.validity))
    }
}
