use std::fmt;

use crate::request_context::RequestDispatchContext;

mod directory;
mod impls;

pub use directory::MAX_BATCH_DELETE;

/// Client for the enterprise directory API.
///
/// Clones share the HTTP connection pool and the access-token cache.
#[derive(Clone)]
pub struct DirectoryClient {
    corp_id: String,
    corp_secret: String,
    context: RequestDispatchContext,
}

impl fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryClient")
            .field("corp_id", &self.corp_id)
            .field("corp_secret", &"<redacted>")
            .field("base_url", &self.context.base_url().as_str())
            .finish()
    }
}
