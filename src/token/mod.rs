mod cache;
mod guard;
mod policy;

pub use cache::{CachedToken, TokenSnapshot};
pub use guard::{TokenGuard, TokenGuardResult};
pub use policy::TokenPolicy;
