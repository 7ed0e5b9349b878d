mod client;
pub mod config;
mod endpoint;
mod errors;
mod request_context;
pub mod telemetry;
pub mod token;
pub mod types;

pub use client::{DirectoryClient, MAX_BATCH_DELETE};
pub use config::{Config, ConfigLocation};
pub use endpoint::Endpoint;
pub use errors::{Error, status_message};
pub use request_context::ApiRequest;

#[cfg(test)]
mod tests;
