//! Error types for the refresh engine.

use crate::registry::RegistryError;
use thiserror::Error;

/// Result type for refresh operations.
pub type RefreshResult<T> = Result<T, RefreshError>;

/// Errors that can occur while subscribing or running a refresh pass.
///
/// A resolution miss (key not present in the pushed document) is not an
/// error and never surfaces here; it is a normal "not configured" outcome.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The transport could not establish or service the subscription.
    #[error("transport error: {0}")]
    Transport(String),

    /// A pushed document could not be parsed into a nested map.
    #[error("document parse error: {0}")]
    Parse(String),

    /// A registry lookup or field access failed mid-pass.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
