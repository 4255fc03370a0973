//! Remote document identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of the remote configuration document, computed once at
/// subscription time from the process's naming inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Composes an identifier as `<prefix-or-appname>-<profile>.<extension>`.
    ///
    /// The explicit prefix wins when it is non-blank, otherwise the
    /// application name is used. Inputs are not validated; blank inputs
    /// yield a degenerate but well-formed identifier such as `-.yml`.
    #[must_use]
    pub fn from_naming(prefix: &str, application_name: &str, profile: &str, extension: &str) -> Self {
        let stem = if prefix.trim().is_empty() {
            application_name
        } else {
            prefix
        };
        Self(format!("{stem}-{profile}.{extension}"))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
