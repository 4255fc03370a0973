//! Normalized configuration keys.
//!
//! A key as declared on a tagged field may carry the remote source's own
//! placeholder decoration (`${my.path:}` and friends). The engine indexes
//! fields by the undecorated dotted path, so normalization lives here, next
//! to the type, rather than being re-implemented by every registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters the remote source's placeholder syntax wraps around a key
/// literal. All of them are stripped during normalization.
const DECORATION: [char; 5] = ['#', '$', '{', '}', ':'];

/// A normalized dotted configuration path, e.g. `server.http.port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Normalizes a declared key literal by stripping placeholder
    /// decoration, so `${spring.cloud.nacos.config.prefix:}` becomes
    /// `spring.cloud.nacos.config.prefix`.
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        Self(literal.chars().filter(|c| !DECORATION.contains(c)).collect())
    }

    /// Returns the normalized dotted path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the normalized path is empty (a literal made entirely of
    /// decoration normalizes to this).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConfigKey {
    fn from(literal: &str) -> Self {
        Self::from_literal(literal)
    }
}
