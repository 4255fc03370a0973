//! Dotted-key resolution against a parsed document.

use crate::parser::ConfigDocument;
use serde_json::Value;

/// Resolves a dotted configuration key against a nested document.
///
/// Each non-final segment must name a nested mapping; anything else means
/// the key is simply not configured and resolves to `None`, never an error.
/// The final segment's value is returned as-is, whatever its shape. An
/// empty key resolves to `None`.
pub fn resolve<'a>(key: &str, document: &'a ConfigDocument) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    let segments: Vec<&str> = key.split('.').collect();
    let (last, parents) = segments.split_last()?;
    let mut current = document;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }
    current.get(*last)
}
