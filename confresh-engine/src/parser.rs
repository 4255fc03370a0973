//! Document parsing seam.
//!
//! The remote source pushes raw text; turning that text into a nested
//! key-value structure is a collaborator capability. A JSON parser ships
//! with the crate; hosts whose remote source serves YAML or properties
//! formats provide their own implementation.

use crate::error::{RefreshError, RefreshResult};
use serde_json::{Map, Value};

/// A parsed configuration document: a nested string-keyed map. Transient,
/// alive only for the duration of one refresh pass.
pub type ConfigDocument = Map<String, Value>;

/// Turns one raw pushed document into a nested key-value structure.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, raw: &str) -> RefreshResult<ConfigDocument>;
}

/// Parser for JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentParser;

impl DocumentParser for JsonDocumentParser {
    fn parse(&self, raw: &str) -> RefreshResult<ConfigDocument> {
        let value: Value = serde_json::from_str(raw)?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(RefreshError::Parse(format!(
                "expected a top-level mapping, got {other}"
            ))),
        }
    }
}
