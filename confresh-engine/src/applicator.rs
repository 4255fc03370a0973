//! Field value diffing and application.
//!
//! Decides, per declared value category, whether a resolved value actually
//! differs from the field's current value, coerces the replacement, and
//! writes it through the registry. Text values are placeholder-interpolated
//! against the same document before they are applied.

use crate::index::Binding;
use crate::parser::ConfigDocument;
use crate::registry::{ComponentRegistry, RegistryResult};
use crate::resolver;
use confresh_types::{ConfigKey, ValueKind};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

/// Applies resolved document values to bound fields.
pub struct ValueApplicator {
    placeholder: Regex,
}

impl ValueApplicator {
    /// Creates an applicator with the `${...}` placeholder scanner.
    pub fn new() -> Self {
        Self {
            placeholder: Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"),
        }
    }

    /// Diffs one binding against the resolved value and replaces the field
    /// on inequality. Returns whether the field was written.
    pub fn apply(
        &self,
        registry: &dyn ComponentRegistry,
        key: &ConfigKey,
        binding: &Binding,
        new_value: &Value,
        document: &ConfigDocument,
    ) -> RegistryResult<bool> {
        let current = registry.get_value(&binding.handle)?;

        let replacement = match binding.kind {
            // Ordered sequences: deep comparison, wholesale replacement,
            // no element merge.
            ValueKind::List => {
                (!values_equal(&current, new_value)).then(|| new_value.clone())
            }
            // Literal comparison against the stringified incoming value;
            // interpolation happens only when the text actually changed.
            ValueKind::Text => {
                let incoming = stringify(new_value);
                let current_text = current
                    .as_str()
                    .map_or_else(|| stringify(&current), str::to_owned);
                (current_text != incoming)
                    .then(|| Value::String(self.interpolate(&incoming, document)))
            }
            // Semantic comparison: representation differences between
            // integer widths do not count as changes.
            ValueKind::Scalar => {
                (!values_equal(&current, new_value)).then(|| new_value.clone())
            }
            // Anything else is compared structurally; the registry maps the
            // new structure onto the field's declared type by name.
            ValueKind::Structured => {
                (!values_equal(&current, new_value)).then(|| new_value.clone())
            }
        };

        match replacement {
            Some(value) => {
                registry.set_value(&binding.handle, value.clone())?;
                info!(
                    key = %key,
                    field = %binding.handle,
                    old = %current,
                    new = %value,
                    "static field refreshed"
                );
                Ok(true)
            }
            None => {
                debug!(key = %key, field = %binding.handle, "value unchanged");
                Ok(false)
            }
        }
    }

    /// Substitutes every `${inner.key}` in `text` with the stringified
    /// resolution of the inner expression against the same document.
    /// Unresolvable expressions substitute as the literal `null`. Single
    /// pass: substituted text is not rescanned, so a key that transitively
    /// references itself cannot loop.
    fn interpolate(&self, text: &str, document: &ConfigDocument) -> String {
        self.placeholder
            .replace_all(text, |caps: &regex::Captures<'_>| {
                match resolver::resolve(&caps[1], document) {
                    Some(value) => stringify(value),
                    None => "null".to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for ValueApplicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Display-style stringification used for text comparison and placeholder
/// substitution: strings render bare, absent renders as the literal `null`,
/// structured values render as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deep equality with semantic numeric comparison at every level.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| values_equal(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

/// `1_i64`, `1_u64` and `1.0` all compare equal.
fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
