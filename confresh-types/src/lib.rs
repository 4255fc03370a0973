//! Core type definitions for Confresh.
//!
//! This crate defines the engine-agnostic types shared between the refresh
//! engine and component-registry implementations:
//! - Normalized configuration keys ([`ConfigKey`])
//! - Remote document identifiers ([`DocumentId`])
//! - Field value categories ([`ValueKind`])
//!
//! Anything that knows about live component instances, documents, or the
//! remote source belongs in `confresh-engine`, not here.

mod document_id;
mod key;
mod kind;

pub use document_id::DocumentId;
pub use key::ConfigKey;
pub use kind::ValueKind;
