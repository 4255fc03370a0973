//! Static-field configuration refresh engine for Confresh.
//!
//! Keeps tagged fields of long-lived component instances synchronized with
//! a remotely pushed configuration document, without a process restart.
//! Components register their refreshable fields with a component registry;
//! on every push the engine re-resolves each tagged key against the new
//! document and replaces the fields whose values actually changed.
//!
//! # Architecture
//!
//! - **Resolver**: dotted-key lookup in a nested document
//! - **Index**: normalized key → bindings, built lazily once per process
//! - **Applicator**: category-aware diff, coercion, and `${...}`
//!   interpolation
//! - **Engine**: one refresh pass per pushed document
//! - **Listener**: subscription wiring and the top-level error barrier
//!
//! The component registry, the transport, and the document parser are
//! external collaborators behind trait seams; in-memory implementations for
//! tests live in [`registry::mock`] and [`transport::mock`].
//!
//! # Example
//!
//! ```
//! use confresh_engine::registry::mock::MockRegistry;
//! use confresh_engine::{ConfigDocument, FieldSpec, RefreshEngine};
//! use confresh_types::ValueKind;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(MockRegistry::new());
//! registry.register(
//!     "http-client",
//!     vec![(
//!         FieldSpec::new("timeout_ms", "${http.timeout:}", ValueKind::Scalar),
//!         json!(1000),
//!     )],
//! );
//!
//! let engine = RefreshEngine::new(registry.clone());
//! let document: ConfigDocument =
//!     serde_json::from_str(r#"{"http": {"timeout": 2500}}"#).unwrap();
//! assert_eq!(engine.refresh(&document).unwrap(), 1);
//! assert_eq!(registry.value("http-client", "timeout_ms"), Some(json!(2500)));
//! ```

pub mod applicator;
pub mod config;
mod engine;
mod error;
pub mod index;
pub mod listener;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod transport;

pub use config::RefreshConfig;
pub use engine::RefreshEngine;
pub use error::{RefreshError, RefreshResult};
pub use index::{Binding, TagIndex};
pub use listener::RefreshListener;
pub use parser::{ConfigDocument, DocumentParser, JsonDocumentParser};
pub use registry::{ComponentRegistry, FieldHandle, FieldSpec, RegistryError, RegistryResult};
pub use transport::{ConfigTransport, PushListener};
