//! Component registry abstraction.
//!
//! The engine never constructs or owns component instances; it reaches them
//! through this seam. A registry exposes the set of live instances, the
//! tagged fields each refreshable instance registered, and get/set access to
//! field values by handle. Hosts without runtime type introspection register
//! refreshable fields explicitly at construction time.

use confresh_types::ValueKind;
use serde_json::Value;
use std::fmt;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur during registry access.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error("field not found: {instance}.{field}")]
    FieldNotFound { instance: String, field: String },

    #[error("value rejected for {instance}.{field}: {reason}")]
    ValueRejected {
        instance: String,
        field: String,
        reason: String,
    },
}

/// One tagged field as registered by a refreshable component: the field
/// name, the declared key literal (possibly still carrying placeholder
/// decoration), and the declared value category.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: String,
    pub key_literal: String,
    pub kind: ValueKind,
}

impl FieldSpec {
    /// Creates a field spec.
    pub fn new(field: impl Into<String>, key_literal: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field: field.into(),
            key_literal: key_literal.into(),
            kind,
        }
    }
}

/// Opaque handle to one field on one live instance, resolvable by the
/// registry that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldHandle {
    pub instance: String,
    pub field: String,
}

impl fmt::Display for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.instance, self.field)
    }
}

/// The component registry collaborator.
///
/// Implementations own the instances and perform the actual field reads and
/// writes. Structured values handed to [`set_value`](Self::set_value) are
/// mapped onto the field's declared type by name on the host side.
pub trait ComponentRegistry: Send + Sync {
    /// Names of every live instance, in registration order.
    fn instance_names(&self) -> Vec<String>;

    /// The tagged fields an instance registered. Empty for instances that
    /// did not declare themselves refreshable.
    fn refreshable_fields(&self, instance: &str) -> Vec<FieldSpec>;

    /// Reads the current value of a field.
    fn get_value(&self, handle: &FieldHandle) -> RegistryResult<Value>;

    /// Replaces the value of a field.
    fn set_value(&self, handle: &FieldHandle, value: Value) -> RegistryResult<()>;
}

/// An in-memory registry for tests and for hosts that assemble their
/// component set by hand.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A registry backed by plain maps. Field values live in the registry
    /// itself rather than on real component instances.
    #[derive(Default)]
    pub struct MockRegistry {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        order: Vec<String>,
        fields: HashMap<String, Vec<FieldSpec>>,
        values: HashMap<(String, String), Value>,
        rejected: Vec<(String, String)>,
        writes: Vec<FieldHandle>,
    }

    impl MockRegistry {
        /// Creates an empty registry.
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a refreshable instance with its tagged fields and their
        /// initial values.
        pub fn register(&self, instance: &str, fields: Vec<(FieldSpec, Value)>) {
            let mut inner = self.inner.lock().unwrap();
            inner.order.push(instance.to_string());
            let mut specs = Vec::with_capacity(fields.len());
            for (spec, initial) in fields {
                inner
                    .values
                    .insert((instance.to_string(), spec.field.clone()), initial);
                specs.push(spec);
            }
            inner.fields.insert(instance.to_string(), specs);
        }

        /// Registers an instance with no refreshable fields.
        pub fn register_plain(&self, instance: &str) {
            let mut inner = self.inner.lock().unwrap();
            inner.order.push(instance.to_string());
        }

        /// Makes every future write to one field fail.
        pub fn reject_writes(&self, instance: &str, field: &str) {
            self.inner
                .lock()
                .unwrap()
                .rejected
                .push((instance.to_string(), field.to_string()));
        }

        /// Current value of a field, for assertions.
        pub fn value(&self, instance: &str, field: &str) -> Option<Value> {
            self.inner
                .lock()
                .unwrap()
                .values
                .get(&(instance.to_string(), field.to_string()))
                .cloned()
        }

        /// Every write performed through the registry, in order.
        pub fn writes(&self) -> Vec<FieldHandle> {
            self.inner.lock().unwrap().writes.clone()
        }

        /// Number of writes performed through the registry.
        pub fn write_count(&self) -> usize {
            self.inner.lock().unwrap().writes.len()
        }
    }

    impl ComponentRegistry for MockRegistry {
        fn instance_names(&self) -> Vec<String> {
            self.inner.lock().unwrap().order.clone()
        }

        fn refreshable_fields(&self, instance: &str) -> Vec<FieldSpec> {
            self.inner
                .lock()
                .unwrap()
                .fields
                .get(instance)
                .cloned()
                .unwrap_or_default()
        }

        fn get_value(&self, handle: &FieldHandle) -> RegistryResult<Value> {
            let inner = self.inner.lock().unwrap();
            if !inner.order.contains(&handle.instance) {
                return Err(RegistryError::InstanceNotFound(handle.instance.clone()));
            }
            inner
                .values
                .get(&(handle.instance.clone(), handle.field.clone()))
                .cloned()
                .ok_or_else(|| RegistryError::FieldNotFound {
                    instance: handle.instance.clone(),
                    field: handle.field.clone(),
                })
        }

        fn set_value(&self, handle: &FieldHandle, value: Value) -> RegistryResult<()> {
            let mut inner = self.inner.lock().unwrap();
            if inner
                .rejected
                .iter()
                .any(|(i, f)| i == &handle.instance && f == &handle.field)
            {
                return Err(RegistryError::ValueRejected {
                    instance: handle.instance.clone(),
                    field: handle.field.clone(),
                    reason: "write rejected by test".to_string(),
                });
            }
            let slot = (handle.instance.clone(), handle.field.clone());
            if !inner.values.contains_key(&slot) {
                return Err(RegistryError::FieldNotFound {
                    instance: handle.instance.clone(),
                    field: handle.field.clone(),
                });
            }
            inner.values.insert(slot, value);
            inner.writes.push(handle.clone());
            Ok(())
        }
    }
}
