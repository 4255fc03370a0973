//! Tag index construction.
//!
//! The index maps each normalized configuration key to the bindings that
//! share it, in discovery order. It is built lazily on the first refresh
//! pass and reused unchanged for the rest of the process lifetime; building
//! assumes component construction has already completed.

use crate::registry::{ComponentRegistry, FieldHandle};
use confresh_types::{ConfigKey, ValueKind};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// One tagged field under one normalized key. Immutable once discovered.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Handle to the owning instance's field, resolvable via the registry.
    pub handle: FieldHandle,
    /// Value category, fixed at registration time.
    pub kind: ValueKind,
}

/// Normalized key → ordered bindings.
#[derive(Debug, Default)]
pub struct TagIndex {
    keys: Vec<ConfigKey>,
    bindings: HashMap<ConfigKey, Vec<Binding>>,
}

impl TagIndex {
    /// Walks every instance the registry knows and collects the tagged
    /// fields of the refreshable ones. Declared key literals are normalized
    /// here, so `${server.http.port:}` indexes under `server.http.port`.
    pub fn build(registry: &dyn ComponentRegistry) -> Self {
        let mut index = Self::default();
        for instance in registry.instance_names() {
            for spec in registry.refreshable_fields(&instance) {
                let key = ConfigKey::from_literal(&spec.key_literal);
                debug!(instance = %instance, field = %spec.field, key = %key, "indexed tagged field");
                index.insert(
                    key,
                    Binding {
                        handle: FieldHandle {
                            instance: instance.clone(),
                            field: spec.field,
                        },
                        kind: spec.kind,
                    },
                );
            }
        }
        index
    }

    fn insert(&mut self, key: ConfigKey, binding: Binding) {
        match self.bindings.entry(key) {
            Entry::Vacant(entry) => {
                self.keys.push(entry.key().clone());
                entry.insert(vec![binding]);
            }
            Entry::Occupied(mut entry) => entry.get_mut().push(binding),
        }
    }

    /// Keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }

    /// Bindings under one key, in discovery order.
    pub fn bindings(&self, key: &ConfigKey) -> &[Binding] {
        self.bindings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no tagged field has been discovered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
