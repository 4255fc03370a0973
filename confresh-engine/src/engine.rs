//! Refresh orchestration.
//!
//! The engine owns the build-once tag index and drives one refresh pass per
//! pushed document. It performs no I/O of its own; subscription wiring and
//! the error barrier live in `listener`.

use crate::applicator::ValueApplicator;
use crate::error::RefreshResult;
use crate::index::TagIndex;
use crate::parser::ConfigDocument;
use crate::registry::ComponentRegistry;
use crate::resolver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Drives refresh passes against one component registry.
///
/// Two-state lifecycle: unindexed until the first pushed document, indexed
/// for the rest of the process lifetime. The index, once built, is only
/// ever read.
pub struct RefreshEngine {
    registry: Arc<dyn ComponentRegistry>,
    applicator: ValueApplicator,
    index: RwLock<Arc<TagIndex>>,
    index_builds: AtomicUsize,
}

impl RefreshEngine {
    /// Creates an engine in the unindexed state.
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            registry,
            applicator: ValueApplicator::new(),
            index: RwLock::new(Arc::new(TagIndex::default())),
            index_builds: AtomicUsize::new(0),
        }
    }

    /// Runs one refresh pass over a freshly parsed document. Returns the
    /// number of fields actually replaced.
    ///
    /// The first pass builds the tag index; later passes reuse it. Keys
    /// absent from this document are skipped without a record and retried
    /// on the next push. An error applying any binding aborts the rest of
    /// the pass; fields replaced before the failure stay replaced.
    pub fn refresh(&self, document: &ConfigDocument) -> RefreshResult<usize> {
        let index = self.ensure_index();
        let mut applied = 0;
        for key in index.keys() {
            let Some(value) = resolver::resolve(key.as_str(), document) else {
                debug!(key = %key, "key not in pushed document, skipping");
                continue;
            };
            for binding in index.bindings(key) {
                if self
                    .applicator
                    .apply(self.registry.as_ref(), key, binding, value, document)?
                {
                    applied += 1;
                }
            }
        }
        debug!(applied, keys = index.len(), "refresh pass complete");
        Ok(applied)
    }

    /// How many times the index has been built. Stays at one after the
    /// first pass unless concurrent first pushes race the build.
    pub fn index_builds(&self) -> usize {
        self.index_builds.load(Ordering::Relaxed)
    }

    /// Whether the first pass has populated the index.
    pub fn is_indexed(&self) -> bool {
        !self.index.read().expect("index lock poisoned").is_empty()
    }

    // The build guard is an emptiness check, not an exactly-once latch:
    // concurrent first pushes may each build, the last install wins, and
    // no entries are lost because every build sees the same completed
    // component set.
    fn ensure_index(&self) -> Arc<TagIndex> {
        {
            let index = self.index.read().expect("index lock poisoned");
            if !index.is_empty() {
                return index.clone();
            }
        }
        let built = Arc::new(TagIndex::build(self.registry.as_ref()));
        self.index_builds.fetch_add(1, Ordering::Relaxed);
        info!(keys = built.len(), "tag index built");
        *self.index.write().expect("index lock poisoned") = built.clone();
        built
    }
}
