//! Subscription wiring.
//!
//! Connects an engine to a remote source: computes the document identifier,
//! subscribes with the configured group, and funnels each pushed document
//! through the parser into a refresh pass behind the top-level error
//! barrier.

use crate::config::RefreshConfig;
use crate::engine::RefreshEngine;
use crate::error::RefreshResult;
use crate::parser::DocumentParser;
use crate::transport::{ConfigTransport, PushListener};
use std::sync::Arc;
use tracing::{error, info};

/// Owns the engine and its collaborators for the life of one subscription.
pub struct RefreshListener {
    engine: Arc<RefreshEngine>,
    parser: Arc<dyn DocumentParser>,
    config: RefreshConfig,
}

impl RefreshListener {
    /// Creates a listener around an engine, a parser, and the bootstrap
    /// naming inputs.
    pub fn new(
        engine: Arc<RefreshEngine>,
        parser: Arc<dyn DocumentParser>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            engine,
            parser,
            config,
        }
    }

    /// The engine driven by this listener.
    pub fn engine(&self) -> &Arc<RefreshEngine> {
        &self.engine
    }

    /// Subscribes to the remote source. Called once at process startup; a
    /// subscription failure is fatal and propagates to the caller rather
    /// than leaving the process running unmonitored.
    pub async fn start(&self, transport: &dyn ConfigTransport) -> RefreshResult<()> {
        let document_id = self.config.document_id();
        info!(
            document_id = %document_id,
            group = %self.config.group,
            "subscribing to remote configuration"
        );
        let callback = Arc::new(RefreshCallback {
            engine: self.engine.clone(),
            parser: self.parser.clone(),
        });
        transport
            .subscribe(&document_id, &self.config.group, callback)
            .await
    }
}

struct RefreshCallback {
    engine: Arc<RefreshEngine>,
    parser: Arc<dyn DocumentParser>,
}

impl PushListener for RefreshCallback {
    // Top-level error barrier: any failure parsing or applying this
    // document is logged and swallowed. Fields already replaced stay
    // replaced; the same document is not retried.
    fn on_push(&self, raw: &str) {
        let outcome = self
            .parser
            .parse(raw)
            .and_then(|document| self.engine.refresh(&document));
        match outcome {
            Ok(applied) => {
                if applied > 0 {
                    info!(applied, "refresh pass replaced fields");
                }
            }
            Err(e) => {
                error!(error = %e, "refresh pass failed, keeping previously applied values");
            }
        }
    }
}
