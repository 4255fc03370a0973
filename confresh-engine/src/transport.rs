//! Remote configuration source abstraction.
//!
//! The subscribe-and-receive-push mechanism and the connection lifecycle are
//! external to the engine; this trait is the seam they plug into.

use crate::error::RefreshResult;
use async_trait::async_trait;
use confresh_types::DocumentId;
use std::sync::Arc;

/// Receives the raw pushed documents of one subscription.
pub trait PushListener: Send + Sync {
    /// Called by the transport with the raw text of each pushed document,
    /// one push at a time per subscribed document.
    fn on_push(&self, raw: &str);
}

/// A remote configuration source that delivers pushed documents.
#[async_trait]
pub trait ConfigTransport: Send + Sync {
    /// Subscribes to change pushes for one document. The listener stays
    /// installed for the life of the connection.
    async fn subscribe(
        &self,
        document_id: &DocumentId,
        group: &str,
        listener: Arc<dyn PushListener>,
    ) -> RefreshResult<()>;
}

/// A transport for tests: records subscriptions and lets the test push raw
/// documents synchronously.
pub mod mock {
    use super::*;
    use crate::error::RefreshError;
    use std::sync::Mutex;

    struct Subscription {
        document_id: DocumentId,
        group: String,
        listener: Arc<dyn PushListener>,
    }

    /// An in-memory transport.
    #[derive(Default)]
    pub struct MockTransport {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        subscriptions: Vec<Subscription>,
        refuse: bool,
    }

    impl MockTransport {
        /// Creates a transport that accepts subscriptions.
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every future subscribe call fail.
        pub fn refuse_subscriptions(&self) {
            self.inner.lock().unwrap().refuse = true;
        }

        /// The (document id, group) pairs subscribed so far.
        pub fn subscriptions(&self) -> Vec<(DocumentId, String)> {
            self.inner
                .lock()
                .unwrap()
                .subscriptions
                .iter()
                .map(|s| (s.document_id.clone(), s.group.clone()))
                .collect()
        }

        /// Delivers one raw document to every installed listener.
        pub fn push(&self, raw: &str) {
            let listeners: Vec<Arc<dyn PushListener>> = self
                .inner
                .lock()
                .unwrap()
                .subscriptions
                .iter()
                .map(|s| s.listener.clone())
                .collect();
            for listener in listeners {
                listener.on_push(raw);
            }
        }
    }

    #[async_trait]
    impl ConfigTransport for MockTransport {
        async fn subscribe(
            &self,
            document_id: &DocumentId,
            group: &str,
            listener: Arc<dyn PushListener>,
        ) -> RefreshResult<()> {
            let mut inner = self.inner.lock().unwrap();
            if inner.refuse {
                return Err(RefreshError::Transport("subscription refused".to_string()));
            }
            inner.subscriptions.push(Subscription {
                document_id: document_id.clone(),
                group: group.to_string(),
                listener,
            });
            Ok(())
        }
    }
}
