use std::sync::Arc;

use tokio::sync::watch;

use crate::view::ArenaView;

/// Latest-value broadcast of arena snapshots.
///
/// Subscribers only ever see the newest view; intermediate ones may be skipped
/// if they fall behind.
#[derive(Debug)]
pub struct ViewStore {
    tx: watch::Sender<Arc<ArenaView>>,
}

impl ViewStore {
    #[must_use]
    pub fn new(initial: ArenaView) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    pub fn publish(&self, view: ArenaView) {
        self.tx.send_replace(Arc::new(view));
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ArenaView>> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn latest(&self) -> Arc<ArenaView> {
        Arc::clone(&self.tx.borrow())
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
