use tokio::sync::mpsc;

use crate::Document;

/// A live query. Each received value is the complete result set at that
/// moment, not a delta.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<Vec<Document>>,
}

impl Subscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<Vec<Document>>) -> Self {
        Self { receiver }
    }

    /// Waits for the next snapshot. `None` once the store has dropped the
    /// subscription.
    pub async fn next(&mut self) -> Option<Vec<Document>> {
        self.receiver.recv().await
    }

    /// Returns a snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<Vec<Document>> {
        self.receiver.try_recv().ok()
    }
}
