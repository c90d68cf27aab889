//! Reconcile Service
//!
//! Pumps feed events into the price reconciler and publishes each
//! accepted view to the broadcast hub. This is the publish side effect
//! of ingestion: the core never writes to a UI, it hands immutable
//! view copies to whoever subscribed.
//!
//! The service owns the reconciler exclusively and runs it to
//! completion per message, so Display Order and the Previous-Price
//! Table need no locking.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::reconcile::PriceReconciler;
use crate::infrastructure::broadcast::ViewHub;
use crate::infrastructure::feed::FeedEvent;

/// Drives the reconciler from the feed event stream.
pub struct ReconcileService {
    reconciler: PriceReconciler,
    events: mpsc::Receiver<FeedEvent>,
    hub: Arc<ViewHub>,
    cancel: CancellationToken,
}

impl ReconcileService {
    /// Create a new service consuming `events` and publishing to `hub`.
    #[must_use]
    pub fn new(
        events: mpsc::Receiver<FeedEvent>,
        hub: Arc<ViewHub>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            reconciler: PriceReconciler::new(),
            events,
            hub,
            cancel,
        }
    }

    /// Run until cancelled or the feed client drops its sender.
    ///
    /// Events arriving after cancellation are discarded, never applied:
    /// teardown must not mutate published state.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    tracing::info!("reconcile service cancelled");
                    return;
                }
                event = self.events.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            tracing::info!("feed event channel closed");
                            return;
                        }
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Connected => {
                // New connection epoch: the next non-empty snapshot
                // re-seeds the display order. The last published view
                // stays up until then.
                tracing::info!("feed connected, starting new epoch");
                self.reconciler.reset_epoch();
            }
            FeedEvent::Snapshot(msg) => {
                if let Some(view) = self.reconciler.ingest(msg.prices) {
                    tracing::debug!(seq = view.seq, instruments = view.entries.len(), "publishing view");
                    let _ = self.hub.publish_view(view);
                }
            }
            FeedEvent::Disconnected => {
                tracing::info!("feed disconnected");
            }
            FeedEvent::Reconnecting { attempt } => {
                tracing::debug!(attempt, "feed reconnecting");
            }
        }
    }
}
