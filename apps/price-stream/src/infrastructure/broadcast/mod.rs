//! View Broadcast Hub
//!
//! Distributes reconciled price views to display-layer subscribers
//! using tokio broadcast channels, and passes user intents (symbol
//! selection) upward verbatim — the core never interprets them.
//!
//! The hub retains the last accepted view so a subscriber arriving
//! between snapshots can render immediately; once a view exists it is
//! never retracted, even across reconnects (stale data is shown until
//! the next snapshot lands).

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::domain::instrument::{PriceView, Symbol};

// =============================================================================
// User Intents
// =============================================================================

/// A user intent forwarded through the hub without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// The user selected a displayed instrument.
    SymbolSelected(Symbol),
}

// =============================================================================
// View Hub
// =============================================================================

/// Configuration for hub channel capacities.
#[derive(Debug, Clone, Copy)]
pub struct ViewHubConfig {
    /// Capacity of the price view channel.
    pub views_capacity: usize,
    /// Capacity of the user intent channel.
    pub intents_capacity: usize,
}

impl Default for ViewHubConfig {
    fn default() -> Self {
        Self {
            views_capacity: 256,
            intents_capacity: 64,
        }
    }
}

/// Central hub between the reconciler and the display layer.
///
/// # Example
///
/// ```rust
/// use price_stream::infrastructure::broadcast::{ViewHub, ViewHubConfig};
///
/// let hub = ViewHub::new(ViewHubConfig::default());
/// let rx = hub.views_rx();
/// // The reconcile service publishes views:
/// // hub.publish_view(view);
/// ```
#[derive(Debug)]
pub struct ViewHub {
    views_tx: broadcast::Sender<PriceView>,
    intents_tx: broadcast::Sender<UserIntent>,
    last_view: RwLock<Option<PriceView>>,
}

impl ViewHub {
    /// Create a new hub with the given configuration.
    #[must_use]
    pub fn new(config: ViewHubConfig) -> Self {
        Self {
            views_tx: broadcast::channel(config.views_capacity).0,
            intents_tx: broadcast::channel(config.intents_capacity).0,
            last_view: RwLock::new(None),
        }
    }

    /// Create a new hub with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ViewHubConfig::default())
    }

    /// Publish a reconciled view to all subscribers and retain it for
    /// late joiners.
    ///
    /// Returns the number of receivers that got the view, or `None`
    /// if there are no active receivers.
    #[must_use]
    pub fn publish_view(&self, view: PriceView) -> Option<usize> {
        *self.last_view.write() = Some(view.clone());
        self.views_tx.send(view).ok()
    }

    /// Get a new receiver for price views.
    #[must_use]
    pub fn views_rx(&self) -> broadcast::Receiver<PriceView> {
        self.views_tx.subscribe()
    }

    /// The most recently published view, if any snapshot has been
    /// reconciled. `None` means the display layer shows its loading
    /// placeholder.
    #[must_use]
    pub fn last_view(&self) -> Option<PriceView> {
        self.last_view.read().clone()
    }

    /// Number of active view receivers.
    #[must_use]
    pub fn view_receiver_count(&self) -> usize {
        self.views_tx.receiver_count()
    }

    /// Forward a user intent to all subscribers.
    #[must_use]
    pub fn send_intent(&self, intent: UserIntent) -> Option<usize> {
        self.intents_tx.send(intent).ok()
    }

    /// Get a new receiver for user intents.
    #[must_use]
    pub fn intents_rx(&self) -> broadcast::Receiver<UserIntent> {
        self.intents_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::{InstrumentPrice, ViewEntry};
    use rust_decimal::Decimal;

    fn view(seq: u64, symbol: &str) -> PriceView {
        PriceView {
            seq,
            entries: vec![ViewEntry {
                instrument: InstrumentPrice {
                    symbol: symbol.to_string(),
                    price: Decimal::new(10, 0),
                    change: Decimal::ZERO,
                    price_history: vec![],
                    logo: String::new(),
                    name: String::new(),
                    day_high: Decimal::ZERO,
                    day_low: Decimal::ZERO,
                    day_open: Decimal::ZERO,
                    volume: 0,
                },
                trend: None,
            }],
        }
    }

    #[tokio::test]
    async fn views_reach_all_subscribers() {
        let hub = ViewHub::with_defaults();
        let mut rx1 = hub.views_rx();
        let mut rx2 = hub.views_rx();

        let count = hub.publish_view(view(1, "AAPL"));
        assert_eq!(count, Some(2));

        assert_eq!(rx1.recv().await.unwrap().seq, 1);
        assert_eq!(rx2.recv().await.unwrap().seq, 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_still_retains_view() {
        let hub = ViewHub::with_defaults();

        assert!(hub.last_view().is_none());
        assert_eq!(hub.publish_view(view(1, "AAPL")), None);

        let last = hub.last_view().unwrap();
        assert_eq!(last.seq, 1);
        assert!(last.get("AAPL").is_some());
    }

    #[tokio::test]
    async fn last_view_tracks_most_recent_publish() {
        let hub = ViewHub::with_defaults();
        let _rx = hub.views_rx();

        let _ = hub.publish_view(view(1, "AAPL"));
        let _ = hub.publish_view(view(2, "AAPL"));

        assert_eq!(hub.last_view().unwrap().seq, 2);
    }

    #[tokio::test]
    async fn intents_pass_through_verbatim() {
        let hub = ViewHub::with_defaults();
        let mut rx = hub.intents_rx();

        let _ = hub.send_intent(UserIntent::SymbolSelected("TSLA".to_string()));

        assert_eq!(
            rx.recv().await.unwrap(),
            UserIntent::SymbolSelected("TSLA".to_string())
        );
    }
}
