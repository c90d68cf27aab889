//! Snapshot Reconciliation
//!
//! Merges an unordered, possibly-incomplete, repeating stream of price
//! snapshots into a stable, ordered view.
//!
//! # Design
//!
//! The reconciler is a two-state machine per connection epoch:
//!
//! - **Uninitialized**: no Display Order yet. The first non-empty
//!   snapshot seeds the order verbatim and transitions to Tracking.
//!   An empty first snapshot leaves the state untouched so the epoch
//!   never locks onto an empty ordering.
//! - **Tracking**: the Display Order is fixed. Each snapshot is merged
//!   by walking the order and selecting matching records; symbols
//!   absent from a snapshot are omitted (transient absence, not an
//!   error) and reappear in their original slot. Symbols that join the
//!   feed after the order was captured are never displayed this epoch.
//!
//! The Previous-Price Table is overwritten unconditionally for every
//! record of every accepted snapshot, including records outside the
//! Display Order, so a trend is available the moment a late joiner
//! becomes visible in a later epoch.
//!
//! The reconciler performs no I/O and is exclusively owned by the
//! task that feeds it; views handed out are owned copies, never shared
//! mutable state.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::instrument::{InstrumentPrice, PriceView, Symbol, ViewEntry};

// =============================================================================
// Epoch State
// =============================================================================

/// Ordering state for the current connection epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EpochState {
    /// No snapshot has seeded a Display Order yet.
    #[default]
    Uninitialized,
    /// Display Order is fixed for the remainder of the epoch.
    Tracking {
        /// Symbols in the order they were first observed.
        order: Vec<Symbol>,
    },
}

impl EpochState {
    /// Whether a Display Order has been captured.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking { .. })
    }
}

// =============================================================================
// Price Reconciler
// =============================================================================

/// Reconciles raw price snapshots into ordered views.
///
/// # Example
///
/// ```rust
/// use price_stream::domain::reconcile::PriceReconciler;
///
/// let mut reconciler = PriceReconciler::new();
/// // First non-empty snapshot fixes the display order;
/// // every accepted snapshot yields a view.
/// assert!(reconciler.ingest(vec![]).is_none());
/// ```
#[derive(Debug, Default)]
pub struct PriceReconciler {
    state: EpochState,
    previous_prices: HashMap<Symbol, Decimal>,
    seq: u64,
}

impl PriceReconciler {
    /// Create a reconciler with no captured order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the Display Order has been captured for this epoch.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// The fixed Display Order, empty while uninitialized.
    #[must_use]
    pub fn display_order(&self) -> &[Symbol] {
        match &self.state {
            EpochState::Uninitialized => &[],
            EpochState::Tracking { order } => order,
        }
    }

    /// Last observed price for a symbol, if any snapshot carried it.
    #[must_use]
    pub fn previous_price(&self, symbol: &str) -> Option<Decimal> {
        self.previous_prices.get(symbol).copied()
    }

    /// Merge one snapshot into the current epoch.
    ///
    /// Returns the ordered view to publish, or `None` when the
    /// snapshot could not seed an order (empty snapshot while
    /// uninitialized). Survivor order is invariant: two symbols
    /// present in the seeding snapshot and in any later snapshot keep
    /// their relative order.
    pub fn ingest(&mut self, prices: Vec<InstrumentPrice>) -> Option<PriceView> {
        if !self.state.is_tracking() {
            if prices.is_empty() {
                // Wait for a non-empty snapshot to seed the ordering.
                return None;
            }
            let order = prices.iter().map(|p| p.symbol.clone()).collect();
            self.state = EpochState::Tracking { order };
        }

        let entries = self.merge(&prices);

        // Every incoming record updates the table, including symbols
        // outside the Display Order.
        for record in prices {
            self.previous_prices.insert(record.symbol, record.price);
        }

        self.seq += 1;
        Some(PriceView {
            seq: self.seq,
            entries,
        })
    }

    /// Start a new connection epoch: the next non-empty snapshot
    /// re-seeds the Display Order. The Previous-Price Table survives
    /// so trends stay continuous across reconnects.
    pub fn reset_epoch(&mut self) {
        self.state = EpochState::Uninitialized;
    }

    /// Build view entries by walking the Display Order and selecting
    /// matching incoming records; trend is computed against the table
    /// before it is overwritten.
    fn merge(&self, prices: &[InstrumentPrice]) -> Vec<ViewEntry> {
        self.display_order()
            .iter()
            .filter_map(|symbol| {
                prices.iter().find(|p| &p.symbol == symbol).map(|record| ViewEntry {
                    instrument: record.clone(),
                    trend: self
                        .previous_prices
                        .get(symbol)
                        .map(|previous| record.price - previous),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, price: i64) -> InstrumentPrice {
        InstrumentPrice {
            symbol: symbol.to_string(),
            price: Decimal::new(price, 0),
            change: Decimal::ZERO,
            price_history: vec![],
            logo: String::new(),
            name: String::new(),
            day_high: Decimal::ZERO,
            day_low: Decimal::ZERO,
            day_open: Decimal::ZERO,
            volume: 0,
        }
    }

    fn symbols(view: &PriceView) -> Vec<&str> {
        view.symbols().collect()
    }

    #[test]
    fn first_snapshot_seeds_display_order() {
        let mut reconciler = PriceReconciler::new();
        assert!(!reconciler.is_tracking());

        let view = reconciler
            .ingest(vec![record("A", 10), record("B", 20), record("C", 30)])
            .unwrap();

        assert!(reconciler.is_tracking());
        assert_eq!(reconciler.display_order(), ["A", "B", "C"]);
        assert_eq!(symbols(&view), vec!["A", "B", "C"]);
        assert_eq!(view.seq, 1);
    }

    #[test]
    fn empty_first_snapshot_stays_uninitialized() {
        let mut reconciler = PriceReconciler::new();

        assert!(reconciler.ingest(vec![]).is_none());
        assert!(!reconciler.is_tracking());
        assert!(reconciler.display_order().is_empty());

        // A later non-empty snapshot still seeds the order.
        let view = reconciler
            .ingest(vec![record("B", 20), record("A", 10)])
            .unwrap();
        assert_eq!(symbols(&view), vec!["B", "A"]);
    }

    #[test]
    fn survivor_order_never_changes() {
        let mut reconciler = PriceReconciler::new();
        let _ = reconciler.ingest(vec![record("A", 1), record("B", 2), record("C", 3)]);

        // Snapshot arrives in a different order; display order holds.
        let view = reconciler
            .ingest(vec![record("C", 6), record("A", 4), record("B", 5)])
            .unwrap();

        assert_eq!(symbols(&view), vec!["A", "B", "C"]);
    }

    #[test]
    fn transient_absence_drops_then_restores_slot() {
        let mut reconciler = PriceReconciler::new();

        let s1 = reconciler
            .ingest(vec![record("A", 1), record("B", 2), record("C", 3)])
            .unwrap();
        assert_eq!(symbols(&s1), vec!["A", "B", "C"]);

        let s2 = reconciler
            .ingest(vec![record("A", 1), record("C", 3)])
            .unwrap();
        assert_eq!(symbols(&s2), vec!["A", "C"]);

        let s3 = reconciler
            .ingest(vec![record("A", 1), record("B", 2), record("C", 3)])
            .unwrap();
        assert_eq!(symbols(&s3), vec!["A", "B", "C"]);
    }

    #[test]
    fn late_joiner_is_omitted_for_the_epoch() {
        let mut reconciler = PriceReconciler::new();
        let _ = reconciler.ingest(vec![record("A", 1)]);

        let view = reconciler
            .ingest(vec![record("A", 1), record("NEW", 99)])
            .unwrap();

        assert_eq!(symbols(&view), vec!["A"]);
        // But its price is tracked for future epochs.
        assert_eq!(reconciler.previous_price("NEW"), Some(Decimal::new(99, 0)));
    }

    #[test]
    fn trend_reflects_delta_between_consecutive_snapshots() {
        let mut reconciler = PriceReconciler::new();

        let first = reconciler.ingest(vec![record("X", 10)]).unwrap();
        assert_eq!(first.get("X").unwrap().trend, None);

        let second = reconciler.ingest(vec![record("X", 12)]).unwrap();
        assert_eq!(second.get("X").unwrap().trend, Some(Decimal::new(2, 0)));
        assert!(second.get("X").unwrap().is_rising());
    }

    #[test]
    fn previous_prices_updated_on_every_snapshot_including_first() {
        let mut reconciler = PriceReconciler::new();
        let _ = reconciler.ingest(vec![record("A", 10), record("B", 20)]);

        assert_eq!(reconciler.previous_price("A"), Some(Decimal::new(10, 0)));
        assert_eq!(reconciler.previous_price("B"), Some(Decimal::new(20, 0)));
        assert_eq!(reconciler.previous_price("C"), None);
    }

    #[test]
    fn empty_snapshot_while_tracking_publishes_empty_view() {
        let mut reconciler = PriceReconciler::new();
        let _ = reconciler.ingest(vec![record("A", 1)]);

        let view = reconciler.ingest(vec![]).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.seq, 2);
        // The order is still fixed from the first snapshot.
        assert_eq!(reconciler.display_order(), ["A"]);
    }

    #[test]
    fn epoch_reset_rearms_order_capture_but_keeps_prices() {
        let mut reconciler = PriceReconciler::new();
        let _ = reconciler.ingest(vec![record("A", 10), record("B", 20)]);

        reconciler.reset_epoch();
        assert!(!reconciler.is_tracking());
        assert_eq!(reconciler.previous_price("A"), Some(Decimal::new(10, 0)));

        // New epoch seeds a fresh order, and the surviving table means
        // the very first view already carries a trend.
        let view = reconciler
            .ingest(vec![record("B", 22), record("A", 10)])
            .unwrap();
        assert_eq!(symbols(&view), vec!["B", "A"]);
        assert_eq!(view.get("B").unwrap().trend, Some(Decimal::new(2, 0)));
    }

    #[test]
    fn sequence_increments_only_on_accepted_snapshots() {
        let mut reconciler = PriceReconciler::new();

        assert!(reconciler.ingest(vec![]).is_none());
        let v1 = reconciler.ingest(vec![record("A", 1)]).unwrap();
        let v2 = reconciler.ingest(vec![record("A", 2)]).unwrap();

        assert_eq!(v1.seq, 1);
        assert_eq!(v2.seq, 2);
    }
}
