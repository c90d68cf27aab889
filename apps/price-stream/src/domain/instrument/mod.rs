//! Instrument Price Types
//!
//! Core domain types for the live price view: one `InstrumentPrice`
//! record per traded symbol, and the `PriceView` the reconciler
//! publishes after merging each snapshot.
//!
//! Records are owned wholesale by the current view and replaced on
//! every merge; nothing mutates them in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A symbol string (stock ticker).
pub type Symbol = String;

/// One priced instrument as carried by the feed.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "symbol": "AAPL", "price": 150.0, "change": 1.2,
///   "priceHistory": [148.0, 149.0], "logo": "https://…",
///   "name": "Apple Inc.", "dayHigh": 151.0, "dayLow": 147.0,
///   "dayOpen": 148.5, "volume": 1000000
/// }
/// ```
///
/// Numeric fields pass through as received; the feed is trusted and
/// no range validation is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPrice {
    /// Unique ticker symbol.
    pub symbol: Symbol,

    /// Current price.
    pub price: Decimal,

    /// Percent change, signed.
    pub change: Decimal,

    /// Short-term price history, chronological, oldest first.
    /// Bounded by the producer; carried through untouched.
    #[serde(default)]
    pub price_history: Vec<Decimal>,

    /// Logo URL for display.
    #[serde(default)]
    pub logo: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Day high.
    #[serde(default)]
    pub day_high: Decimal,

    /// Day low.
    #[serde(default)]
    pub day_low: Decimal,

    /// Day open.
    #[serde(default)]
    pub day_open: Decimal,

    /// Traded volume.
    #[serde(default)]
    pub volume: i64,
}

/// One entry of a reconciled view: the instrument plus the price trend
/// versus the previous snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntry {
    /// The instrument record from the latest snapshot.
    pub instrument: InstrumentPrice,

    /// Price delta versus the previously observed price for this
    /// symbol. `None` until the symbol has been seen in an earlier
    /// snapshot (no trend is computable on the first render).
    pub trend: Option<Decimal>,
}

impl ViewEntry {
    /// Whether the price moved up since the previous snapshot.
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.trend.is_some_and(|t| t > Decimal::ZERO)
    }

    /// Whether the price moved down since the previous snapshot.
    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.trend.is_some_and(|t| t < Decimal::ZERO)
    }
}

/// An ordered, reconciled view of the priced instruments.
///
/// Published to the display layer after every accepted snapshot. The
/// entry order follows the Display Order captured at the start of the
/// connection epoch; symbols absent from the latest snapshot are
/// omitted, never reordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceView {
    /// Monotonic sequence number of accepted snapshots.
    pub seq: u64,

    /// Ordered entries for the instruments present in this snapshot.
    pub entries: Vec<ViewEntry>,
}

impl PriceView {
    /// Symbols visible in this view, in display order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.instrument.symbol.as_str())
    }

    /// Look up an entry by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&ViewEntry> {
        self.entries.iter().find(|e| e.instrument.symbol == symbol)
    }

    /// Whether the view carries no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
