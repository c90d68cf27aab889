//! Feed Wire Message Types
//!
//! Wire format types for the price feed WebSocket stream. Messages are
//! JSON objects tagged by a `type` field.
//!
//! # Message Types
//!
//! - `priceUpdate`: a full snapshot of current prices for some subset
//!   of symbols. The only message the reconciler consumes.
//! - anything else: ignored by policy, to stay resilient to partial
//!   backend rollouts.

use serde::{Deserialize, Serialize};

use crate::domain::instrument::InstrumentPrice;

/// Type tag identifying a price snapshot on the wire.
pub const PRICE_UPDATE_TYPE: &str = "priceUpdate";

/// A price snapshot message.
///
/// # Wire Format (JSON)
/// ```json
/// {"type": "priceUpdate", "prices": [{"symbol": "AAPL", …}, …]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdateMessage {
    /// Message type (always "priceUpdate").
    #[serde(rename = "type")]
    pub msg_type: String,

    /// Current prices for the symbols carried by this snapshot.
    pub prices: Vec<InstrumentPrice>,
}

/// A decoded inbound feed message.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// A price snapshot to reconcile.
    PriceUpdate(PriceUpdateMessage),
    /// A message the core does not consume: wrong type tag, or a
    /// `priceUpdate` without a `prices` collection. Dropped silently.
    Ignored,
}
