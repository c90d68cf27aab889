//! Order History Types
//!
//! Opaque order records consumed from the trading backend. The core
//! never interprets these beyond display; placement and persistence
//! live elsewhere.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::instrument::Symbol;

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

/// Execution style of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Execute at market price.
    Market,
    /// Execute at a limit price.
    Limit,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting execution.
    Pending,
    /// Fully executed.
    Done,
}

/// A past or pending order, as returned by the order-history endpoint.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "id": "65f…", "symbol": "AAPL", "side": "buy",
///   "orderType": "limit", "quantity": 10, "price": 150.0,
///   "status": "pending", "createdAt": "2024-01-15T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend-assigned identifier.
    pub id: String,

    /// Instrument the order trades.
    pub symbol: Symbol,

    /// Buy or sell.
    pub side: OrderSide,

    /// Market or limit.
    pub order_type: OrderType,

    /// Number of shares.
    pub quantity: i64,

    /// Order price.
    pub price: Decimal,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
