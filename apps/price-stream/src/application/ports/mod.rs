//! Port Interfaces
//!
//! Contracts for external collaborators, following the Hexagonal
//! Architecture pattern. The price feed itself is event-driven (see
//! `infrastructure::feed`); the only pull-style collaborator is the
//! order-history backend, consumed as an opaque list independently of
//! the price stream.

use async_trait::async_trait;

use crate::domain::orders::Order;

/// Errors surfaced by an order-history adapter.
#[derive(Debug, thiserror::Error)]
pub enum OrderHistoryError {
    /// Request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// Response body did not match the expected schema.
    #[error("response parse error: {0}")]
    Parse(String),
}

/// Source of past orders for the order-history display.
///
/// Refresh is caller-driven; implementations must not couple fetches
/// to the price stream lifecycle.
#[async_trait]
pub trait OrderHistoryPort: Send + Sync {
    /// Fetch the current order list.
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderHistoryError>;
}
