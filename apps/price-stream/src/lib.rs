#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access
    )
)]

//! Price Stream - Live Price Feed Core
//!
//! Maintains a resilient WebSocket connection to a stock price feed
//! and reconciles its unordered, possibly-incomplete, repeating
//! snapshot messages into a stable, ordered, incrementally-updating
//! view for a dashboard display layer.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: The reconciliation algorithm and data types
//!   - `instrument`: Priced instruments and reconciled views
//!   - `reconcile`: Display-order state machine and snapshot merge
//!   - `orders`: Opaque order-history records
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Order-history contract
//!   - `services`: The feed-event pump driving the reconciler
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `feed`: WebSocket client with automatic reconnection
//!   - `broadcast`: View distribution to display subscribers
//!   - `orders`: Order-history HTTP adapter
//!   - `config`: Environment-based configuration
//!   - `telemetry`: Tracing setup
//!
//! # Data Flow
//!
//! ```text
//! Price Feed WS ──► FeedClient ──► ReconcileService ──► ViewHub ──► Display 1
//!                   (reconnects)   (PriceReconciler)              ├► Display 2
//!                                                                 └► Display N
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Reconciliation logic with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::instrument::{InstrumentPrice, PriceView, Symbol, ViewEntry};
pub use domain::orders::{Order, OrderSide, OrderStatus, OrderType};
pub use domain::reconcile::{EpochState, PriceReconciler};

// Infrastructure config
pub use infrastructure::config::{
    ConfigError, DashboardConfig, FeedEndpoint, FeedSettings, HubSettings, OrdersSettings,
};

// Feed client (for integration tests)
pub use infrastructure::feed::{
    FeedClient, FeedClientConfig, FeedClientError, FeedEvent, PriceUpdateMessage, ReconnectConfig,
    ReconnectPolicy,
};

// View hub
pub use infrastructure::broadcast::{UserIntent, ViewHub, ViewHubConfig};

// Order history
pub use application::ports::{OrderHistoryError, OrderHistoryPort};
pub use infrastructure::orders::OrderHistoryClient;
