//! Price Feed Transport
//!
//! WebSocket client for the price feed endpoint: wire messages, a
//! tolerant JSON codec, the reconnection policy, and the connection
//! loop that turns the socket into [`client::FeedEvent`]s.

/// Connection loop and feed events.
pub mod client;

/// Tolerant JSON decoding for the feed stream.
pub mod codec;

/// Wire message types.
pub mod messages;

/// Reconnection delay policy.
pub mod reconnect;

pub use client::{FeedClient, FeedClientConfig, FeedClientError, FeedEvent};
pub use codec::{CodecError, JsonCodec};
pub use messages::{FeedMessage, PriceUpdateMessage};
pub use reconnect::{ReconnectConfig, ReconnectPolicy};
