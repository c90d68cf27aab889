//! Price Feed WebSocket Client
//!
//! Owns the persistent connection to the price feed endpoint and
//! turns the socket into a stream of [`FeedEvent`]s. The caller never
//! drives reconnection: an unexpected close schedules exactly one
//! reconnect attempt per the configured policy and repeats the cycle
//! until cancelled or the attempts ceiling (if any) is exhausted.
//!
//! Transport errors are logged and feed the reconnect cycle; payloads
//! that fail to decode are logged and dropped. Neither terminates the
//! client.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::codec::JsonCodec;
use super::messages::{FeedMessage, PriceUpdateMessage};
use super::reconnect::{ReconnectConfig, ReconnectPolicy};

// =============================================================================
// Error Type
// =============================================================================

/// Errors that can occur in the feed client.
#[derive(Debug, thiserror::Error)]
pub enum FeedClientError {
    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Connection closed by the server or the stream ended.
    #[error("connection closed")]
    ConnectionClosed,

    /// Maximum reconnection attempts exceeded.
    #[error("maximum reconnection attempts exceeded")]
    MaxReconnectAttemptsExceeded,
}

// =============================================================================
// Feed Client Events
// =============================================================================

/// Events emitted by the feed client.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Connection established. Emitted exactly once per successful
    /// attempt; starts a new connection epoch.
    Connected,
    /// A decoded price snapshot.
    Snapshot(PriceUpdateMessage),
    /// Connection lost. Emitted exactly once per attempt that ends.
    Disconnected,
    /// A reconnect attempt has been scheduled.
    Reconnecting {
        /// Reconnection attempt number.
        attempt: u32,
    },
}

// =============================================================================
// Feed Client Configuration
// =============================================================================

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// WebSocket URL.
    pub url: String,
    /// Reconnection configuration.
    pub reconnect: ReconnectConfig,
}

impl FeedClientConfig {
    /// Create a new configuration with the default reconnect policy
    /// (constant 3 s delay, unlimited attempts).
    #[must_use]
    pub fn new(url: String) -> Self {
        Self {
            url,
            reconnect: ReconnectConfig::default(),
        }
    }
}

// =============================================================================
// Feed Client
// =============================================================================

/// WebSocket client for the price feed.
///
/// Manages the connection lifecycle:
/// - connect, then emit [`FeedEvent::Connected`]
/// - decode text frames, emitting [`FeedEvent::Snapshot`] for price
///   updates and dropping everything else
/// - on unexpected close, emit [`FeedEvent::Disconnected`] and retry
///   after the configured delay
///
/// Closing is cooperative and idempotent: [`FeedClient::close`]
/// cancels the shared token, which aborts the read loop and any
/// pending reconnect sleep. No events are emitted after the loop
/// observes cancellation; events already queued in the channel are
/// the owner's to discard.
pub struct FeedClient {
    config: FeedClientConfig,
    codec: JsonCodec,
    event_tx: mpsc::Sender<FeedEvent>,
    cancel: CancellationToken,
}

impl FeedClient {
    /// Create a new feed client.
    #[must_use]
    pub fn new(
        config: FeedClientConfig,
        event_tx: mpsc::Sender<FeedEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            codec: JsonCodec::new(),
            event_tx,
            cancel,
        }
    }

    /// Stop the client. Idempotent; a pending reconnect never fires
    /// after this returns.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Run the feed client connection loop.
    ///
    /// Connects to the endpoint and processes messages until cancelled
    /// or, when an attempts ceiling is configured, until it is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`FeedClientError::MaxReconnectAttemptsExceeded`] when a
    /// configured ceiling runs out; unlimited-retry configurations
    /// only ever return `Ok` (on cancellation).
    pub async fn run(self: Arc<Self>) -> Result<(), FeedClientError> {
        let mut reconnect_policy = ReconnectPolicy::new(self.config.reconnect.clone());

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!("feed client cancelled");
                return Ok(());
            }

            match self.connect_and_run(&mut reconnect_policy).await {
                Ok(()) => {
                    tracing::info!("feed connection closed gracefully");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "feed connection error");

                    let _ = self.event_tx.send(FeedEvent::Disconnected).await;

                    if let Some(delay) = reconnect_policy.next_delay() {
                        let attempt = reconnect_policy.attempt_count();
                        tracing::info!(
                            attempt,
                            delay_ms = delay.as_millis(),
                            "reconnecting to price feed"
                        );

                        let _ = self
                            .event_tx
                            .send(FeedEvent::Reconnecting { attempt })
                            .await;

                        tokio::select! {
                            () = self.cancel.cancelled() => {
                                tracing::info!("feed client cancelled during reconnect delay");
                                return Ok(());
                            }
                            () = tokio::time::sleep(delay) => {}
                        }
                    } else {
                        return Err(FeedClientError::MaxReconnectAttemptsExceeded);
                    }
                }
            }
        }
    }

    /// Connect to the WebSocket and run until error or cancellation.
    async fn connect_and_run(
        &self,
        reconnect_policy: &mut ReconnectPolicy,
    ) -> Result<(), FeedClientError> {
        tracing::info!(url = %self.config.url, "connecting to price feed");

        let (ws_stream, _response) = tokio_tungstenite::connect_async(&self.config.url).await?;

        let (mut write, mut read) = ws_stream.split();

        reconnect_policy.reset();
        let _ = self.event_tx.send(FeedEvent::Connected).await;

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    return Ok(());
                }
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text_message(&text).await;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await?;
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("server sent close frame");
                            return Err(FeedClientError::ConnectionClosed);
                        }
                        Some(Ok(_)) => {
                            // Ignore other frame types
                        }
                        Some(Err(e)) => {
                            return Err(e.into());
                        }
                        None => {
                            tracing::info!("WebSocket stream ended");
                            return Err(FeedClientError::ConnectionClosed);
                        }
                    }
                }
            }
        }
    }

    /// Decode a text frame and forward snapshots. Unknown messages are
    /// dropped by policy; undecodable ones are logged and dropped.
    async fn handle_text_message(&self, text: &str) {
        match self.codec.decode(text) {
            Ok(FeedMessage::PriceUpdate(msg)) => {
                let _ = self.event_tx.send(FeedEvent::Snapshot(msg)).await;
            }
            Ok(FeedMessage::Ignored) => {
                tracing::trace!("ignoring non-price message");
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping undecodable feed message");
            }
        }
    }
}
