//! Infrastructure Layer - Adapters and external integrations.
//!
//! Concrete implementations of the transport, publication, and
//! collaborator boundaries around the domain reconciler.

/// Broadcast channel adapters for view distribution.
pub mod broadcast;

/// Configuration loading.
pub mod config;

/// Price feed WebSocket transport.
pub mod feed;

/// Order history HTTP adapter.
pub mod orders;

/// Tracing integration.
pub mod telemetry;
