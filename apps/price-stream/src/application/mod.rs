//! Application Layer - Use cases and port definitions.
//!
//! This layer wires the domain reconciler to the transport and
//! publication adapters, and defines the port interfaces the
//! infrastructure implements.

/// Port interfaces for external collaborators.
pub mod ports;

/// The feed-event pump driving the reconciler.
pub mod services;
