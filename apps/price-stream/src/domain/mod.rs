//! Domain layer - Core reconciliation logic and data types.

/// Instrument price records and reconciled views.
pub mod instrument;

/// Order history records (collaborator boundary).
pub mod orders;

/// Snapshot reconciliation state machine.
pub mod reconcile;
