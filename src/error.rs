//! Error handling for the reconciliation engine.
//!
//! Per-record anomalies (unparseable codes, unmapped drugs, an empty
//! database source) are absorbed and tallied in [`crate::anomaly::Anomalies`]
//! rather than surfaced here. Only conditions that abort an operation
//! become a `ReconError`.

/// Errors surfaced by the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    /// Patient identifier absent or not an 8-digit numeric string at
    /// assembly time. Fatal to the assembly call.
    #[error("missing or malformed patient identifier: {given:?}")]
    MissingIdentifier {
        /// The identifier value as supplied
        given: String,
    },

    /// The classification lookup collaborator failed
    #[error("classification lookup error: {0}")]
    Lookup(String),
}

/// Alias for Result with `ReconError`
pub type Result<T> = std::result::Result<T, ReconError>;
