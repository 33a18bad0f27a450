//! Error types for reconciliation.

use thiserror::Error;

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors that can occur during reconciliation.
///
/// The pipeline itself degrades gracefully: missing slug or namespace
/// values fall back to defaults, and unrecognized body shapes pass
/// through unmodified. These variants cover the remaining genuinely
/// unrepresentable situations.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Compound identifier encoding failed.
    #[error("identifier encoding failed: {0}")]
    Codec(#[from] serde_json::Error),

    /// A typed accessor was asked for a shape the response did not carry.
    #[error("expected {expected} payload, got {got}")]
    UnexpectedShape {
        /// The shape the caller asked for.
        expected: &'static str,
        /// The shape the reconciled response actually carries.
        got: &'static str,
    },
}
