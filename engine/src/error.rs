//! Error types
//!
//! Every error here signals caller misuse or corrupt input. None of them are
//! transient, and nothing in the crate retries internally.

use thiserror::Error;

/// Errors surfaced by generator construction, draws, and snapshot handling
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RngError {
    #[error("Invalid seed {seed}: expansion produced an all-zero state")]
    InvalidSeed { seed: u64 },

    #[error("Invalid range: max {max} is less than min {min}")]
    InvalidRange { min: i128, max: i128 },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Collection must contain at least one element")]
    EmptyCollection,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Checkpoint checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Unsupported checkpoint version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
