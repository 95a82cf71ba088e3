//! Checkpoint - Textual State Transport
//!
//! Wraps an [`EngineState`] in a versioned JSON envelope with a SHA-256
//! checksum so a host can persist it and detect corruption on reload.
//!
//! # Critical Invariants
//!
//! - **No side effects**: encoding and decoding never draw from a generator
//! - **Integrity**: the checksum covers the JSON encoding of the state
//! - **Shape**: a decoded state passes [`EngineState::validate`]
//!
//! # Errors on decode
//!
//! Input that is not a checkpoint envelope at all is a
//! [`RngError::SerializationError`]. An envelope whose `state` is missing
//! fields or has the wrong types is a [`RngError::InvalidState`], the same
//! error a restore of a malformed snapshot gives.

use crate::error::RngError;
use crate::generator::RngManager;
use crate::state::EngineState;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Envelope format version written by this crate
pub const CHECKPOINT_VERSION: u32 = 1;

/// Versioned, checksummed snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCheckpoint {
    pub version: u32,
    pub state: EngineState,
    /// Lowercase hex SHA-256 of the state JSON
    pub checksum: String,
}

/// Envelope with the state still undecoded, so shape errors can be told
/// apart from broken JSON
#[derive(Deserialize)]
struct RawCheckpoint {
    version: u32,
    state: serde_json::Value,
    checksum: String,
}

impl StateCheckpoint {
    pub fn new(state: EngineState) -> Result<Self, RngError> {
        let checksum = compute_state_checksum(&state)?;
        Ok(Self {
            version: CHECKPOINT_VERSION,
            state,
            checksum,
        })
    }

    pub fn to_json(&self) -> Result<String, RngError> {
        serde_json::to_string(self).map_err(|e| {
            RngError::SerializationError(format!("Checkpoint serialization failed: {}", e))
        })
    }

    /// Parse and fully verify a checkpoint
    pub fn from_json(json: &str) -> Result<Self, RngError> {
        let raw: RawCheckpoint = serde_json::from_str(json).map_err(|e| {
            warn!("checkpoint JSON rejected: {}", e);
            RngError::SerializationError(format!("Checkpoint deserialization failed: {}", e))
        })?;

        let state: EngineState = serde_json::from_value(raw.state).map_err(|e| {
            warn!("checkpoint state malformed: {}", e);
            RngError::InvalidState(format!("Checkpoint state is malformed: {}", e))
        })?;

        let checkpoint = StateCheckpoint {
            version: raw.version,
            state,
            checksum: raw.checksum,
        };

        checkpoint.verify().map_err(|e| {
            warn!("checkpoint rejected: {}", e);
            e
        })?;
        debug!("decoded checkpoint version {}", checkpoint.version);
        Ok(checkpoint)
    }

    /// Check version, checksum, and state shape
    pub fn verify(&self) -> Result<(), RngError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(RngError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let actual = compute_state_checksum(&self.state)?;
        if actual != self.checksum {
            return Err(RngError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        self.state.validate()
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }
}

/// SHA-256 of an [`EngineState`]'s JSON encoding, as lowercase hex
///
/// `EngineState` is a fixed struct, so its field order and therefore the
/// digest are stable.
pub fn compute_state_checksum(state: &EngineState) -> Result<String, RngError> {
    let bytes = serde_json::to_vec(state).map_err(|e| {
        RngError::SerializationError(format!("State serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

impl RngManager {
    /// Current state as checkpoint JSON
    pub fn checkpoint(&self) -> Result<String, RngError> {
        StateCheckpoint::new(self.capture_state())?.to_json()
    }

    /// Resume from checkpoint JSON produced by [`RngManager::checkpoint`]
    ///
    /// # Example
    /// ```
    /// use inclusive_rng::RngManager;
    ///
    /// let mut rng = RngManager::new(2024).unwrap();
    /// rng.next_u8();
    /// let saved = rng.checkpoint().unwrap();
    ///
    /// let mut resumed = RngManager::from_checkpoint(&saved).unwrap();
    /// assert_eq!(resumed.next_u64(), rng.next_u64());
    /// ```
    pub fn from_checkpoint(json: &str) -> Result<Self, RngError> {
        Self::from_state(StateCheckpoint::from_json(json)?.into_state())
    }
}
