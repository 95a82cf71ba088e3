//! Inclusive RNG - Deterministic Random Number Engine
//!
//! Reproducible xoshiro256** generator for simulations, games, and
//! procedural systems that need exact sequence replay.
//!
//! # Architecture
//!
//! - **seed**: splitmix64 seed expansion and entropy sources
//! - **engine**: xoshiro256** core permutation
//! - **cache**: sub-word bit caches for 1/8/16/32-bit draws
//! - **bounded**: Lemire's nearly-divisionless inclusive-range draws
//! - **state**: complete engine snapshot
//! - **generator**: the public [`RngManager`] facade
//! - **collections**: element selection and Fisher-Yates shuffle
//! - **checkpoint**: versioned, checksummed JSON transport of a snapshot
//! - **config**: serde-friendly seeding configuration
//!
//! # Critical Invariants
//!
//! 1. The permutation state is never all zero
//! 2. Same seed → same sequence, bit for bit
//! 3. Capture/restore replays the exact continuation and never draws
//! 4. Not cryptographically secure

pub mod bounded;
pub mod cache;
pub mod checkpoint;
mod collections;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod seed;
pub mod state;

// Re-exports for convenience
pub use bounded::UniformInt;
pub use checkpoint::{StateCheckpoint, CHECKPOINT_VERSION};
pub use config::RngConfig;
pub use error::RngError;
pub use generator::RngManager;
pub use seed::{ClockEntropy, EntropySource, FixedEntropy};
pub use state::EngineState;
