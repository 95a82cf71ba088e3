//! xoshiro256** core engine
//!
//! The sole source of entropy in the crate. Every other draw (sub-word,
//! bounded, float, collection) is built from [`Xoshiro256StarStar::next_u64`].
//!
//! # Algorithm
//!
//! xoshiro256** keeps 256 bits of state and has period 2^256 - 1. The
//! all-zero state is a fixed point and is rejected on every entry path.
//!
//! # Determinism
//!
//! Same four words → same output sequence, bit for bit. There is no jump
//! function; independent streams need independently seeded engines.

use crate::error::RngError;
use serde::{Deserialize, Serialize};

/// 256-bit permutation state
///
/// Serialises as `[s0, s1, s2, s3]`; deserialising goes through
/// [`Xoshiro256StarStar::from_words`], so the all-zero state is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u64; 4]", into = "[u64; 4]")]
pub struct Xoshiro256StarStar {
    s0: u64,
    s1: u64,
    s2: u64,
    s3: u64,
}

impl Xoshiro256StarStar {
    /// Build an engine from raw state words
    ///
    /// # Errors
    /// Returns [`RngError::InvalidState`] when all four words are zero.
    pub fn from_words(words: [u64; 4]) -> Result<Self, RngError> {
        if words == [0; 4] {
            return Err(RngError::InvalidState(
                "permutation state must not be all zero".to_string(),
            ));
        }
        let [s0, s1, s2, s3] = words;
        Ok(Self { s0, s1, s2, s3 })
    }

    /// Current state words, in `[s0, s1, s2, s3]` order
    pub fn words(&self) -> [u64; 4] {
        [self.s0, self.s1, self.s2, self.s3]
    }

    /// Produce the next 64-bit output and advance the state
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let result = self.s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s1 << 17;

        self.s2 ^= self.s0;
        self.s3 ^= self.s1;
        self.s1 ^= self.s2;
        self.s0 ^= self.s3;

        self.s2 ^= t;
        self.s3 = self.s3.rotate_left(45);

        result
    }
}

impl TryFrom<[u64; 4]> for Xoshiro256StarStar {
    type Error = RngError;

    fn try_from(words: [u64; 4]) -> Result<Self, Self::Error> {
        Self::from_words(words)
    }
}

impl From<Xoshiro256StarStar> for [u64; 4] {
    fn from(engine: Xoshiro256StarStar) -> Self {
        engine.words()
    }
}
