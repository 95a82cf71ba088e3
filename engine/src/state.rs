//! Engine state snapshot
//!
//! [`EngineState`] is a plain value: the four permutation words, the three
//! sub-word caches, and the pending 32-bit half. Nothing outside it affects
//! future output, so restoring a captured state replays the exact sequence.

use crate::cache::{LaneCache, LaneWidth, SubwordCaches, BOOL_LANES, BYTE_LANES, WORD_LANES};
use crate::engine::Xoshiro256StarStar;
use crate::error::RngError;
use serde::{Deserialize, Serialize};

/// Complete generator state
///
/// # Example
/// ```
/// use inclusive_rng::RngManager;
///
/// let mut rng = RngManager::new(42).unwrap();
/// let saved = rng.capture_state();
/// let first = rng.next_u16();
///
/// rng.restore_state(saved).unwrap();
/// assert_eq!(rng.next_u16(), first);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineState {
    pub s0: u64,
    pub s1: u64,
    pub s2: u64,
    pub s3: u64,

    /// Services 1-bit draws (0..=64 lanes)
    pub bool_cache: LaneCache,

    /// Services 8-bit draws (0..=8 lanes)
    pub byte_cache: LaneCache,

    /// Services 16-bit draws (0..=4 lanes)
    pub word_cache: LaneCache,

    /// Second half of a split 64-bit draw
    pub pending32: Option<u32>,
}

impl EngineState {
    pub(crate) fn from_parts(engine: &Xoshiro256StarStar, caches: &SubwordCaches) -> Self {
        let [s0, s1, s2, s3] = engine.words();
        Self {
            s0,
            s1,
            s2,
            s3,
            bool_cache: caches.bool_cache,
            byte_cache: caches.byte_cache,
            word_cache: caches.word_cache,
            pending32: caches.pending32,
        }
    }

    pub(crate) fn into_parts(self) -> Result<(Xoshiro256StarStar, SubwordCaches), RngError> {
        self.validate()?;
        let engine = Xoshiro256StarStar::from_words([self.s0, self.s1, self.s2, self.s3])?;
        let caches = SubwordCaches {
            bool_cache: self.bool_cache,
            byte_cache: self.byte_cache,
            word_cache: self.word_cache,
            pending32: self.pending32,
        };
        Ok((engine, caches))
    }

    /// Check that this state could have been produced by a generator
    ///
    /// Rejects the all-zero permutation, cache counters beyond their lane
    /// count, and buffers holding bits past their remaining lanes.
    pub fn validate(&self) -> Result<(), RngError> {
        if [self.s0, self.s1, self.s2, self.s3] == [0; 4] {
            return Err(RngError::InvalidState(
                "permutation state must not be all zero".to_string(),
            ));
        }

        validate_cache("bool_cache", &self.bool_cache, BOOL_LANES)?;
        validate_cache("byte_cache", &self.byte_cache, BYTE_LANES)?;
        validate_cache("word_cache", &self.word_cache, WORD_LANES)?;

        Ok(())
    }
}

fn validate_cache(name: &str, cache: &LaneCache, width: LaneWidth) -> Result<(), RngError> {
    if cache.remaining > width.lanes {
        return Err(RngError::InvalidState(format!(
            "{} has {} remaining lanes, maximum is {}",
            name, cache.remaining, width.lanes
        )));
    }

    let live_bits = width.bits * cache.remaining as u32;
    if live_bits < u64::BITS && cache.bits >> live_bits != 0 {
        return Err(RngError::InvalidState(format!(
            "{} buffer holds bits beyond its {} remaining lanes",
            name, cache.remaining
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_state() -> EngineState {
        EngineState {
            s0: 1,
            s1: 2,
            s2: 3,
            s3: 4,
            bool_cache: LaneCache::default(),
            byte_cache: LaneCache::default(),
            word_cache: LaneCache::default(),
            pending32: None,
        }
    }

    #[test]
    fn test_valid_state_passes() {
        assert_eq!(valid_state().validate(), Ok(()));
    }

    #[test]
    fn test_all_zero_words_rejected() {
        let state = EngineState {
            s0: 0,
            s1: 0,
            s2: 0,
            s3: 0,
            ..valid_state()
        };
        assert!(matches!(state.validate(), Err(RngError::InvalidState(_))));
    }

    #[test]
    fn test_counter_beyond_lane_count_rejected() {
        let state = EngineState {
            byte_cache: LaneCache {
                remaining: 9,
                bits: 0,
            },
            ..valid_state()
        };
        assert!(matches!(state.validate(), Err(RngError::InvalidState(_))));
    }

    #[test]
    fn test_stale_bits_past_remaining_lanes_rejected() {
        let state = EngineState {
            word_cache: LaneCache {
                remaining: 1,
                bits: 0x1_0000,
            },
            ..valid_state()
        };
        assert!(matches!(state.validate(), Err(RngError::InvalidState(_))));
    }

    #[test]
    fn test_full_bool_cache_accepts_any_bits() {
        let state = EngineState {
            bool_cache: LaneCache {
                remaining: 64,
                bits: u64::MAX,
            },
            ..valid_state()
        };
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn test_parts_round_trip() {
        let state = EngineState {
            pending32: Some(0xDEAD_BEEF),
            ..valid_state()
        };
        let (engine, caches) = state.into_parts().unwrap();
        assert_eq!(EngineState::from_parts(&engine, &caches), state);
    }
}
