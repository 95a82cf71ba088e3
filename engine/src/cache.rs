//! Sub-word bit cache
//!
//! Narrow draws slice one 64-bit engine output into lanes instead of
//! spending a full engine step each. How many engine steps a call consumes
//! is observable through snapshots, so refill points are fixed:
//!
//! - 1-bit draws: 64 lanes per refill
//! - 8-bit draws: 8 lanes per refill
//! - 16-bit draws: 4 lanes per refill
//! - 32-bit draws: each output is split in two, high half returned first
//!
//! 64-bit draws never touch a cache.
//!
//! Only [`LaneCache`] is public, as the storage type inside
//! [`EngineState`](crate::EngineState). Lane geometry and the refill logic
//! stay inside the crate:
//!
//! ```compile_fail
//! use inclusive_rng::cache::LaneWidth;
//! ```
//!
//! ```compile_fail
//! use inclusive_rng::cache::BYTE_LANES;
//! ```

use crate::engine::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

/// Lane geometry of one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaneWidth {
    pub(crate) bits: u32,
    pub(crate) lanes: u8,
}

pub(crate) const BOOL_LANES: LaneWidth = LaneWidth { bits: 1, lanes: 64 };
pub(crate) const BYTE_LANES: LaneWidth = LaneWidth { bits: 8, lanes: 8 };
pub(crate) const WORD_LANES: LaneWidth = LaneWidth { bits: 16, lanes: 4 };

/// Remaining lanes plus the buffer they are cut from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneCache {
    pub remaining: u8,
    pub bits: u64,
}

impl LaneCache {
    /// Take the lowest lane, refilling from `engine` when empty
    #[inline]
    pub(crate) fn take(&mut self, width: LaneWidth, engine: &mut Xoshiro256StarStar) -> u64 {
        if self.remaining == 0 {
            self.bits = engine.next_u64();
            self.remaining = width.lanes;
        }

        let lane = self.bits & ((1u64 << width.bits) - 1);
        self.remaining -= 1;
        self.bits >>= width.bits;
        lane
    }
}

/// All sub-word caches owned by one generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct SubwordCaches {
    pub(crate) bool_cache: LaneCache,
    pub(crate) byte_cache: LaneCache,
    pub(crate) word_cache: LaneCache,
    /// Low half of the last split 64-bit draw, if not yet consumed
    pub(crate) pending32: Option<u32>,
}

impl SubwordCaches {
    /// `true` when the consumed bit is 0
    #[inline]
    pub(crate) fn next_bool(&mut self, engine: &mut Xoshiro256StarStar) -> bool {
        self.bool_cache.take(BOOL_LANES, engine) == 0
    }

    #[inline]
    pub(crate) fn next_u8(&mut self, engine: &mut Xoshiro256StarStar) -> u8 {
        self.byte_cache.take(BYTE_LANES, engine) as u8
    }

    #[inline]
    pub(crate) fn next_u16(&mut self, engine: &mut Xoshiro256StarStar) -> u16 {
        self.word_cache.take(WORD_LANES, engine) as u16
    }

    #[inline]
    pub(crate) fn next_u32(&mut self, engine: &mut Xoshiro256StarStar) -> u32 {
        match self.pending32.take() {
            Some(low) => low,
            None => {
                let n = engine.next_u64();
                self.pending32 = Some(n as u32);
                (n >> 32) as u32
            }
        }
    }
}
