//! Public generator facade
//!
//! [`RngManager`] owns one xoshiro256** engine plus its sub-word caches and
//! exposes every draw the crate offers. It is a plain value with no interior
//! locking; share it across threads only behind external synchronisation,
//! or give each thread its own independently seeded instance.

use crate::bounded::{lemire_bounded, UniformInt};
use crate::cache::SubwordCaches;
use crate::config::RngConfig;
use crate::engine::Xoshiro256StarStar;
use crate::error::RngError;
use crate::seed::{expand_seed, ClockEntropy, EntropySource};
use crate::state::EngineState;
use log::{debug, warn};

/// Inclusive-range draw for one width
///
/// Fast paths in order: empty span, full span, inverted bounds. The offset
/// `max - min + 1` is formed in a wider signed type, narrowed to the unsigned
/// word, and handed to the width's Lemire routine.
macro_rules! inclusive_range_draw {
    ($(#[$doc:meta])* $name:ident, $raw:ident, $bounded:ident, $t:ty, $u:ty, $wide:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, min: $t, max: $t) -> Result<$t, RngError> {
            if min == max {
                return Ok(min);
            }
            if min == <$t>::MIN && max == <$t>::MAX {
                return Ok(self.$raw());
            }
            if max < min {
                return Err(RngError::InvalidRange {
                    min: min as i128,
                    max: max as i128,
                });
            }

            let range = (max as $wide - min as $wide + 1) as $u;
            let offset = self.$bounded(range);
            Ok((min as $wide + offset as $wide) as $t)
        }
    };
}

/// Deterministic xoshiro256** generator with inclusive-range draws
///
/// # Example
/// ```
/// use inclusive_rng::RngManager;
///
/// let mut rng = RngManager::new(12345).unwrap();
/// let value = rng.next_u64();
/// let die = rng.next_i32_range(1, 6).unwrap(); // [1, 6]
/// assert!((1..=6).contains(&die));
/// # let _ = value;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RngManager {
    engine: Xoshiro256StarStar,
    caches: SubwordCaches,
}

impl RngManager {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a generator from an explicit seed
    ///
    /// # Errors
    /// [`RngError::InvalidSeed`] if expansion produces the all-zero state.
    pub fn new(seed: u64) -> Result<Self, RngError> {
        let engine = Xoshiro256StarStar::from_words(expand_seed(seed)?)?;
        debug!("seeded generator from explicit seed {}", seed);
        Ok(Self {
            engine,
            caches: SubwordCaches::default(),
        })
    }

    /// Create a generator seeded from the wall clock
    ///
    /// Not reproducible; capture the state if the stream must be replayed.
    pub fn from_entropy() -> Result<Self, RngError> {
        Self::with_entropy(&mut ClockEntropy)
    }

    /// Create a generator seeded from `source`
    pub fn with_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, RngError> {
        let seed = source.next_seed();
        debug!("drew seed {} from entropy source", seed);
        Self::new(seed)
    }

    /// Create a generator from a [`RngConfig`], falling back to clock entropy
    pub fn from_config(config: &RngConfig) -> Result<Self, RngError> {
        Self::from_config_with_entropy(config, &mut ClockEntropy)
    }

    /// Create a generator from a [`RngConfig`], falling back to `source`
    pub fn from_config_with_entropy<E: EntropySource + ?Sized>(
        config: &RngConfig,
        source: &mut E,
    ) -> Result<Self, RngError> {
        match config.seed {
            Some(seed) => Self::new(seed),
            None => Self::with_entropy(source),
        }
    }

    /// Resume from a captured snapshot
    ///
    /// # Errors
    /// [`RngError::InvalidState`] if the snapshot fails validation.
    pub fn from_state(state: EngineState) -> Result<Self, RngError> {
        let (engine, caches) = state.into_parts().map_err(|e| {
            warn!("rejected engine state: {}", e);
            e
        })?;
        debug!("restored generator from snapshot");
        Ok(Self { engine, caches })
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Copy out the complete generator state
    pub fn capture_state(&self) -> EngineState {
        EngineState::from_parts(&self.engine, &self.caches)
    }

    /// Replace the generator state with `state`
    ///
    /// Validation happens first; on error the generator is untouched.
    /// Restoring never consumes a draw.
    pub fn restore_state(&mut self, state: EngineState) -> Result<(), RngError> {
        *self = Self::from_state(state)?;
        Ok(())
    }

    // ========================================================================
    // Unbounded draws
    // ========================================================================

    /// One bit from the boolean cache
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.caches.next_bool(&mut self.engine)
    }

    /// `true` with probability `numerator / denominator`
    ///
    /// Short-circuits without entropy for `numerator >= denominator` (always
    /// true) and `numerator <= 0` (always false); an even split uses a single
    /// cached bit.
    pub fn next_bool_with_chance(&mut self, numerator: i32, denominator: i32) -> bool {
        if numerator >= denominator {
            return true;
        }
        if numerator <= 0 {
            return false;
        }
        if numerator == denominator / 2 {
            return self.next_bool();
        }
        // 0 < numerator < denominator, so the draw lies in [0, denominator)
        (self.bounded_u32(denominator as u32) as i32) < numerator
    }

    #[inline]
    pub fn next_u8(&mut self) -> u8 {
        self.caches.next_u8(&mut self.engine)
    }

    #[inline]
    pub fn next_i8(&mut self) -> i8 {
        self.next_u8() as i8
    }

    #[inline]
    pub fn next_u16(&mut self) -> u16 {
        self.caches.next_u16(&mut self.engine)
    }

    #[inline]
    pub fn next_i16(&mut self) -> i16 {
        self.next_u16() as i16
    }

    /// Half of a 64-bit engine step; the high half is returned first
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.caches.next_u32(&mut self.engine)
    }

    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// One full engine step, bypassing every cache
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    #[inline]
    pub fn next_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }

    /// Random f32 in [0.0, 1.0) from the top 24 bits of one engine step
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Random f64 in [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use inclusive_rng::RngManager;
    ///
    /// let mut rng = RngManager::new(12345).unwrap();
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Three f32 components drawn in x, y, z order
    pub fn next_vec3(&mut self) -> [f32; 3] {
        let x = self.next_f32();
        let y = self.next_f32();
        let z = self.next_f32();
        [x, y, z]
    }

    // ========================================================================
    // Inclusive-range draws
    // ========================================================================

    /// Value in `[min, max]` for any supported integer width
    pub fn next_in_range<T: UniformInt>(&mut self, min: T, max: T) -> Result<T, RngError> {
        T::sample_inclusive(self, min, max)
    }

    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_u8_range, next_u8, bounded_u8, u8, u8, i16
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_i8_range, next_i8, bounded_u8, i8, u8, i16
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_u16_range, next_u16, bounded_u16, u16, u16, i32
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_i16_range, next_i16, bounded_u16, i16, u16, i32
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_u32_range, next_u32, bounded_u32, u32, u32, i64
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        ///
        /// # Example
        /// ```
        /// use inclusive_rng::{RngError, RngManager};
        ///
        /// let mut rng = RngManager::new(1).unwrap();
        /// assert_eq!(rng.next_i32_range(5, 5), Ok(5));
        /// assert_eq!(
        ///     rng.next_i32_range(10, -10),
        ///     Err(RngError::InvalidRange { min: 10, max: -10 })
        /// );
        /// ```
        next_i32_range, next_i32, bounded_u32, i32, u32, i64
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_u64_range, next_u64, bounded_u64, u64, u64, i128
    );
    inclusive_range_draw!(
        /// Value in `[min, max]`
        next_i64_range, next_i64, bounded_u64, i64, u64, i128
    );

    #[inline]
    fn bounded_u8(&mut self, range: u8) -> u8 {
        lemire_bounded(range, || self.caches.next_u8(&mut self.engine))
    }

    #[inline]
    fn bounded_u16(&mut self, range: u16) -> u16 {
        lemire_bounded(range, || self.caches.next_u16(&mut self.engine))
    }

    #[inline]
    fn bounded_u32(&mut self, range: u32) -> u32 {
        lemire_bounded(range, || self.caches.next_u32(&mut self.engine))
    }

    #[inline]
    fn bounded_u64(&mut self, range: u64) -> u64 {
        lemire_bounded(range, || self.engine.next_u64())
    }
}
