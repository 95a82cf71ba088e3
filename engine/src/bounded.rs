//! Lemire's nearly-divisionless bounded integers
//!
//! One generic routine serves every width. A width plugs in by providing a
//! double-width multiply ([`LemireWord::split_product`]); the raw draw of that
//! width is passed in as a closure so 8/16/32-bit draws keep going through
//! the sub-word caches.
//!
//! # Algorithm
//!
//! For `range` in `[1, 2^W)`: draw `x`, form `m = x * range` at 2W bits.
//! The high W bits are the candidate. Only when the low W bits fall below
//! `range` is the rejection threshold `(2^W - range) mod range` computed,
//! and it is reached by conditional subtraction before falling back to `%`.
//!
//! References:
//! - <https://lemire.me/blog/2019/06/06/nearly-divisionless-random-integer-generation-on-various-systems/>
//! - <https://www.pcg-random.org/posts/bounded-rands.html>

use crate::error::RngError;
use crate::generator::RngManager;
use std::ops::{Rem, Sub};

/// Unsigned word usable by [`lemire_bounded`]
pub trait LemireWord: Copy + Ord + Sub<Output = Self> + Rem<Output = Self> {
    /// Full product as `(low, high)` halves
    fn split_product(self, rhs: Self) -> (Self, Self);

    /// `2^W - self`, modulo `2^W`
    fn wrapping_neg(self) -> Self;
}

macro_rules! impl_lemire_word {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl LemireWord for $t {
                #[inline]
                fn split_product(self, rhs: Self) -> (Self, Self) {
                    let m = self as $wide * rhs as $wide;
                    (m as $t, (m >> <$t>::BITS) as $t)
                }

                #[inline]
                fn wrapping_neg(self) -> Self {
                    <$t>::wrapping_neg(self)
                }
            }
        )*
    };
}

impl_lemire_word!(u8 => u16, u16 => u32, u32 => u64, u64 => u128);

/// `(2^W - range) mod range`
#[inline]
fn rejection_threshold<W: LemireWord>(range: W) -> W {
    let mut t = range.wrapping_neg();
    if t >= range {
        t = t - range;
        if t >= range {
            t = t % range;
        }
    }
    t
}

/// Uniform value in `[0, range)`
///
/// `range` must be non-zero; callers route the empty and full spans
/// elsewhere before reaching here.
#[inline]
pub fn lemire_bounded<W, F>(range: W, mut draw: F) -> W
where
    W: LemireWord,
    F: FnMut() -> W,
{
    let (mut low, mut high) = draw().split_product(range);
    if low < range {
        let t = rejection_threshold(range);
        while low < t {
            (low, high) = draw().split_product(range);
        }
    }
    high
}

/// Integer types that support inclusive-range draws
///
/// # Example
/// ```
/// use inclusive_rng::RngManager;
///
/// let mut rng = RngManager::new(7).unwrap();
/// let roll: i32 = rng.next_in_range(1, 6).unwrap();
/// assert!((1..=6).contains(&roll));
/// ```
pub trait UniformInt: Copy + PartialOrd {
    fn sample_inclusive(rng: &mut RngManager, min: Self, max: Self) -> Result<Self, RngError>;
}

macro_rules! impl_uniform_int {
    ($($t:ty => $method:ident),* $(,)?) => {
        $(
            impl UniformInt for $t {
                #[inline]
                fn sample_inclusive(
                    rng: &mut RngManager,
                    min: Self,
                    max: Self,
                ) -> Result<Self, RngError> {
                    rng.$method(min, max)
                }
            }
        )*
    };
}

impl_uniform_int!(
    u8 => next_u8_range,
    i8 => next_i8_range,
    u16 => next_u16_range,
    i16 => next_i16_range,
    u32 => next_u32_range,
    i32 => next_i32_range,
    u64 => next_u64_range,
    i64 => next_i64_range,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_matches_modulo_definition() {
        for range in 1u8..=255 {
            let expected = ((256u32 - range as u32) % range as u32) as u8;
            assert_eq!(rejection_threshold(range), expected, "range {}", range);
        }
        for range in [1u64, 2, 3, 7, 1 << 40, u64::MAX - 1, u64::MAX] {
            let expected = ((1u128 << 64) - range as u128) % range as u128;
            assert_eq!(rejection_threshold(range) as u128, expected);
        }
    }

    #[test]
    fn test_rejects_low_product_below_threshold() {
        // range 3 over u8: threshold is 256 % 3 == 1, so x == 0 (low 0) is rejected
        let script = [0u8, 1];
        let mut used = 0;
        let value = lemire_bounded(3u8, || {
            used += 1;
            script[used - 1]
        });
        assert_eq!(value, 0);
        assert_eq!(used, 2);
    }

    #[test]
    fn test_accepts_without_redraw() {
        // 255 * 3 = 0x2FD -> low 0xFD, high 2
        let mut used = 0;
        let value = lemire_bounded(3u8, || {
            used += 1;
            255
        });
        assert_eq!(value, 2);
        assert_eq!(used, 1);
    }

    #[test]
    fn test_power_of_two_range_never_redraws() {
        let mut used = 0;
        let value = lemire_bounded(1024u16, || {
            used += 1;
            0
        });
        assert_eq!(value, 0);
        assert_eq!(used, 1);
    }

    #[test]
    fn test_exhaustive_u8_is_exactly_uniform() {
        // Every accepted x maps onto [0, range) with equal multiplicity
        for range in [3u8, 5, 6, 7, 10, 100, 200, 255] {
            let t = rejection_threshold(range);
            let mut counts = vec![0u32; range as usize];
            for x in 0u8..=255 {
                let (low, high) = x.split_product(range);
                if low >= t {
                    counts[high as usize] += 1;
                }
            }
            let first = counts[0];
            assert!(counts.iter().all(|&c| c == first), "range {}", range);
        }
    }

    #[test]
    fn test_split_product_splits_halves() {
        assert_eq!(0xFFu8.split_product(0xFF), (0x01, 0xFE));
        assert_eq!(u64::MAX.split_product(2), (u64::MAX - 1, 1));
    }
}
