//! Seed expansion and entropy sources
//!
//! A single 64-bit seed is stretched into the four permutation words with
//! splitmix64. Expansion is pure: the only impure input is the optional
//! [`EntropySource`] consulted when no explicit seed is supplied.

use crate::error::RngError;
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_MUL_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_MUL_2: u64 = 0x94D0_49BB_1331_11EB;

/// Advance the accumulator by the golden gamma and return one mixed word
#[inline]
fn splitmix64(acc: &mut u64) -> u64 {
    *acc = acc.wrapping_add(GOLDEN_GAMMA);
    let mut z = *acc;
    z = (z ^ (z >> 30)).wrapping_mul(MIX_MUL_1);
    z = (z ^ (z >> 27)).wrapping_mul(MIX_MUL_2);
    z ^ (z >> 31)
}

/// Expand `seed` into `[s0, s1, s2, s3]`
///
/// # Errors
/// Returns [`RngError::InvalidSeed`] if all four words come out zero.
///
/// # Example
/// ```
/// use inclusive_rng::seed::expand_seed;
///
/// let words = expand_seed(1).unwrap();
/// assert_eq!(words[0], 0x910a2dec89025cc1);
/// ```
pub fn expand_seed(seed: u64) -> Result<[u64; 4], RngError> {
    let mut acc = seed;
    let words = [
        splitmix64(&mut acc),
        splitmix64(&mut acc),
        splitmix64(&mut acc),
        splitmix64(&mut acc),
    ];

    if words == [0; 4] {
        return Err(RngError::InvalidSeed { seed });
    }
    Ok(words)
}

/// Supplies a seed when the caller does not provide one
pub trait EntropySource {
    fn next_seed(&mut self) -> u64;
}

/// Wall-clock entropy: nanoseconds since the UNIX epoch
///
/// Not part of the determinism guarantee. A clock set before the epoch
/// yields 0, which still expands to a valid state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockEntropy;

impl EntropySource for ClockEntropy {
    fn next_seed(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    }
}

/// Always returns the same seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntropy(pub u64);

impl EntropySource for FixedEntropy {
    fn next_seed(&mut self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_seed_one_matches_reference() {
        let words = expand_seed(1).unwrap();
        assert_eq!(
            words,
            [
                0x910a_2dec_8902_5cc1,
                0xbeeb_8da1_658e_ec67,
                0xf893_a2ee_fb32_555e,
                0x71c1_8690_ee42_c90b,
            ]
        );
    }

    #[test]
    fn test_zero_seed_is_accepted() {
        let words = expand_seed(0).unwrap();
        assert_ne!(words, [0; 4]);
        assert_eq!(words[0], 0xe220_a839_7b1d_cdaf);
    }

    #[test]
    fn test_expansion_is_pure() {
        assert_eq!(expand_seed(987_654_321), expand_seed(987_654_321));
        assert_ne!(expand_seed(1), expand_seed(2));
    }

    #[test]
    fn test_fixed_entropy_repeats() {
        let mut source = FixedEntropy(77);
        assert_eq!(source.next_seed(), 77);
        assert_eq!(source.next_seed(), 77);
    }
}
