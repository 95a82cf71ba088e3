//! Element selection and Fisher-Yates shuffle
//!
//! Index draws pick the narrowest bounded draw that covers the span, so a
//! shuffle of a short slice spends cached bytes rather than whole engine
//! steps. The tier boundaries are part of the replay contract.

use crate::error::RngError;
use crate::generator::RngManager;

impl RngManager {
    /// Index in `[lo, hi]`, drawn at the narrowest width covering `hi - lo`
    ///
    /// Spans up to 255 use the 8-bit draw, up to 65535 the 16-bit draw, up
    /// to `i32::MAX` the signed 32-bit draw, and anything wider the 64-bit
    /// draw.
    pub fn bounded_index(&mut self, lo: usize, hi: usize) -> Result<usize, RngError> {
        if hi < lo {
            return Err(RngError::InvalidRange {
                min: lo as i128,
                max: hi as i128,
            });
        }

        let delta = hi - lo;
        let offset = if delta <= u8::MAX as usize {
            self.next_u8_range(0, delta as u8)? as usize
        } else if delta <= u16::MAX as usize {
            self.next_u16_range(0, delta as u16)? as usize
        } else if delta <= i32::MAX as usize {
            self.next_i32_range(0, delta as i32)? as usize
        } else {
            self.next_u64_range(0, delta as u64)? as usize
        };
        Ok(lo + offset)
    }

    /// Uniformly chosen element of `items`
    ///
    /// A single-element slice is returned without consuming entropy.
    ///
    /// # Example
    /// ```
    /// use inclusive_rng::RngManager;
    ///
    /// let mut rng = RngManager::new(12345).unwrap();
    /// let banks = ["BANK_A", "BANK_B", "BANK_C"];
    /// let pick = rng.select_random_element(&banks).unwrap();
    /// assert!(banks.contains(pick));
    /// ```
    pub fn select_random_element<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        match items.len() {
            0 => Err(RngError::EmptyCollection),
            1 => Ok(&items[0]),
            len => {
                let index = self.bounded_index(0, len - 1)?;
                Ok(&items[index])
            }
        }
    }

    /// In-place Fisher-Yates shuffle
    ///
    /// Walks `a` from `len - 2` down to 0, swapping with an index drawn from
    /// `[a, len - 1]`. A single element is left alone with no draws.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyCollection);
        }

        let last = items.len() - 1;
        for a in (0..last).rev() {
            let b = self.bounded_index(a, last)?;
            items.swap(a, b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_span_uses_byte_cache() {
        let mut a = RngManager::new(21).unwrap();
        let mut b = a.clone();
        let index = a.bounded_index(10, 20).unwrap();
        assert_eq!(index, 10 + b.next_u8_range(0, 10).unwrap() as usize);
        assert_eq!(a, b);
    }

    #[test]
    fn test_medium_span_uses_word_cache() {
        let mut a = RngManager::new(21).unwrap();
        let mut b = a.clone();
        let index = a.bounded_index(0, 1000).unwrap();
        assert_eq!(index, b.next_u16_range(0, 1000).unwrap() as usize);
        assert_eq!(a, b);
    }

    #[test]
    fn test_wide_span_uses_i32_draw() {
        let mut a = RngManager::new(21).unwrap();
        let mut b = a.clone();
        let index = a.bounded_index(5, 5 + 100_000).unwrap();
        assert_eq!(index, 5 + b.next_i32_range(0, 100_000).unwrap() as usize);
        assert_eq!(a, b);
    }

    #[test]
    fn test_byte_span_boundary_is_raw_byte() {
        let mut a = RngManager::new(2).unwrap();
        let mut b = a.clone();
        assert_eq!(a.bounded_index(0, 255).unwrap(), b.next_u8() as usize);
    }

    #[test]
    fn test_inverted_index_span_rejected() {
        let mut rng = RngManager::new(2).unwrap();
        assert!(matches!(
            rng.bounded_index(3, 2),
            Err(RngError::InvalidRange { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_two_element_shuffle_draws_once() {
        let mut a = RngManager::new(44).unwrap();
        let mut b = a.clone();
        let mut items = ['x', 'y'];
        a.shuffle(&mut items).unwrap();
        let swap_to = b.next_u8_range(0, 1).unwrap();
        let expected = if swap_to == 0 { ['x', 'y'] } else { ['y', 'x'] };
        assert_eq!(items, expected);
        assert_eq!(a, b);
    }
}
