//! Randomness used by the prime search and the key exchange.
//!
//! Every operation takes its source as `&mut R`, so production code hands in
//! `rand::rngs::OsRng` while tests pass a seeded `StdRng` or a scripted source.

use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};

/// Source of uniformly distributed big integers
pub trait RandomSource {
    /// Returns a value below `2^bits`.
    fn random_bits(&mut self, bits: u64) -> BigUint;

    /// Returns a value in `[low, high)`. Panics when the range is empty.
    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint;
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn random_bits(&mut self, bits: u64) -> BigUint {
        self.gen_biguint(bits)
    }

    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        self.gen_biguint_range(low, high)
    }
}

/// Replays a fixed list of values, for driving a search down a known path.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: std::collections::VecDeque<BigUint>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new<I: IntoIterator<Item = u64>>(values: I) -> Self {
        Self {
            values: values.into_iter().map(BigUint::from).collect(),
        }
    }

    fn pop(&mut self) -> BigUint {
        self.values.pop_front().expect("scripted source ran dry")
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn random_bits(&mut self, bits: u64) -> BigUint {
        let mask = (BigUint::from(1u32) << bits) - 1u32;
        self.pop() & mask
    }

    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        let value = self.pop();
        assert!(
            low <= &value && &value < high,
            "scripted value {} outside [{}, {})",
            value,
            low,
            high
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_bits_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(rng.random_bits(12).bits() <= 12);
        }
    }

    #[test]
    fn test_random_in_range_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let low = BigUint::from(2u32);
        let high = BigUint::from(5u32);
        for _ in 0..100 {
            let value = rng.random_in_range(&low, &high);
            assert!(value >= low && value < high);
        }
    }

    #[test]
    fn test_scripted_source_replays_in_order() {
        let mut source = ScriptedSource::new([300, 4]);
        // 300 masked to 8 bits
        assert_eq!(source.random_bits(8), BigUint::from(44u32));
        assert_eq!(
            source.random_in_range(&BigUint::from(2u32), &BigUint::from(10u32)),
            BigUint::from(4u32)
        );
    }
}
