//! Miller-Rabin primality testing and random prime generation
//!
//! A candidate `n` is tested by writing `n - 1 = d * 2^s` with `d` odd and
//! checking random witnesses `a` in `[2, n-2]`. A composite slips through a
//! single round with probability at most 1/4, so `k` rounds bound the error
//! by `4^-k`. A "composite" verdict is never wrong.

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, info, warn};

use crate::arith::{mod_pow, square_mod};
use crate::config::{MIN_CANDIDATE_BITS, SearchConfig};
use crate::error::{DhError, Result};
use crate::random::RandomSource;

/// Outcome of one Miller-Rabin round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Witness {
    /// `a` proves `n` composite
    Composite,
    /// `a` says nothing, `n` may be prime
    Inconclusive,
}

/// Writes `n - 1` as `d * 2^s` with `d` odd.
///
/// Fails with [`DhError::InvalidInput`] unless `n` is odd and at least 3.
pub fn decompose(n: &BigUint) -> Result<(BigUint, u64)> {
    if n < &BigUint::from(3u32) || !n.bit(0) {
        return Err(DhError::InvalidInput(format!(
            "decomposition needs an odd integer >= 3, got {}",
            n
        )));
    }

    Ok(halve_until_odd(n - 1u32))
}

// Caller guarantees d > 0.
fn halve_until_odd(mut d: BigUint) -> (BigUint, u64) {
    let mut s = 0u64;
    while !d.bit(0) {
        d >>= 1;
        s += 1;
    }
    (d, s)
}

/// Runs one round with witness `a` against `n - 1 = d * 2^s`.
fn check_witness(a: &BigUint, n: &BigUint, n_minus_1: &BigUint, d: &BigUint, s: u64) -> Witness {
    let mut b = mod_pow(a, d, n);
    if b.is_one() || &b == n_minus_1 {
        return Witness::Inconclusive;
    }

    for _ in 1..s {
        b = square_mod(&b, n);
        if &b == n_minus_1 {
            return Witness::Inconclusive;
        }
    }

    Witness::Composite
}

/// Miller-Rabin test with `rounds` random witnesses.
///
/// Returns `false` as soon as one witness proves `n` composite and `true`
/// ("probably prime") when every round is inconclusive.
pub fn is_probable_prime<R>(n: &BigUint, rounds: usize, rng: &mut R) -> bool
where
    R: RandomSource + ?Sized,
{
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    if n == &two || n == &BigUint::from(3u32) {
        return true;
    }
    if !n.bit(0) {
        return false;
    }

    let n_minus_1 = n - 1u32;
    let (d, s) = halve_until_odd(n_minus_1.clone());

    for _ in 0..rounds {
        // a in [2, n-2]
        let a = rng.random_in_range(&two, &n_minus_1);
        if check_witness(&a, n, &n_minus_1, &d, s) == Witness::Composite {
            return false;
        }
    }

    true
}

/// Draws a random odd integer with exactly `bits` bits.
///
/// The top bit is forced to fix the length and the low bit to make it odd.
pub fn random_odd<R>(bits: u64, rng: &mut R) -> Result<BigUint>
where
    R: RandomSource + ?Sized,
{
    if bits < MIN_CANDIDATE_BITS {
        return Err(DhError::InvalidInput(format!(
            "candidates need at least {} bits, got {}",
            MIN_CANDIDATE_BITS, bits
        )));
    }

    let mut candidate = rng.random_bits(bits);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();
    Ok(candidate)
}

/// Generates a probable prime of exactly `bits` bits.
///
/// Retries fresh candidates until one passes `config.rounds` rounds. With
/// `config.max_attempts` set, gives up with [`DhError::ExhaustedRetries`].
pub fn generate_prime<R>(bits: u64, config: &SearchConfig, rng: &mut R) -> Result<BigUint>
where
    R: RandomSource + ?Sized,
{
    config.validate()?;

    let mut attempts = 0u64;
    loop {
        let candidate = random_odd(bits, rng)?;
        attempts += 1;

        if is_probable_prime(&candidate, config.rounds, rng) {
            info!(bits, attempts, "found probable prime");
            return Ok(candidate);
        }
        debug!(bits, attempts, "candidate is composite");

        if config.exhausted(attempts) {
            warn!(bits, attempts, "giving up on prime search");
            return Err(DhError::ExhaustedRetries { attempts });
        }
    }
}

/// Confidence in percent that a number passing `rounds` rounds is prime,
/// `100 * (1 - 0.25^rounds)`.
pub fn confidence(rounds: usize) -> f64 {
    let rounds = i32::try_from(rounds).unwrap_or(i32::MAX);
    100.0 * (1.0 - 0.25f64.powi(rounds))
}
