//! Textbook Diffie-Hellman over a safe prime group
//!
//! Domain parameters are a safe prime `p = 2q + 1` and a base `g` with
//! `g^2 != 1` and `g^q != 1` (mod p). Each party picks a private exponent
//! `x` in `[2, p-2]`, publishes `g^x mod p` and raises the peer's public
//! value to `x`. There is no authentication and no constant-time arithmetic.

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, info, warn};

use crate::arith::mod_pow;
use crate::config::SearchConfig;
use crate::error::{DhError, Result};
use crate::primality::{generate_prime, is_probable_prime};
use crate::random::RandomSource;

/// Safe prime modulus `p = 2q + 1` with the prime `q` and the base `g`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl DomainParameters {
    /// Re-checks every invariant: `p = 2q + 1`, both probably prime,
    /// and `g` in `[2, p-2]` passing [`is_valid_generator`].
    pub fn verify<R>(&self, rounds: usize, rng: &mut R) -> bool
    where
        R: RandomSource + ?Sized,
    {
        let two = BigUint::from(2u32);
        self.p == &self.q * 2u32 + 1u32
            && self.g >= two
            && self.g < &self.p - 1u32
            && is_valid_generator(&self.g, &self.p, &self.q)
            && is_probable_prime(&self.q, rounds, rng)
            && is_probable_prime(&self.p, rounds, rng)
    }
}

/// Accepts `g` when neither `g^2` nor `g^q` is 1 mod `p`.
///
/// This is the minimal check for a safe prime group, not a proof that `g`
/// has order `2q`.
pub fn is_valid_generator(g: &BigUint, p: &BigUint, q: &BigUint) -> bool {
    mod_pow(g, &BigUint::from(2u32), p) != BigUint::one() && !mod_pow(g, q, p).is_one()
}

/// Searches a safe prime `p = 2q + 1` where `q` has exactly `bits` bits.
///
/// Returns `(p, q)`. `p` is certified on its own, independently of `q`.
pub fn find_safe_prime<R>(bits: u64, config: &SearchConfig, rng: &mut R) -> Result<(BigUint, BigUint)>
where
    R: RandomSource + ?Sized,
{
    config.validate()?;

    let mut attempts = 0u64;
    loop {
        let q = generate_prime(bits, config, rng)?;
        let p = (&q << 1u32) + 1u32;
        attempts += 1;

        if is_probable_prime(&p, config.rounds, rng) {
            info!(q_bits = bits, p_bits = p.bits(), attempts, "found safe prime");
            return Ok((p, q));
        }
        debug!(attempts, "2q + 1 is composite, drawing a new q");

        if config.exhausted(attempts) {
            warn!(bits, attempts, "giving up on safe prime search");
            return Err(DhError::ExhaustedRetries { attempts });
        }
    }
}

/// Draws random bases in `[2, p-2]` until one passes [`is_valid_generator`].
pub fn find_generator<R>(p: &BigUint, q: &BigUint, config: &SearchConfig, rng: &mut R) -> Result<BigUint>
where
    R: RandomSource + ?Sized,
{
    config.validate()?;
    let (low, high) = exponent_bounds(p)?;

    let mut attempts = 0u64;
    loop {
        let g = rng.random_in_range(&low, &high);
        attempts += 1;

        if is_valid_generator(&g, p, q) {
            info!(attempts, "found generator");
            return Ok(g);
        }
        debug!(attempts, "generator candidate rejected");

        if config.exhausted(attempts) {
            warn!(attempts, "giving up on generator search");
            return Err(DhError::ExhaustedRetries { attempts });
        }
    }
}

/// Finds a safe prime group where `q` has `bits` bits (so `p` has `bits + 1`)
/// and a generator for it.
pub fn find_domain_parameters<R>(bits: u64, config: &SearchConfig, rng: &mut R) -> Result<DomainParameters>
where
    R: RandomSource + ?Sized,
{
    let (p, q) = find_safe_prime(bits, config, rng)?;
    let g = find_generator(&p, &q, config, rng)?;
    Ok(DomainParameters { p, q, g })
}

// Private exponents and bases live in [2, p-2], returned as [low, high).
fn exponent_bounds(p: &BigUint) -> Result<(BigUint, BigUint)> {
    if p < &BigUint::from(5u32) {
        return Err(DhError::InvalidInput(format!(
            "modulus {} leaves no room for exponents in [2, p-2]",
            p
        )));
    }
    Ok((BigUint::from(2u32), p - 1u32))
}

/// One party's key material. The private exponent never leaves this struct.
#[derive(Clone)]
pub struct KeyPair {
    modulus: BigUint,
    private: BigUint,
    public: BigUint,
}

impl KeyPair {
    /// Draws a private exponent uniformly from `[2, p-2]`.
    pub fn generate<R>(p: &BigUint, g: &BigUint, rng: &mut R) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        let (low, high) = exponent_bounds(p)?;
        let private = rng.random_in_range(&low, &high);
        Ok(Self::derive(p, g, private))
    }

    /// Builds a key pair from a chosen private exponent, which must lie in `[2, p-2]`.
    pub fn from_private(p: &BigUint, g: &BigUint, private: BigUint) -> Result<Self> {
        let (low, high) = exponent_bounds(p)?;
        if private < low || private >= high {
            return Err(DhError::InvalidInput(
                "private exponent must lie in [2, p-2]".to_string(),
            ));
        }
        Ok(Self::derive(p, g, private))
    }

    fn derive(p: &BigUint, g: &BigUint, private: BigUint) -> Self {
        let public = mod_pow(g, &private, p);
        Self {
            modulus: p.clone(),
            private,
            public,
        }
    }

    /// `g^x mod p`, the only value meant to be shared.
    pub fn public_value(&self) -> &BigUint {
        &self.public
    }

    /// Raises the peer's public value to our private exponent.
    pub fn shared_secret(&self, peer_public: &BigUint) -> BigUint {
        mod_pow(peer_public, &self.private, &self.modulus)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("modulus", &self.modulus)
            .field("private", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Result of comparing both parties' secrets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Matched(BigUint),
    Mismatched { alice: BigUint, bob: BigUint },
}

impl ExchangeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ExchangeOutcome::Matched(_))
    }
}

/// Lets two existing key pairs swap public values and compares their secrets.
pub fn exchange_with_keys(alice: &KeyPair, bob: &KeyPair) -> ExchangeOutcome {
    let alice_secret = alice.shared_secret(bob.public_value());
    let bob_secret = bob.shared_secret(alice.public_value());

    if alice_secret == bob_secret {
        ExchangeOutcome::Matched(alice_secret)
    } else {
        warn!("shared secrets differ");
        ExchangeOutcome::Mismatched {
            alice: alice_secret,
            bob: bob_secret,
        }
    }
}

/// Runs a full exchange with fresh key pairs for both parties.
pub fn exchange<R>(p: &BigUint, g: &BigUint, rng: &mut R) -> Result<ExchangeOutcome>
where
    R: RandomSource + ?Sized,
{
    let alice = KeyPair::generate(p, g, rng)?;
    let bob = KeyPair::generate(p, g, rng)?;
    debug!(p_bits = p.bits(), "key pairs generated");

    Ok(exchange_with_keys(&alice, &bob))
}
