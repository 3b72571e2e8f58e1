//! # Safe primes and Diffie-Hellman
//!
//! Miller-Rabin primality testing, safe prime generation and a textbook
//! Diffie-Hellman key exchange built on top of it.
//!
//! ## Usage
//!
//! ```rust
//! use dh_core::{SearchConfig, exchange, find_domain_parameters};
//! use rand::rngs::OsRng;
//!
//! let params = find_domain_parameters(64, &SearchConfig::default(), &mut OsRng)?;
//! let outcome = exchange(&params.p, &params.g, &mut OsRng)?;
//! assert!(outcome.is_match());
//! # Ok::<(), dh_core::DhError>(())
//! ```
//!
//! Every operation takes its random source as an argument. Anything that
//! implements `rand::RngCore + rand::CryptoRng` is a [`RandomSource`], so
//! tests can pass a seeded `StdRng` and get reproducible searches.
//!
//! Not constant-time and not an authenticated protocol.

pub mod arith;
pub mod config;
pub mod error;
pub mod exchange;
pub mod logging;
pub mod primality;
pub mod random;

pub use arith::mod_pow;
pub use config::{DEFAULT_DH_BITS, DEFAULT_PRIME_BITS, DEFAULT_ROUNDS, SearchConfig};
pub use error::{DhError, Result};
pub use exchange::{
    DomainParameters, ExchangeOutcome, KeyPair, exchange, exchange_with_keys,
    find_domain_parameters, find_generator, find_safe_prime, is_valid_generator,
};
pub use primality::{confidence, decompose, generate_prime, is_probable_prime, random_odd};
pub use random::RandomSource;
