//! Modular arithmetic shared by the primality test and the key exchange.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Modular exponentiation: computes (base^exp) mod modulus
/// using square-and-multiply over the bits of `exp`.
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;

    for i in 0..exp.bits() {
        if exp.bit(i) {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
    }

    result
}

/// Computes b^2 mod n
pub fn square_mod(b: &BigUint, n: &BigUint) -> BigUint {
    (b * b) % n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow() {
        let base = BigUint::from(2u32);
        let exp = BigUint::from(10u32);
        let modulus = BigUint::from(1000u32);

        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, BigUint::from(24u32)); // 1024 mod 1000
    }

    #[test]
    fn test_mod_pow_edge_cases() {
        let seven = BigUint::from(7u32);
        assert_eq!(mod_pow(&seven, &BigUint::zero(), &BigUint::from(13u32)), BigUint::one());
        assert_eq!(mod_pow(&seven, &seven, &BigUint::one()), BigUint::zero());
        assert_eq!(mod_pow(&BigUint::zero(), &seven, &BigUint::from(13u32)), BigUint::zero());
    }

    #[test]
    fn test_mod_pow_matches_library_modpow() {
        let modulus = BigUint::parse_bytes(b"170141183460469231731687303715884105727", 10).unwrap();
        for (b, e) in [(3u64, 65537u64), (123_456_789, 987_654_321), (2, 127)] {
            let base = BigUint::from(b);
            let exp = BigUint::from(e);
            assert_eq!(mod_pow(&base, &exp, &modulus), base.modpow(&exp, &modulus));
        }
    }

    #[test]
    fn test_square_mod() {
        assert_eq!(square_mod(&BigUint::from(47u32), &BigUint::from(221u32)), BigUint::from(220u32));
    }
}
