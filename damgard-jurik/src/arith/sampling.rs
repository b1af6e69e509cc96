//! Uniform sampling of big integers from an injected `RngCore`.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;

/// Returns an element of `Z*_n` uniformly at random. `n` must be greater than one.
pub fn random_unit<R: RngCore + ?Sized>(n: &BigUint, rng: &mut R) -> BigUint {
    let one = BigUint::one();
    loop {
        let candidate = rng.gen_biguint_range(&one, n);
        if candidate.gcd(n).is_one() {
            return candidate;
        }
    }
}

/// Random odd integer of exactly `bits` bits whose two top bits are set.
///
/// Setting both top bits makes the product of two such integers exactly `2·bits` long.
pub fn random_odd_with_top_bits<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> BigUint {
    debug_assert!(bits >= 2, "need at least two bits");

    let mut candidate = rng.gen_biguint(bits);
    candidate.set_bit(bits - 1, true);
    candidate.set_bit(bits - 2, true);
    candidate.set_bit(0, true);

    candidate
}
