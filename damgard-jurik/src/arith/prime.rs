//! Probabilistic prime generation for RSA-type moduli.
//!
//! Primality is decided by `num-prime`: strong probable-prime tests to fixed
//! bases, a strong Lucas test and random bases whose count follows the
//! requested certainty.

use super::sampling::random_odd_with_top_bits;
use crate::errors::DJCryptoError;

use num_bigint::BigUint;
use num_prime::PrimalityTestConfig;
use num_prime::nt_funcs::is_prime;
use rand::RngCore;

/// Number of random Miller-Rabin bases giving an error probability of at most `2^-certainty`.
///
/// Each round errs with probability at most 1/4.
pub const fn miller_rabin_rounds(certainty: u32) -> usize {
    let rounds = certainty.div_ceil(2) as usize;
    if rounds == 0 { 1 } else { rounds }
}

fn primality_config(certainty: u32) -> PrimalityTestConfig {
    let mut config = PrimalityTestConfig::default();
    config.sprp_random_trials = miller_rabin_rounds(certainty);
    config.slprp_test = true;
    config
}

/// Returns `true` if `n` is probably prime, with error probability at most `2^-certainty`.
pub fn is_probable_prime(n: &BigUint, certainty: u32) -> bool {
    is_prime(n, Some(primality_config(certainty))).probably()
}

/// Samples a random prime of exactly `bits` bits whose two top bits are set.
///
/// # Errors
///
/// Returns `DJCryptoError::ParameterInvalid` if `bits < 3`.
pub fn random_prime<R: RngCore + ?Sized>(
    bits: u64,
    certainty: u32,
    rng: &mut R,
) -> Result<BigUint, DJCryptoError> {
    if bits < 3 {
        return Err(DJCryptoError::ParameterInvalid(format!(
            "Prime bit length must be at least 3, got {}",
            bits
        )));
    }

    loop {
        let candidate = random_odd_with_top_bits(bits, rng);
        if is_probable_prime(&candidate, certainty) {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_traits::One;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rounds_from_certainty() {
        assert_eq!(miller_rabin_rounds(40), 20);
        assert_eq!(miller_rabin_rounds(41), 21);
        assert_eq!(miller_rabin_rounds(1), 1);
        assert_eq!(miller_rabin_rounds(0), 1);
    }

    #[test]
    fn test_known_primes_and_composites() {
        for prime in [2u64, 3, 1009, 1013, 2003, 104_729, 2_147_483_647, 1_000_000_007] {
            assert!(is_probable_prime(&BigUint::from(prime), 40), "{}", prime);
        }

        // 561 and 41041 are Carmichael numbers, 2047 is a base-2 strong pseudoprime
        for composite in [0u64, 1, 4, 561, 2047, 41_041, 1009 * 1013, 1_000_000_007 * 3] {
            assert!(!is_probable_prime(&BigUint::from(composite), 40), "{}", composite);
        }
    }

    #[test]
    fn test_mersenne_127() {
        let m127 = (BigUint::one() << 127u32) - 1u32;
        assert!(is_probable_prime(&m127, 40));
        assert!(!is_probable_prime(&(&m127 * &m127), 40));
    }

    #[test]
    fn test_random_prime_bit_length() -> Result<(), DJCryptoError> {
        let mut rng = StdRng::seed_from_u64(19);
        for bits in [8u64, 32, 64, 128] {
            let p = random_prime(bits, 40, &mut rng)?;
            assert_eq!(p.bits(), bits);
            assert!(p.bit(bits - 2));
            assert!(is_probable_prime(&p, 40));
        }

        assert!(random_prime(2, 40, &mut rng).is_err());
        Ok(())
    }
}
