use crate::arith::random_prime;
use crate::errors::DJCryptoError;
use crate::keypair::keys::{PrivateKey, PublicKey};
use crate::keypair::params::KeyGenParams;

use rand::RngCore;
use tracing::{debug, trace};

/// Attempts before giving up on finding a usable pair of primes.
const MAX_ATTEMPTS: usize = 10_000;

/// Generates Damgård–Jurik key pairs from an RSA modulus `n = p·q`.
#[derive(Debug, Clone, Copy)]
pub struct KeyGenerator {
    params: KeyGenParams,
}

impl KeyGenerator {
    pub fn try_with(params: KeyGenParams) -> Result<Self, DJCryptoError> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &KeyGenParams {
        &self.params
    }

    /// Samples two distinct primes of half the modulus length and derives the key pair.
    ///
    /// Pairs with `gcd(n, (p-1)(q-1)) != 1` are discarded and resampled.
    pub fn generate<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(PublicKey, PrivateKey), DJCryptoError> {
        let (p_bits, q_bits) = self.params.prime_lengths();
        let certainty = self.params.certainty;

        for attempt in 1..=MAX_ATTEMPTS {
            let p = random_prime(p_bits, certainty, rng)?;
            let q = random_prime(q_bits, certainty, rng)?;

            if p == q {
                trace!(attempt, "sampled equal primes, retrying");
                continue;
            }

            match PrivateKey::from_primes(p, q) {
                Ok(private_key) => {
                    let public_key = private_key.public_key();
                    debug!(
                        attempt,
                        modulus_bits = public_key.modulus().bits(),
                        "generated key pair"
                    );
                    return Ok((public_key, private_key));
                }
                Err(e) => trace!(attempt, error = %e, "discarding prime pair"),
            }
        }

        Err(DJCryptoError::ParameterInvalid(format!(
            "Could not generate a {}-bit modulus after {} attempts",
            self.params.modulus_length, MAX_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_integer::Integer;
    use num_traits::{One, Zero};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_key_validity() -> Result<(), DJCryptoError> {
        let mut rng = StdRng::seed_from_u64(2024);
        let generator = KeyGenerator::try_with(KeyGenParams::try_with(256, 40)?)?;
        let (public_key, private_key) = generator.generate(&mut rng)?;

        let n = public_key.modulus();
        assert_eq!(n.bits(), 256);
        assert!(n.is_odd());
        assert_eq!(&(private_key.p() * private_key.q()), n);
        assert_ne!(private_key.p(), private_key.q());
        assert!((private_key.d_for_s1() % n).is_one());
        assert!((private_key.d_for_s1() % private_key.t()).is_zero());
        Ok(())
    }

    #[test]
    fn test_smallest_modulus() -> Result<(), DJCryptoError> {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = KeyGenerator::try_with(KeyGenParams::try_with(16, 40)?)?;
        for _ in 0..10 {
            let (public_key, private_key) = generator.generate(&mut rng)?;
            assert_eq!(public_key.modulus().bits(), 16);
            assert!(private_key.matches(&public_key));
        }
        Ok(())
    }

    #[test]
    fn test_odd_modulus_length() -> Result<(), DJCryptoError> {
        let mut rng = StdRng::seed_from_u64(9);
        let generator = KeyGenerator::try_with(KeyGenParams::try_with(97, 20)?)?;
        let (public_key, _) = generator.generate(&mut rng)?;
        assert_eq!(public_key.modulus().bits(), 97);
        Ok(())
    }

    #[test]
    fn test_rejects_small_modulus() {
        let params = KeyGenParams {
            modulus_length: 8,
            certainty: 40,
        };
        assert!(matches!(
            KeyGenerator::try_with(params),
            Err(DJCryptoError::ParameterInvalid(_))
        ));
    }
}
