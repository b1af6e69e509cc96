//! Implementation of ring ops over big integers using modular arithmetic.

use crate::errors::DJCryptoError;

use super::modular::mod_inverse;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Represents the finite ring Z_k for an arbitrary-precision modulus `k`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ring {
    modulus: BigUint,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: BigUint) -> Result<Self, DJCryptoError> {
        if modulus <= BigUint::one() {
            return Err(DJCryptoError::ParameterInvalid(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use damgard_jurik::arith::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(13u32)).unwrap();
    /// assert_eq!(ring.modulus(), &BigUint::from(13u32));
    /// ```
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns `true` when `value` is a canonical representative, i.e. `value < modulus`.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Returns `true` when `value` is canonical and invertible, i.e. `gcd(value, modulus) == 1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use damgard_jurik::arith::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert!(ring.is_unit(&BigUint::from(3u32)));
    /// assert!(!ring.is_unit(&BigUint::from(4u32)));
    /// assert!(!ring.is_unit(&BigUint::from(0u32)));
    /// assert!(!ring.is_unit(&BigUint::from(13u32)));
    /// ```
    pub fn is_unit(&self, value: &BigUint) -> bool {
        !value.is_zero() && self.contains(value) && value.gcd(&self.modulus).is_one()
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    pub fn normalize(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use damgard_jurik::arith::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.mul(&BigUint::from(7u32), &BigUint::from(5u32)), BigUint::from(5u32));
    /// ```
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes `base^exponent mod modulus`.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// # Errors
    ///
    /// Returns `DJCryptoError::RangeViolation` if `gcd(a, modulus) != 1`.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, DJCryptoError> {
        mod_inverse(a, &self.modulus).ok_or_else(|| {
            DJCryptoError::RangeViolation(format!(
                "Modular inverse does not exist for {} mod {}",
                a, self.modulus
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(modulus: u32) -> Result<Ring, DJCryptoError> {
        Ring::try_with(BigUint::from(modulus))
    }

    #[test]
    fn test_ring_creation() {
        assert!(ring(11).is_ok());
        assert!(ring(25).is_ok());
        assert!(ring(1).is_err());
        assert!(ring(0).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), DJCryptoError> {
        let ring = ring(11)?;
        assert_eq!(ring.normalize(&BigUint::from(16u32)), BigUint::from(5u32));
        assert_eq!(ring.normalize(&BigUint::from(5u32)), BigUint::from(5u32));
        Ok(())
    }

    #[test]
    fn test_multiplication_and_power() -> Result<(), DJCryptoError> {
        let ring = ring(11)?;
        assert_eq!(ring.mul(&BigUint::from(5u32), &BigUint::from(8u32)), BigUint::from(7u32));
        assert_eq!(ring.pow(&BigUint::from(2u32), &BigUint::from(10u32)), BigUint::one());
        Ok(())
    }

    #[test]
    fn test_inversion() -> Result<(), DJCryptoError> {
        let ring = ring(11)?;
        assert_eq!(ring.inv(&BigUint::from(5u32))?, BigUint::from(9u32));

        let composite = Ring::try_with(BigUint::from(12u32))?;
        assert!(matches!(
            composite.inv(&BigUint::from(4u32)),
            Err(DJCryptoError::RangeViolation(_))
        ));
        Ok(())
    }
}
