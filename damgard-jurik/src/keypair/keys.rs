use crate::arith::{Ring, decryption_exponent, lcm};
use crate::codec::encode_biguint;
use crate::errors::DJCryptoError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use std::fmt;

/// Algorithm name reported by keys and by the scheme.
pub const ALGORITHM_NAME: &str = "DamgardJurik";

/// Capabilities shared by both key kinds.
pub trait Key {
    fn algorithm(&self) -> &'static str {
        ALGORITHM_NAME
    }

    /// Raw byte export of the key.
    fn encoded(&self) -> Result<Vec<u8>, DJCryptoError>;
}

/// Public key: the RSA modulus `n = p·q`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    modulus: BigUint,
}

/// Private key: the factorization of `n`, the group order `t = lcm(p-1, q-1)`
/// and the exponent `d_for_s1` with `d ≡ 1 (mod n)`, `d ≡ 0 (mod t)`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    p: BigUint,
    q: BigUint,
    t: BigUint,
    d_for_s1: BigUint,
}

impl PublicKey {
    /// The modulus must be odd and greater than one.
    pub fn try_with(modulus: BigUint) -> Result<Self, DJCryptoError> {
        if modulus <= BigUint::one() || modulus.is_even() {
            return Err(DJCryptoError::ParameterInvalid(format!(
                "Public modulus must be an odd integer > 1, got {}",
                modulus
            )));
        }

        Ok(Self { modulus })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `n^exponent`.
    pub fn modulus_power(&self, exponent: u32) -> BigUint {
        self.modulus.pow(exponent)
    }

    /// Z_{n^s}, the plaintext space for length parameter `s`.
    pub fn plaintext_ring(&self, s: u32) -> Result<Ring, DJCryptoError> {
        Ring::try_with(self.modulus_power(s))
    }

    /// Z_{n^(s+1)}, the ciphertext space for length parameter `s`.
    pub fn ciphertext_ring(&self, s: u32) -> Result<Ring, DJCryptoError> {
        let exponent = s.checked_add(1).ok_or_else(|| {
            DJCryptoError::RangeViolation(format!("Length parameter {} is out of range", s))
        })?;
        Ring::try_with(self.modulus_power(exponent))
    }
}

impl Key for PublicKey {
    fn encoded(&self) -> Result<Vec<u8>, DJCryptoError> {
        Ok(encode_biguint(&self.modulus))
    }
}

impl PrivateKey {
    /// Builds the private key from the two prime factors of the modulus.
    ///
    /// `p` and `q` must be distinct odd primes with `gcd(p·q, (p-1)(q-1)) = 1`;
    /// primality itself is not re-checked here.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self, DJCryptoError> {
        let three = BigUint::from(3u32);
        if p < three || q < three || p.is_even() || q.is_even() {
            return Err(DJCryptoError::ParameterInvalid(
                "Prime factors must be odd and at least 3".to_string(),
            ));
        }
        if p == q {
            return Err(DJCryptoError::ParameterInvalid(
                "Prime factors must be distinct".to_string(),
            ));
        }

        let n = &p * &q;
        let p_minus_1 = &p - BigUint::one();
        let q_minus_1 = &q - BigUint::one();

        let t = lcm(&p_minus_1, &q_minus_1);
        let d_for_s1 = decryption_exponent(&n, &t).ok_or_else(|| {
            DJCryptoError::ParameterInvalid(format!(
                "gcd(n, lcm(p-1, q-1)) must be 1 for n = {}",
                n
            ))
        })?;

        Ok(Self {
            p,
            q,
            t,
            d_for_s1,
        })
    }

    /// Builds the private key from all of its fields, checking every relation between them.
    pub fn try_with(
        p: BigUint,
        q: BigUint,
        t: BigUint,
        d_for_s1: BigUint,
    ) -> Result<Self, DJCryptoError> {
        let key = Self::from_primes(p, q)?;

        if key.t != t || key.d_for_s1 != d_for_s1 {
            return Err(DJCryptoError::ParameterInvalid(
                "Group order or decryption exponent does not match the prime factors".to_string(),
            ));
        }

        Ok(key)
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Group order `lcm(p-1, q-1)`.
    pub fn t(&self) -> &BigUint {
        &self.t
    }

    /// Decryption exponent for `s = 1`.
    pub fn d_for_s1(&self) -> &BigUint {
        &self.d_for_s1
    }

    pub fn modulus(&self) -> BigUint {
        &self.p * &self.q
    }

    /// The public key belonging to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            modulus: self.modulus(),
        }
    }

    /// Returns `true` if this private key factors the modulus of `public_key`.
    pub fn matches(&self, public_key: &PublicKey) -> bool {
        &self.modulus() == public_key.modulus()
    }

    /// Decryption exponent `d_s` with `d_s ≡ 1 (mod n^s)` and `d_s ≡ 0 (mod t)`.
    pub fn decryption_exponent(&self, s: u32) -> Result<BigUint, DJCryptoError> {
        if s == 0 {
            return Err(DJCryptoError::ParameterInvalid(
                "Length parameter must be at least 1".to_string(),
            ));
        }
        if s == 1 {
            return Ok(self.d_for_s1.clone());
        }

        let n_s = self.modulus().pow(s);
        decryption_exponent(&n_s, &self.t).ok_or_else(|| {
            DJCryptoError::ParameterInvalid("n^s and the group order are not coprime".to_string())
        })
    }
}

impl Key for PrivateKey {
    fn encoded(&self) -> Result<Vec<u8>, DJCryptoError> {
        Err(DJCryptoError::UnsupportedOperation(
            "Raw byte export of a private key is not supported".to_string(),
        ))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("modulus_bits", &self.modulus().bits())
            .finish_non_exhaustive()
    }
}
