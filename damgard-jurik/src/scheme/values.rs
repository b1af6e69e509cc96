use crate::codec::{decode_biguint, encode_biguint};
use crate::errors::DJCryptoError;

use num_bigint::BigUint;

/// Largest accepted length parameter `s`. Ciphertexts live modulo `n^(s+1)`,
/// so this bounds the size of every operand the scheme builds.
pub const MAX_LENGTH_PARAMETER: u32 = 256;

/// A plaintext `m`; valid for length parameter `s` when `m < n^s`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plaintext {
    value: BigUint,
}

impl Plaintext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    /// Interprets `bytes` as a big-endian unsigned integer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(decode_biguint(bytes))
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_biguint(&self.value)
    }
}

impl From<BigUint> for Plaintext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Plaintext {
    fn from(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }
}

/// A ciphertext `c ∈ Z*_{n^(s+1)}` together with the length parameter `s` it was produced under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    value: BigUint,
    s: u32,
}

impl Ciphertext {
    /// `s` must lie in `1..=MAX_LENGTH_PARAMETER`. Membership in `Z*_{n^(s+1)}`
    /// is checked by the scheme.
    pub fn new(value: BigUint, s: u32) -> Result<Self, DJCryptoError> {
        if s == 0 {
            return Err(DJCryptoError::ParameterInvalid(
                "Length parameter must be at least 1".to_string(),
            ));
        }
        if s > MAX_LENGTH_PARAMETER {
            return Err(DJCryptoError::RangeViolation(format!(
                "Length parameter {} exceeds the maximum of {}",
                s, MAX_LENGTH_PARAMETER
            )));
        }

        Ok(Self { value, s })
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The length parameter `s` this ciphertext was produced under.
    pub fn length_parameter(&self) -> u32 {
        self.s
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_biguint(&self.value)
    }
}
