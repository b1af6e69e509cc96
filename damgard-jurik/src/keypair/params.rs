use crate::errors::DJCryptoError;

use serde::{Deserialize, Serialize};

/// Default bit length of the RSA modulus `n`.
pub const DEFAULT_MODULUS_LENGTH: u64 = 1024;
/// Default primality certainty: error probability at most `2^-40`.
pub const DEFAULT_CERTAINTY: u32 = 40;
/// Smallest modulus that still holds two distinct half-length primes.
pub const MIN_MODULUS_LENGTH: u64 = 16;

/// Parameters for key generation based on an RSA modulus `n = p·q` of `modulus_length` bits.
///
/// Missing fields fall back to their defaults when deserialized; unknown fields are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyGenParams {
    /// Bit length of the modulus `n`.
    pub modulus_length: u64,
    /// Primality certainty of `p` and `q`; a composite passes with probability at most `2^-certainty`.
    pub certainty: u32,
}

impl Default for KeyGenParams {
    fn default() -> Self {
        Self {
            modulus_length: DEFAULT_MODULUS_LENGTH,
            certainty: DEFAULT_CERTAINTY,
        }
    }
}

impl KeyGenParams {
    /// Creates validated key generation parameters.
    pub fn try_with(modulus_length: u64, certainty: u32) -> Result<Self, DJCryptoError> {
        let params = Self {
            modulus_length,
            certainty,
        };
        params.validate()?;

        Ok(params)
    }

    /// Parses parameters from JSON, e.g. `{"modulus_length": 2048}`.
    pub fn from_json(json: &str) -> Result<Self, DJCryptoError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;

        Ok(params)
    }

    pub fn validate(&self) -> Result<(), DJCryptoError> {
        if self.modulus_length < MIN_MODULUS_LENGTH {
            return Err(DJCryptoError::ParameterInvalid(format!(
                "Modulus length must be at least {} bits, got {}",
                MIN_MODULUS_LENGTH, self.modulus_length
            )));
        }

        if self.certainty == 0 {
            return Err(DJCryptoError::ParameterInvalid(
                "Certainty must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Bit lengths of the two prime factors.
    pub(crate) fn prime_lengths(&self) -> (u64, u64) {
        let p_bits = self.modulus_length / 2;
        (p_bits, self.modulus_length - p_bits)
    }
}
