//! Byte and text encodings for unsigned big integers.
//!
//! Every byte boundary of the crate (public key export, plaintext ingestion,
//! sendable data) goes through [`encode_biguint`] / [`decode_biguint`].

use crate::errors::DJCryptoError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use num_bigint::BigUint;
use num_traits::Zero;

/// Encodes `value` as a minimal big-endian byte sequence.
///
/// Zero is encoded as a single zero byte.
///
/// # Example
///
/// ```
/// # use damgard_jurik::codec::encode_biguint;
/// # use num_bigint::BigUint;
/// assert_eq!(encode_biguint(&BigUint::from(0u32)), vec![0]);
/// assert_eq!(encode_biguint(&BigUint::from(255u32)), vec![255]);
/// assert_eq!(encode_biguint(&BigUint::from(256u32)), vec![1, 0]);
/// ```
pub fn encode_biguint(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return vec![0];
    }

    value.to_bytes_be()
}

/// Decodes a big-endian byte sequence produced by [`encode_biguint`].
///
/// Leading zero bytes are ignored and the empty slice decodes to zero.
///
/// # Example
///
/// ```
/// # use damgard_jurik::codec::decode_biguint;
/// # use num_bigint::BigUint;
/// assert_eq!(decode_biguint(&[1, 0]), BigUint::from(256u32));
/// assert_eq!(decode_biguint(&[0, 0, 7]), BigUint::from(7u32));
/// assert_eq!(decode_biguint(&[]), BigUint::from(0u32));
/// ```
pub fn decode_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Base64 (standard alphabet) of the [`encode_biguint`] bytes.
pub fn biguint_to_base64(value: &BigUint) -> String {
    STANDARD.encode(encode_biguint(value))
}

/// Inverse of [`biguint_to_base64`].
///
/// # Errors
///
/// Returns `DJCryptoError::DecodingError` if `text` is not valid base64.
pub fn biguint_from_base64(text: &str) -> Result<BigUint, DJCryptoError> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| DJCryptoError::DecodingError(format!("Base64 decoding failed: {}", e)))?;

    Ok(decode_biguint(&bytes))
}

/// Parses a decimal field of the textual key/ciphertext grammar.
pub(crate) fn biguint_from_decimal(field: &str) -> Result<BigUint, DJCryptoError> {
    BigUint::parse_bytes(field.as_bytes(), 10).ok_or_else(|| {
        DJCryptoError::DecodingError(format!("'{}' is not a non-negative decimal integer", field))
    })
}

/// Serde adapter carrying a `BigUint` as a base64 string.
///
/// Use with `#[serde(with = "crate::codec::serde_biguint")]`.
pub mod serde_biguint {
    use super::{biguint_from_base64, biguint_to_base64};

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&biguint_to_base64(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        biguint_from_base64(&text).map_err(serde::de::Error::custom)
    }
}
