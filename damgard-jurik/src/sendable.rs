//! Transport representations of keys and ciphertexts.
//!
//! Sendable data is an owned value detached from the key it was generated
//! from. It has two encodings: a colon separated text form
//! (`DamgardJurik:<kind>:<fields>`) through [`SendableData`], and JSON with
//! base64 big integers through `to_json` / `from_json`.

use crate::codec::{biguint_from_decimal, serde_biguint};
use crate::errors::DJCryptoError;
use crate::keypair::{ALGORITHM_NAME, PrivateKey, PublicKey};
use crate::scheme::Ciphertext;

use itertools::Itertools;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

const PUBLIC_KIND: &str = "public";
const PRIVATE_KIND: &str = "private";
const CIPHERTEXT_KIND: &str = "ciphertext";

/// Textual round-trip: `T::from_text(&value.to_text())` reconstructs `value`.
pub trait SendableData: Sized {
    fn to_text(&self) -> String;

    fn from_text(text: &str) -> Result<Self, DJCryptoError>;
}

/// Everything needed to reconstruct a key of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeySendableData {
    Public {
        #[serde(with = "serde_biguint")]
        modulus: BigUint,
    },
    Private {
        #[serde(with = "serde_biguint")]
        p: BigUint,
        #[serde(with = "serde_biguint")]
        q: BigUint,
        #[serde(with = "serde_biguint")]
        t: BigUint,
        #[serde(with = "serde_biguint")]
        d_for_s1: BigUint,
    },
}

/// Everything needed to reconstruct a ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextSendableData {
    #[serde(with = "serde_biguint")]
    pub cipher: BigUint,
    pub s: u32,
}

impl KeySendableData {
    pub fn to_json(&self) -> Result<String, DJCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DJCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CiphertextSendableData {
    pub fn to_json(&self) -> Result<String, DJCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DJCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PublicKey {
    pub fn generate_sendable_data(&self) -> KeySendableData {
        KeySendableData::Public {
            modulus: self.modulus().clone(),
        }
    }
}

impl PrivateKey {
    pub fn generate_sendable_data(&self) -> KeySendableData {
        KeySendableData::Private {
            p: self.p().clone(),
            q: self.q().clone(),
            t: self.t().clone(),
            d_for_s1: self.d_for_s1().clone(),
        }
    }
}

impl Ciphertext {
    pub fn generate_sendable_data(&self) -> CiphertextSendableData {
        CiphertextSendableData {
            cipher: self.value().clone(),
            s: self.length_parameter(),
        }
    }
}

/// Rebuilds a public key; private key data is a `KeyTypeMismatch`.
pub fn reconstruct_public_key(data: &KeySendableData) -> Result<PublicKey, DJCryptoError> {
    match data {
        KeySendableData::Public { modulus } => PublicKey::try_with(modulus.clone()),
        KeySendableData::Private { .. } => Err(DJCryptoError::KeyTypeMismatch(
            "Expected public key data, got private key data".to_string(),
        )),
    }
}

/// Rebuilds a private key; public key data is a `KeyTypeMismatch`.
pub fn reconstruct_private_key(data: &KeySendableData) -> Result<PrivateKey, DJCryptoError> {
    match data {
        KeySendableData::Private { p, q, t, d_for_s1 } => {
            PrivateKey::try_with(p.clone(), q.clone(), t.clone(), d_for_s1.clone())
        }
        KeySendableData::Public { .. } => Err(DJCryptoError::KeyTypeMismatch(
            "Expected private key data, got public key data".to_string(),
        )),
    }
}

pub fn reconstruct_ciphertext(data: &CiphertextSendableData) -> Result<Ciphertext, DJCryptoError> {
    Ciphertext::new(data.cipher.clone(), data.s)
}

/// Splits `text` into its fields after checking the algorithm name.
///
/// Returns `(kind, fields)`.
fn split_text(text: &str) -> Result<(&str, Vec<&str>), DJCryptoError> {
    let mut parts = text.trim().split(':');

    let algorithm = parts.next().unwrap_or_default();
    if algorithm != ALGORITHM_NAME {
        return Err(DJCryptoError::KeyTypeMismatch(format!(
            "Expected {} data, got '{}'",
            ALGORITHM_NAME, algorithm
        )));
    }

    let kind = parts
        .next()
        .ok_or_else(|| DJCryptoError::DecodingError("Missing data kind".to_string()))?;

    Ok((kind, parts.collect()))
}

fn expect_fields(
    fields: &[&str],
    count: usize,
    kind: &str,
) -> Result<Vec<BigUint>, DJCryptoError> {
    if fields.len() != count {
        return Err(DJCryptoError::DecodingError(format!(
            "Expected {} fields for {} data, got {}",
            count,
            kind,
            fields.len()
        )));
    }

    fields.iter().map(|field| biguint_from_decimal(field)).collect()
}

fn join_text(kind: &str, fields: &[&BigUint]) -> String {
    std::iter::once(ALGORITHM_NAME.to_string())
        .chain(std::iter::once(kind.to_string()))
        .chain(fields.iter().map(|field| field.to_string()))
        .join(":")
}

impl SendableData for KeySendableData {
    fn to_text(&self) -> String {
        match self {
            KeySendableData::Public { modulus } => join_text(PUBLIC_KIND, &[modulus]),
            KeySendableData::Private { p, q, t, d_for_s1 } => {
                join_text(PRIVATE_KIND, &[p, q, t, d_for_s1])
            }
        }
    }

    fn from_text(text: &str) -> Result<Self, DJCryptoError> {
        let (kind, fields) = split_text(text)?;

        match kind {
            PUBLIC_KIND => {
                let mut values = expect_fields(&fields, 1, kind)?.into_iter();
                Ok(KeySendableData::Public {
                    modulus: values.next().unwrap_or_default(),
                })
            }
            PRIVATE_KIND => {
                let mut values = expect_fields(&fields, 4, kind)?.into_iter();
                let mut next = || values.next().unwrap_or_default();
                Ok(KeySendableData::Private {
                    p: next(),
                    q: next(),
                    t: next(),
                    d_for_s1: next(),
                })
            }
            other => Err(DJCryptoError::KeyTypeMismatch(format!(
                "Expected key data, got '{}'",
                other
            ))),
        }
    }
}

impl SendableData for CiphertextSendableData {
    fn to_text(&self) -> String {
        join_text(CIPHERTEXT_KIND, &[&BigUint::from(self.s), &self.cipher])
    }

    fn from_text(text: &str) -> Result<Self, DJCryptoError> {
        let (kind, fields) = split_text(text)?;
        if kind != CIPHERTEXT_KIND {
            return Err(DJCryptoError::DecodingError(format!(
                "Expected ciphertext data, got '{}'",
                kind
            )));
        }

        let mut values = expect_fields(&fields, 2, kind)?.into_iter();
        let s = values.next().unwrap_or_default();
        let s = u32::try_from(s).map_err(|e| {
            DJCryptoError::DecodingError(format!("Length parameter out of range: {}", e))
        })?;

        Ok(CiphertextSendableData {
            cipher: values.next().unwrap_or_default(),
            s,
        })
    }
}

impl SendableData for PublicKey {
    fn to_text(&self) -> String {
        self.generate_sendable_data().to_text()
    }

    fn from_text(text: &str) -> Result<Self, DJCryptoError> {
        reconstruct_public_key(&KeySendableData::from_text(text)?)
    }
}

impl SendableData for PrivateKey {
    fn to_text(&self) -> String {
        self.generate_sendable_data().to_text()
    }

    fn from_text(text: &str) -> Result<Self, DJCryptoError> {
        reconstruct_private_key(&KeySendableData::from_text(text)?)
    }
}

impl SendableData for Ciphertext {
    fn to_text(&self) -> String {
        self.generate_sendable_data().to_text()
    }

    fn from_text(text: &str) -> Result<Self, DJCryptoError> {
        reconstruct_ciphertext(&CiphertextSendableData::from_text(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::scheme::MAX_LENGTH_PARAMETER;

    fn fixture() -> Result<PrivateKey, DJCryptoError> {
        PrivateKey::from_primes(BigUint::from(1009u32), BigUint::from(1013u32))
    }

    #[test]
    fn test_public_key_text_roundtrip() -> Result<(), DJCryptoError> {
        let public_key = fixture()?.public_key();
        let text = public_key.to_text();

        assert_eq!(text, "DamgardJurik:public:1022117");
        assert_eq!(PublicKey::from_text(&text)?, public_key);
        Ok(())
    }

    #[test]
    fn test_private_key_text_roundtrip() -> Result<(), DJCryptoError> {
        let private_key = fixture()?;
        let text = private_key.to_text();

        assert!(text.starts_with("DamgardJurik:private:1009:1013:"));
        assert_eq!(PrivateKey::from_text(&text)?, private_key);
        Ok(())
    }

    #[test]
    fn test_ciphertext_text_roundtrip() -> Result<(), DJCryptoError> {
        let ciphertext = Ciphertext::new(BigUint::from(123456789u64), 2)?;
        let text = ciphertext.to_text();

        assert_eq!(text, "DamgardJurik:ciphertext:2:123456789");
        assert_eq!(Ciphertext::from_text(&text)?, ciphertext);
        Ok(())
    }

    #[test]
    fn test_kind_mismatch() -> Result<(), DJCryptoError> {
        let private_key = fixture()?;
        let private_data = private_key.generate_sendable_data();
        let public_data = private_key.public_key().generate_sendable_data();

        assert!(matches!(
            reconstruct_public_key(&private_data),
            Err(DJCryptoError::KeyTypeMismatch(_))
        ));
        assert!(matches!(
            reconstruct_private_key(&public_data),
            Err(DJCryptoError::KeyTypeMismatch(_))
        ));
        assert!(matches!(
            PublicKey::from_text(&private_key.to_text()),
            Err(DJCryptoError::KeyTypeMismatch(_))
        ));
        assert!(matches!(
            PublicKey::from_text("Paillier:public:15"),
            Err(DJCryptoError::KeyTypeMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(
            PublicKey::from_text("DamgardJurik:public"),
            Err(DJCryptoError::DecodingError(_))
        ));
        assert!(matches!(
            PublicKey::from_text("DamgardJurik:public:12x"),
            Err(DJCryptoError::DecodingError(_))
        ));
        assert!(matches!(
            Ciphertext::from_text("DamgardJurik:ciphertext:99999999999:5"),
            Err(DJCryptoError::DecodingError(_))
        ));
        assert!(matches!(
            PrivateKey::from_text("DamgardJurik:private:1009:1013:1:1"),
            Err(DJCryptoError::ParameterInvalid(_))
        ));
    }

    #[test]
    fn test_oversized_length_parameter_is_rejected() -> Result<(), DJCryptoError> {
        assert!(matches!(
            Ciphertext::from_text("DamgardJurik:ciphertext:4294967295:2"),
            Err(DJCryptoError::RangeViolation(_))
        ));

        for s in [MAX_LENGTH_PARAMETER + 1, 1_000_000, u32::MAX] {
            let data = CiphertextSendableData {
                cipher: BigUint::from(2u32),
                s,
            };
            assert!(matches!(
                reconstruct_ciphertext(&data),
                Err(DJCryptoError::RangeViolation(_))
            ));

            let decoded = CiphertextSendableData::from_json(&data.to_json()?)?;
            assert_eq!(decoded.s, s);
            assert!(matches!(
                reconstruct_ciphertext(&decoded),
                Err(DJCryptoError::RangeViolation(_))
            ));
        }

        let data = CiphertextSendableData {
            cipher: BigUint::from(2u32),
            s: MAX_LENGTH_PARAMETER,
        };
        assert_eq!(reconstruct_ciphertext(&data)?.length_parameter(), MAX_LENGTH_PARAMETER);
        Ok(())
    }

    #[test]
    fn test_json_roundtrip() -> Result<(), DJCryptoError> {
        let private_key = fixture()?;

        let data = private_key.generate_sendable_data();
        let json = data.to_json()?;
        assert!(json.contains(r#""kind":"private""#));
        assert_eq!(reconstruct_private_key(&KeySendableData::from_json(&json)?)?, private_key);

        let data = private_key.public_key().generate_sendable_data();
        assert_eq!(KeySendableData::from_json(&data.to_json()?)?, data);

        let data = Ciphertext::new(BigUint::from(77u32), 1)?.generate_sendable_data();
        assert_eq!(CiphertextSendableData::from_json(&data.to_json()?)?, data);

        assert!(matches!(
            KeySendableData::from_json(r#"{"kind":"public","modulus":"%%%"}"#),
            Err(DJCryptoError::SerializationError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_sendable_data_is_detached() -> Result<(), DJCryptoError> {
        let public_key = fixture()?.public_key();
        let mut data = public_key.generate_sendable_data();
        if let KeySendableData::Public { modulus } = &mut data {
            *modulus += 2u32;
        }
        assert_eq!(public_key.modulus(), &BigUint::from(1022117u32));
        Ok(())
    }
}
