#[derive(thiserror::Error, Debug)]
pub enum DJCryptoError {
    /// A key of the wrong kind was supplied, or a private key does not belong to the public key.
    #[error("KeyTypeMismatch: {0}")]
    KeyTypeMismatch(String),
    /// The operation needs a key that is not bound to the scheme.
    #[error("KeyNotSet: {0}")]
    KeyNotSet(String),
    /// A plaintext, ciphertext, constant or random value is outside its modulus range.
    #[error("RangeViolation: {0}")]
    RangeViolation(String),
    #[error("SizeMismatch: ciphertexts were produced with length parameters {left} and {right}")]
    SizeMismatch { left: u32, right: u32 },
    #[error("UnsupportedOperation: {0}")]
    UnsupportedOperation(String),
    #[error("InvalidParameters: {0}")]
    ParameterInvalid(String),

    #[error("DecodingError: {0}")]
    DecodingError(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
