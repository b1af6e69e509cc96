pub mod arith;
pub mod circuit;
pub mod codec;
pub mod errors;
pub mod keypair;
pub mod scheme;
pub mod sendable;

pub use errors::DJCryptoError;
pub use keypair::{Key, KeyGenParams, KeyGenerator, PrivateKey, PublicKey};
pub use scheme::{Ciphertext, DamgardJurik, Plaintext};
pub use sendable::{CiphertextSendableData, KeySendableData, SendableData};
