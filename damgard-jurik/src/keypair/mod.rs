//! Key material: public/private keys, key generation parameters and the key generator.

pub mod generator;
pub mod keys;
pub mod params;

pub use generator::KeyGenerator;
pub use keys::{ALGORITHM_NAME, Key, PrivateKey, PublicKey};
pub use params::KeyGenParams;
