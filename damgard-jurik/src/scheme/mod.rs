//! The Damgård–Jurik scheme: key binding, encryption, decryption and the
//! homomorphic operations on ciphertexts.

pub mod decoding;
pub mod values;

pub use decoding::{extract_exponent, one_plus_n_pow};
pub use values::{Ciphertext, MAX_LENGTH_PARAMETER, Plaintext};

use crate::arith::{Ring, random_unit};
use crate::codec::encode_biguint;
use crate::errors::DJCryptoError;
use crate::keypair::{ALGORITHM_NAME, KeyGenParams, KeyGenerator, PrivateKey, PublicKey};
use crate::sendable::{self, CiphertextSendableData, KeySendableData};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace};

/// A Damgård–Jurik instance owning its key pair, length parameter and random source.
///
/// # Example
///
/// ```
/// # use damgard_jurik::{DamgardJurik, KeyGenParams, Plaintext};
/// # use rand::SeedableRng;
/// # use rand::rngs::StdRng;
/// let mut scheme = DamgardJurik::new(StdRng::seed_from_u64(7));
/// let (public_key, private_key) = scheme.generate_key(Some(&KeyGenParams::try_with(128, 20)?))?;
/// scheme.set_key(public_key, Some(private_key))?;
///
/// let c1 = scheme.encrypt(&Plaintext::from(20u64))?;
/// let c2 = scheme.encrypt(&Plaintext::from(22u64))?;
/// let sum = scheme.add(&c1, &c2)?;
/// assert_eq!(scheme.decrypt(&sum)?, Plaintext::from(42u64));
/// # Ok::<(), damgard_jurik::DJCryptoError>(())
/// ```
#[derive(Debug)]
pub struct DamgardJurik<R: RngCore> {
    public_key: Option<PublicKey>,
    private_key: Option<PrivateKey>,
    length_parameter: Option<u32>,
    rng: R,
}

impl DamgardJurik<StdRng> {
    /// A scheme seeded from the operating system's entropy source.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> DamgardJurik<R> {
    pub fn new(rng: R) -> Self {
        Self {
            public_key: None,
            private_key: None,
            length_parameter: None,
            rng,
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        ALGORITHM_NAME
    }

    /// Binds a public key and optionally its private key.
    ///
    /// A private key that does not factor the public modulus is rejected and
    /// the previous binding is kept.
    pub fn set_key(
        &mut self,
        public_key: PublicKey,
        private_key: Option<PrivateKey>,
    ) -> Result<(), DJCryptoError> {
        if let Some(private_key) = &private_key {
            if !private_key.matches(&public_key) {
                return Err(DJCryptoError::KeyTypeMismatch(
                    "Private key does not belong to the public key".to_string(),
                ));
            }
        }

        debug!(
            modulus_bits = public_key.modulus().bits(),
            with_private_key = private_key.is_some(),
            "binding key"
        );
        self.public_key = Some(public_key);
        self.private_key = private_key;
        Ok(())
    }

    pub fn is_key_set(&self) -> bool {
        self.public_key.is_some()
    }

    pub fn public_key(&self) -> Result<&PublicKey, DJCryptoError> {
        require_public_key(self.public_key.as_ref())
    }

    /// Fixes `s`. Plaintexts must then satisfy `m < n^s`.
    pub fn set_length_parameter(&mut self, s: u32) -> Result<(), DJCryptoError> {
        if s == 0 || s > MAX_LENGTH_PARAMETER {
            return Err(DJCryptoError::ParameterInvalid(format!(
                "Length parameter must be in 1..={}, got {}",
                MAX_LENGTH_PARAMETER, s
            )));
        }

        self.length_parameter = Some(s);
        Ok(())
    }

    /// Returns to choosing the smallest `s` that fits each plaintext.
    pub fn clear_length_parameter(&mut self) {
        self.length_parameter = None;
    }

    pub fn length_parameter(&self) -> Option<u32> {
        self.length_parameter
    }

    /// Plaintexts of any length are accepted by growing `s`.
    pub fn has_max_byte_array_length_for_plaintext(&self) -> bool {
        false
    }

    pub fn max_length_of_byte_array_for_plaintext(&self) -> Result<usize, DJCryptoError> {
        Err(DJCryptoError::UnsupportedOperation(
            "Damgard-Jurik has no limit on the byte length of a plaintext".to_string(),
        ))
    }

    pub fn generate_plaintext(&self, bytes: &[u8]) -> Plaintext {
        Plaintext::from_bytes(bytes)
    }

    pub fn generate_bytes_from_plaintext(&self, plaintext: &Plaintext) -> Vec<u8> {
        encode_biguint(plaintext.value())
    }

    /// Generates a fresh key pair with the scheme's random source.
    ///
    /// The pair is returned, not bound; pass it to [`set_key`](Self::set_key).
    /// Generation without parameters is not supported.
    pub fn generate_key(
        &mut self,
        params: Option<&KeyGenParams>,
    ) -> Result<(PublicKey, PrivateKey), DJCryptoError> {
        let params = params.ok_or_else(|| {
            DJCryptoError::UnsupportedOperation(
                "Key generation requires explicit KeyGenParams".to_string(),
            )
        })?;

        KeyGenerator::try_with(*params)?.generate(&mut self.rng)
    }

    /// `c = (1+n)^m · r^(n^s) mod n^(s+1)` with a fresh random `r ∈ Z*_n`.
    pub fn encrypt(&mut self, plaintext: &Plaintext) -> Result<Ciphertext, DJCryptoError> {
        let Self {
            public_key,
            length_parameter,
            rng,
            ..
        } = self;
        let public_key = require_public_key(public_key.as_ref())?;
        let s = resolve_length_parameter(public_key, *length_parameter, plaintext.value())?;

        let r = random_unit(public_key.modulus(), rng);
        encrypt_under(public_key, plaintext.value(), s, &r)
    }

    /// Deterministic encryption with a caller supplied `r`, `0 < r < n`, `gcd(r, n) = 1`.
    pub fn encrypt_with(
        &self,
        plaintext: &Plaintext,
        r: &BigUint,
    ) -> Result<Ciphertext, DJCryptoError> {
        let public_key = self.public_key()?;
        require_randomizer(public_key, r)?;
        let s = resolve_length_parameter(public_key, self.length_parameter, plaintext.value())?;

        encrypt_under(public_key, plaintext.value(), s, r)
    }

    /// Recovers `m` from `c` using the ciphertext's own length parameter.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, DJCryptoError> {
        let private_key = self.private_key.as_ref().ok_or_else(|| {
            DJCryptoError::KeyNotSet("Decryption requires a private key".to_string())
        })?;
        let public_key = self.public_key()?;

        let s = ciphertext.length_parameter();
        let ring = public_key.ciphertext_ring(s)?;
        require_unit(&ring, ciphertext)?;

        let d = private_key.decryption_exponent(s)?;
        let a = ring.pow(ciphertext.value(), &d);
        let m = extract_exponent(&a, public_key.modulus(), s)?;

        trace!(s, "decrypted ciphertext");
        Ok(Plaintext::new(m))
    }

    /// Multiplies `c` by a fresh `r^(n^s)`; the plaintext is unchanged.
    pub fn re_randomize(&mut self, ciphertext: &Ciphertext) -> Result<Ciphertext, DJCryptoError> {
        let (public_key, rng) = self.public_key_and_rng()?;
        let ring = public_key.ciphertext_ring(ciphertext.length_parameter())?;
        require_unit(&ring, ciphertext)?;

        let r = random_unit(public_key.modulus(), rng);
        blind(public_key, &ring, ciphertext.value(), ciphertext.length_parameter(), &r)
    }

    pub fn re_randomize_with(
        &self,
        ciphertext: &Ciphertext,
        r: &BigUint,
    ) -> Result<Ciphertext, DJCryptoError> {
        let public_key = self.public_key()?;
        require_randomizer(public_key, r)?;
        let ring = public_key.ciphertext_ring(ciphertext.length_parameter())?;
        require_unit(&ring, ciphertext)?;

        blind(public_key, &ring, ciphertext.value(), ciphertext.length_parameter(), r)
    }

    /// Encryption of `(m1 + m2) mod n^s`. Both ciphertexts must share `s`.
    pub fn add(
        &mut self,
        left: &Ciphertext,
        right: &Ciphertext,
    ) -> Result<Ciphertext, DJCryptoError> {
        let (public_key, rng) = self.public_key_and_rng()?;
        let (ring, product) = sum_operands(public_key, left, right)?;

        let r = random_unit(public_key.modulus(), rng);
        blind(public_key, &ring, &product, left.length_parameter(), &r)
    }

    pub fn add_with(
        &self,
        left: &Ciphertext,
        right: &Ciphertext,
        r: &BigUint,
    ) -> Result<Ciphertext, DJCryptoError> {
        let public_key = self.public_key()?;
        require_randomizer(public_key, r)?;
        let (ring, product) = sum_operands(public_key, left, right)?;

        blind(public_key, &ring, &product, left.length_parameter(), r)
    }

    /// Encryption of `(m·k) mod n^s` for a constant `k ∈ [0, n^s)`.
    pub fn mult_by_const(
        &mut self,
        ciphertext: &Ciphertext,
        constant: &BigUint,
    ) -> Result<Ciphertext, DJCryptoError> {
        let (public_key, rng) = self.public_key_and_rng()?;
        let (ring, power) = scale_operand(public_key, ciphertext, constant)?;

        let r = random_unit(public_key.modulus(), rng);
        blind(public_key, &ring, &power, ciphertext.length_parameter(), &r)
    }

    pub fn mult_by_const_with(
        &self,
        ciphertext: &Ciphertext,
        constant: &BigUint,
        r: &BigUint,
    ) -> Result<Ciphertext, DJCryptoError> {
        let public_key = self.public_key()?;
        require_randomizer(public_key, r)?;
        let (ring, power) = scale_operand(public_key, ciphertext, constant)?;

        blind(public_key, &ring, &power, ciphertext.length_parameter(), r)
    }

    pub fn reconstruct_public_key(&self, data: &KeySendableData) -> Result<PublicKey, DJCryptoError> {
        sendable::reconstruct_public_key(data)
    }

    pub fn reconstruct_private_key(
        &self,
        data: &KeySendableData,
    ) -> Result<PrivateKey, DJCryptoError> {
        sendable::reconstruct_private_key(data)
    }

    pub fn reconstruct_ciphertext(
        &self,
        data: &CiphertextSendableData,
    ) -> Result<Ciphertext, DJCryptoError> {
        sendable::reconstruct_ciphertext(data)
    }

    fn public_key_and_rng(&mut self) -> Result<(&PublicKey, &mut R), DJCryptoError> {
        let public_key = require_public_key(self.public_key.as_ref())?;
        Ok((public_key, &mut self.rng))
    }
}

fn require_public_key(public_key: Option<&PublicKey>) -> Result<&PublicKey, DJCryptoError> {
    public_key.ok_or_else(|| DJCryptoError::KeyNotSet("No public key is bound".to_string()))
}

fn require_unit(ring: &Ring, ciphertext: &Ciphertext) -> Result<(), DJCryptoError> {
    if !ring.is_unit(ciphertext.value()) {
        return Err(DJCryptoError::RangeViolation(format!(
            "Ciphertext is not a unit modulo n^{}",
            ciphertext.length_parameter() + 1
        )));
    }

    Ok(())
}

/// A caller supplied `r` must be a unit of `Z_n`: `0 < r < n`, `gcd(r, n) = 1`.
fn require_randomizer(public_key: &PublicKey, r: &BigUint) -> Result<(), DJCryptoError> {
    let n = public_key.modulus();
    if r >= n || !r.gcd(n).is_one() {
        return Err(DJCryptoError::RangeViolation(
            "Random value must satisfy 0 < r < n and gcd(r, n) = 1".to_string(),
        ));
    }

    Ok(())
}

/// The fixed `s` after checking `m < n^s`, or the smallest `s ≥ 1` with `m < n^s`.
fn resolve_length_parameter(
    public_key: &PublicKey,
    fixed: Option<u32>,
    m: &BigUint,
) -> Result<u32, DJCryptoError> {
    if let Some(s) = fixed {
        if m >= &public_key.modulus_power(s) {
            return Err(DJCryptoError::RangeViolation(format!(
                "Plaintext must be smaller than n^{}",
                s
            )));
        }
        return Ok(s);
    }

    let n = public_key.modulus();
    let mut s = 1;
    let mut bound = n.clone();
    while m >= &bound {
        if s == MAX_LENGTH_PARAMETER {
            return Err(DJCryptoError::RangeViolation(format!(
                "Plaintext does not fit below n^{}",
                MAX_LENGTH_PARAMETER
            )));
        }
        s += 1;
        bound *= n;
    }

    Ok(s)
}

fn encrypt_under(
    public_key: &PublicKey,
    m: &BigUint,
    s: u32,
    r: &BigUint,
) -> Result<Ciphertext, DJCryptoError> {
    let ring = public_key.ciphertext_ring(s)?;
    let g_m = one_plus_n_pow(public_key.modulus(), m, s, &ring);

    trace!(s, "encrypting plaintext");
    blind(public_key, &ring, &g_m, s, r)
}

/// `value · r^(n^s) mod n^(s+1)`. `r` must already be a unit of `Z_n`.
fn blind(
    public_key: &PublicKey,
    ring: &Ring,
    value: &BigUint,
    s: u32,
    r: &BigUint,
) -> Result<Ciphertext, DJCryptoError> {
    let r_to_n_s = ring.pow(r, &public_key.modulus_power(s));
    Ciphertext::new(ring.mul(value, &r_to_n_s), s)
}

fn sum_operands(
    public_key: &PublicKey,
    left: &Ciphertext,
    right: &Ciphertext,
) -> Result<(Ring, BigUint), DJCryptoError> {
    if left.length_parameter() != right.length_parameter() {
        return Err(DJCryptoError::SizeMismatch {
            left: left.length_parameter(),
            right: right.length_parameter(),
        });
    }

    let ring = public_key.ciphertext_ring(left.length_parameter())?;
    require_unit(&ring, left)?;
    require_unit(&ring, right)?;

    let product = ring.mul(left.value(), right.value());
    Ok((ring, product))
}

fn scale_operand(
    public_key: &PublicKey,
    ciphertext: &Ciphertext,
    constant: &BigUint,
) -> Result<(Ring, BigUint), DJCryptoError> {
    let s = ciphertext.length_parameter();
    if constant >= &public_key.modulus_power(s) {
        return Err(DJCryptoError::RangeViolation(format!(
            "Constant must be smaller than n^{}",
            s
        )));
    }

    let ring = public_key.ciphertext_ring(s)?;
    require_unit(&ring, ciphertext)?;

    let power = ring.pow(ciphertext.value(), constant);
    Ok((ring, power))
}
