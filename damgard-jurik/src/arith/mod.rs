//! # Arith Module
//!
//! Big-integer number theory used by the cryptosystem: the [`Ring`] struct for
//! arithmetic modulo `n^(s+1)`, gcd/inverse/CRT helpers, uniform sampling and
//! probabilistic prime generation.

pub mod modular;
pub mod prime;
pub mod ring;
pub mod sampling;

pub use modular::{crt, decryption_exponent, extended_gcd, lcm, mod_inverse};
pub use prime::{is_probable_prime, miller_rabin_rounds, random_prime};
pub use ring::Ring;
pub use sampling::{random_odd_with_top_bits, random_unit};
