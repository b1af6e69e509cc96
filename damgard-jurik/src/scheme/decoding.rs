//! Arithmetic on the `(1+n)` subgroup of `Z*_{n^(s+1)}`.
//!
//! [`one_plus_n_pow`] computes `(1+n)^m mod n^(s+1)` from its binomial
//! expansion, and [`extract_exponent`] inverts it with the recursion of
//! Damgård & Jurik, "A Generalisation, a Simplification and Some Applications
//! of Paillier's Probabilistic Public-Key System", Theorem 1.

use crate::arith::{Ring, mod_inverse};
use crate::errors::DJCryptoError;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// `(1+n)^m mod n^(s+1)` computed as `Σ_{i=0}^{s} C(m, i)·n^i mod n^(s+1)`.
///
/// `ring` must be `Z_{n^(s+1)}`. Terms with `i > s` vanish because `n^i ≡ 0`.
pub fn one_plus_n_pow(n: &BigUint, m: &BigUint, s: u32, ring: &Ring) -> BigUint {
    let mut acc = BigUint::one();
    let mut binomial = BigUint::one();
    let mut n_power = BigUint::one();

    for i in 1..=s {
        let i = BigUint::from(i);
        if m < &i {
            // C(m, i) = 0 from here on
            break;
        }

        // C(m, i) = C(m, i-1)·(m - i + 1) / i, exact at every step
        binomial = binomial * (m - &i + 1u32) / &i;
        n_power *= n;

        acc = ring.normalize(&(acc + ring.mul(&binomial, &n_power)));
    }

    acc
}

/// Recovers `m mod n^s` from `a = (1+n)^m mod n^(s+1)`.
///
/// Digit `j` of the result is fixed from `L(a mod n^(j+1))`, where
/// `L(x) = (x - 1) / n`, after removing the binomial contributions of the
/// lower digits.
pub fn extract_exponent(a: &BigUint, n: &BigUint, s: u32) -> Result<BigUint, DJCryptoError> {
    let s = s as usize;
    let n_int = BigInt::from_biguint(Sign::Plus, n.clone());

    // powers[k] = n^k for k in 0..=s+1
    let mut powers = Vec::with_capacity(s + 2);
    powers.push(BigInt::one());
    for k in 1..=s + 1 {
        powers.push(&powers[k - 1] * &n_int);
    }

    let one = BigInt::one();
    let a_int = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut i = BigInt::zero();

    for j in 1..=s {
        let n_j = &powers[j];

        let a_j = a_int.mod_floor(&powers[j + 1]);
        let mut t1 = ((a_j - &one) / &n_int).mod_floor(n_j);
        let mut t2 = i.clone();
        let mut k_factorial = BigUint::one();

        for k in 2..=j {
            i -= &one;
            t2 = (t2 * &i).mod_floor(n_j);

            k_factorial *= k as u64;
            let k_factorial_inv = factorial_inverse(&k_factorial, n_j)?;

            // t1 = t1 - t2·n^(k-1)·(k!)^-1 mod n^j
            let correction = (&t2 * &powers[k - 1]).mod_floor(n_j) * k_factorial_inv;
            t1 = (t1 - correction).mod_floor(n_j);
        }

        i = t1;
    }

    i.to_biguint().ok_or_else(|| {
        DJCryptoError::RangeViolation("Decoded exponent is negative".to_string())
    })
}

fn factorial_inverse(k_factorial: &BigUint, modulus: &BigInt) -> Result<BigInt, DJCryptoError> {
    let modulus = modulus.magnitude();
    mod_inverse(k_factorial, modulus)
        .map(|inv| BigInt::from_biguint(Sign::Plus, inv))
        .ok_or_else(|| {
            DJCryptoError::ParameterInvalid(format!(
                "{} is not invertible modulo n^j; the length parameter is too large for this key",
                k_factorial
            ))
        })
}
