use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Extended Euclid over signed big integers.
///
/// Returns `(g, x, y)` with `a·x + b·y = g = gcd(a, b)`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Modular inverse of `a` mod `m`, if it exists.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let (g, x, _) = extended_gcd(&a, &m);
    if !g.is_one() {
        return None;
    }

    // x·a ≡ 1 (mod m)
    x.mod_floor(&m).to_biguint()
}

pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

/// Chinese Remainder reconstruction of the unique `x mod m1·m2` with
/// `x ≡ r1 (mod m1)` and `x ≡ r2 (mod m2)`.
///
/// Returns `None` unless `gcd(m1, m2) == 1`.
pub fn crt(r1: &BigUint, m1: &BigUint, r2: &BigUint, m2: &BigUint) -> Option<BigUint> {
    let m1_inv = mod_inverse(m1, m2)?;

    let r1_int = BigInt::from_biguint(Sign::Plus, r1 % m1);
    let r2_int = BigInt::from_biguint(Sign::Plus, r2 % m2);
    let m2_int = BigInt::from_biguint(Sign::Plus, m2.clone());

    // h = (r2 - r1)·m1^-1 mod m2, x = r1 + m1·h
    let diff = (r2_int - r1_int).mod_floor(&m2_int).to_biguint()?;
    let h = (diff * m1_inv) % m2;

    Some(r1 % m1 + m1 * h)
}

/// The decryption exponent `d` with `d ≡ 1 (mod modulus)` and `d ≡ 0 (mod t)`.
pub fn decryption_exponent(modulus: &BigUint, t: &BigUint) -> Option<BigUint> {
    crt(&BigUint::one(), modulus, &BigUint::zero(), t)
}
