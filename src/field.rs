//! Base-field arithmetic the `secp256k1` crate does not expose.
//!
//! `secp256k1` gives us validated points and scalar/point tweak arithmetic,
//! but nothing about the *base* field (the field x- and y-coordinates live
//! in, of order the curve prime `p`, as opposed to the *scalar* field of
//! order the curve order `n`). The quadratic-residue canonicalisation this
//! protocol relies on is entirely a base-field notion, so this module
//! implements just enough of it with `num-bigint`, using the same
//! modpow-based technique production secp256k1 wrappers use for scalar
//! inversion, applied to the field prime instead of the group order.

use num_bigint::BigUint;
use num_traits::{One, Zero};

lazy_static::lazy_static! {
    /// The secp256k1 base field prime `p = 2^256 - 2^32 - 977`.
    static ref FIELD_PRIME: BigUint = {
        let two = BigUint::from(2u32);
        two.pow(256) - two.pow(32) - BigUint::from(977u32)
    };
}

fn to_biguint(bytes: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

fn to_be_bytes(x: &BigUint) -> [u8; 32] {
    let be = x.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

/// Euler's criterion: `true` iff `y` is a nonzero quadratic residue mod `p`.
///
/// `y` must already be reduced mod `p`. Only ever called on public
/// coordinates (a curve point's y, or a sqrt candidate), never on secret
/// scalars, so the non-constant-time `BigUint::modpow` is not a
/// side-channel concern here.
pub fn is_quadratic_residue(y: &BigUint) -> bool {
    if y.is_zero() {
        return false;
    }
    let exponent = (&*FIELD_PRIME - BigUint::one()) / BigUint::from(2u32);
    y.modpow(&exponent, &FIELD_PRIME) == BigUint::one()
}

/// `true` iff the given 32-byte big-endian y-coordinate is a quadratic
/// residue mod the field prime.
pub fn y_has_quad_residue(y_bytes: &[u8; 32]) -> bool {
    is_quadratic_residue(&to_biguint(y_bytes))
}

/// Recovers the canonical (quadratic-residue-y) affine point for a given
/// x-coordinate on `y^2 = x^3 + 7`, returning its y-coordinate.
///
/// Returns `None` if `x_bytes` is not canonically reduced mod `p`, or if
/// no curve point exists with that x (i.e. `x^3 + 7` is not itself a
/// quadratic residue).
pub fn quad_y_for_x(x_bytes: &[u8; 32]) -> Option<[u8; 32]> {
    let x = to_biguint(x_bytes);
    if x >= *FIELD_PRIME {
        return None;
    }

    let w = (x.modpow(&BigUint::from(3u32), &FIELD_PRIME) + BigUint::from(7u32)) % &*FIELD_PRIME;
    if !is_quadratic_residue(&w) {
        return None;
    }

    // p ≡ 3 (mod 4) for secp256k1, so a square root of a QR `w` is
    // w^((p+1)/4) mod p. Exactly one of that root and its negation is
    // itself a quadratic residue; that is our canonical y.
    let sqrt_exponent = (&*FIELD_PRIME + BigUint::one()) / BigUint::from(4u32);
    let y0 = w.modpow(&sqrt_exponent, &FIELD_PRIME);

    let y = if is_quadratic_residue(&y0) {
        y0
    } else {
        &*FIELD_PRIME - y0
    };

    Some(to_be_bytes(&y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_x_recovers_a_quad_residue_y() {
        // secp256k1 generator point, a known point on the curve.
        let gx: [u8; 32] = [
            0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87,
            0x0B, 0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B,
            0x16, 0xF8, 0x17, 0x98,
        ];
        let y = quad_y_for_x(&gx).expect("generator x is a valid curve x-coordinate");
        assert!(y_has_quad_residue(&y));
    }

    #[test]
    fn x_equal_to_or_above_prime_is_rejected() {
        let mut bytes = [0xffu8; 32];
        // Definitely >= p, since p < 2^256 - 1.
        bytes[0] = 0xff;
        assert!(quad_y_for_x(&bytes).is_none());
    }

    #[test]
    fn exactly_one_of_y_and_neg_y_is_a_quad_residue() {
        let gx: [u8; 32] = [
            0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87,
            0x0B, 0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B,
            0x16, 0xF8, 0x17, 0x98,
        ];
        let y = quad_y_for_x(&gx).unwrap();
        let neg_y = to_be_bytes(&(&*FIELD_PRIME - to_biguint(&y)));
        assert!(y_has_quad_residue(&y) != y_has_quad_residue(&neg_y));
    }
}
