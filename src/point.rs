//! Curve points, with the quadratic-residue-y canonicalisation this
//! protocol uses for its aggregate nonce and final signature encoding.

use secp256k1::{PublicKey, SECP256K1};

use crate::error::AggsigError;
use crate::field;
use crate::scalar::Scalar;

/// A point on the curve. Unlike a scalar, a point is always public, so no
/// zeroizing hygiene is needed here.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point(PublicKey);

impl Point {
    #[must_use]
    pub fn generator() -> Self {
        Point(PublicKey::from_secret_key(
            SECP256K1,
            &secp256k1::SecretKey::from_slice(&{
                let mut one = [0u8; 32];
                one[31] = 1;
                one
            })
            .expect("1 is a valid secret key"),
        ))
    }

    #[must_use]
    pub const fn from_public_key(pk: PublicKey) -> Self {
        Point(pk)
    }

    #[must_use]
    pub const fn inner(&self) -> &PublicKey {
        &self.0
    }

    /// The point's x-coordinate, as it appears in a 65-byte uncompressed
    /// serialization.
    #[must_use]
    pub fn x_bytes(&self) -> [u8; 32] {
        let uncompressed = self.0.serialize_uncompressed();
        let mut x = [0u8; 32];
        x.copy_from_slice(&uncompressed[1..33]);
        x
    }

    #[must_use]
    pub fn y_bytes(&self) -> [u8; 32] {
        let uncompressed = self.0.serialize_uncompressed();
        let mut y = [0u8; 32];
        y.copy_from_slice(&uncompressed[33..65]);
        y
    }

    /// `true` iff this point's y-coordinate is a quadratic residue mod the
    /// field prime — the canonical sign this protocol settles on for an
    /// aggregate nonce and a recovered signature point.
    #[must_use]
    pub fn has_quad_residue_y(&self) -> bool {
        field::y_has_quad_residue(&self.y_bytes())
    }

    /// This point, or its negation, whichever has a quadratic-residue y.
    #[must_use]
    pub fn to_quad_residue_y(&self) -> Self {
        if self.has_quad_residue_y() {
            *self
        } else {
            self.negate()
        }
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Point(self.0.negate(SECP256K1))
    }

    /// `self + other`, or `None` if the two points are exact negations of
    /// one another (their sum is the point at infinity, which
    /// `secp256k1::PublicKey` cannot represent).
    ///
    /// For an honest nonce/partial aggregation this is cryptographically
    /// unreachable, the same sense in which a drawn nonce being exactly
    /// zero is unreachable. For [`crate::verify::verify`], which combines
    /// points derived from attacker-controlled signature and message
    /// bytes, this case is reachable and must not panic — `None` there
    /// means the accumulated sum cannot equal the other side of the
    /// verification identity, so the signature is simply invalid.
    #[must_use]
    pub fn add(&self, other: &Self) -> Option<Self> {
        self.0.combine(&other.0).ok().map(Point)
    }

    /// `scalar * self`.
    #[must_use]
    pub fn mul_scalar(&self, scalar: Scalar) -> Option<Self> {
        if scalar.is_zero() {
            return None;
        }
        Some(Point(
            self.0
                .mul_tweak(SECP256K1, &scalar.tweak())
                .expect("product of a nonzero scalar and a valid point"),
        ))
    }

    /// Recovers the quadratic-residue-y point for a given x-coordinate,
    /// as used to turn a signature's `sig64[32..64]` field back into a
    /// usable aggregate-nonce point during verification.
    pub fn from_quad_residue_x(x_bytes: &[u8; 32]) -> Result<Self, AggsigError> {
        let y_bytes = field::quad_y_for_x(x_bytes).ok_or(AggsigError::PointRecovery)?;

        let mut uncompressed = [0u8; 65];
        uncompressed[0] = 0x04;
        uncompressed[1..33].copy_from_slice(x_bytes);
        uncompressed[33..65].copy_from_slice(&y_bytes);

        let pk = PublicKey::from_slice(&uncompressed).map_err(|_| AggsigError::PointRecovery)?;
        Ok(Point(pk))
    }
}

impl From<PublicKey> for Point {
    fn from(pk: PublicKey) -> Self {
        Point(pk)
    }
}
