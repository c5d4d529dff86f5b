//! Scalar values mod the group order `n`, with secret hygiene baked in.

use core::sync::atomic;
use secp256k1::SecretKey;
use zeroize::Zeroize;

use crate::error::AggsigError;

/// A scalar mod `n`, possibly zero.
///
/// `secp256k1::SecretKey` cannot represent zero, so a scalar that is
/// legitimately zero (a cancelled sum of nonces, say) is represented as
/// `None`. Every arithmetic operation on this type treats zero the way the
/// protocol's modular arithmetic requires, not as an error case.
///
/// This type may hold secret material (a secnonce or a partial signature
/// in progress), so it zeroizes its contents on drop the way the rest of
/// the ecosystem does for `SecretKey`-adjacent wrappers. Zeroizing on drop
/// requires giving up `Copy` (the two are mutually exclusive in Rust), so
/// operations below consume `self` by value and callers `.clone()`
/// explicitly when a value is still needed afterwards.
#[derive(Clone)]
pub struct Scalar(Option<SecretKey>);

impl Scalar {
    /// The additive identity.
    #[must_use]
    pub const fn zero() -> Self {
        Scalar(None)
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// Parses a big-endian scalar, rejecting values `>= n`.
    ///
    /// Zero is accepted and represented as [`Scalar::zero`]; it is not an
    /// overflow.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, AggsigError> {
        let raw = secp256k1::Scalar::from_be_bytes(*bytes).map_err(|_| AggsigError::Overflow)?;
        if raw == secp256k1::Scalar::ZERO {
            Ok(Scalar(None))
        } else {
            let sk = SecretKey::from_slice(bytes)
                .expect("raw is a validated nonzero canonical scalar");
            Ok(Scalar(Some(sk)))
        }
    }

    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        match &self.0 {
            Some(sk) => sk.secret_bytes(),
            None => [0u8; 32],
        }
    }

    /// The crate's general-purpose tweak representation, used to feed this
    /// scalar into `secp256k1`'s point/scalar tweak operations.
    #[must_use]
    pub fn tweak(&self) -> secp256k1::Scalar {
        match &self.0 {
            Some(sk) => secp256k1::Scalar::from(*sk),
            None => secp256k1::Scalar::ZERO,
        }
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        match (&self.0, &other.0) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            (Some(a), Some(b)) => Scalar(a.add_tweak(&secp256k1::Scalar::from(*b)).ok()),
        }
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        match (&self.0, &other.0) {
            (None, _) | (_, None) => Scalar(None),
            (Some(a), Some(b)) => Scalar(Some(
                a.mul_tweak(&secp256k1::Scalar::from(*b))
                    .expect("product of two nonzero scalars mod prime n is nonzero"),
            )),
        }
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Scalar(self.0.map(|sk| sk.negate()))
    }
}

impl From<SecretKey> for Scalar {
    fn from(sk: SecretKey) -> Self {
        Scalar(Some(sk))
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        // SecretKey has no public zeroizing constructor, so we overwrite
        // the whole wrapper with a known-zero value through a volatile
        // write and fence the compiler from reordering past it, matching
        // the pattern used elsewhere in the ecosystem for curve scalars.
        unsafe {
            core::ptr::write_volatile(self, Scalar::zero());
        }
        atomic::compiler_fence(atomic::Ordering::SeqCst);
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_roundtrips() {
        let z = Scalar::from_be_bytes(&[0u8; 32]).unwrap();
        assert!(z.is_zero());
        assert_eq!(z.to_be_bytes(), [0u8; 32]);
    }

    #[test]
    fn overflowing_encoding_is_rejected() {
        // 2^256 - 1, well above the group order n.
        let max = [0xFFu8; 32];
        assert_eq!(Scalar::from_be_bytes(&max).err(), Some(AggsigError::Overflow));
    }

    #[test]
    fn add_cancels_to_zero() {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        let a = Scalar::from_be_bytes(&bytes).unwrap();
        let neg_a = a.negate();
        let sum = a.add(&neg_a);
        assert!(sum.is_zero());
    }

    #[test]
    fn add_with_zero_is_identity() {
        let mut bytes = [0u8; 32];
        bytes[31] = 9;
        let a = Scalar::from_be_bytes(&bytes).unwrap();
        let sum = a.add(&Scalar::zero());
        assert_eq!(sum.to_be_bytes(), a.to_be_bytes());
    }
}
