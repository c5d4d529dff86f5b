//! Aggregate signing session: nonce generation and partial signing for an
//! n-of-n roster of public keys.

use secp256k1::SecretKey;
use zeroize::Zeroize;

use crate::challenge;
use crate::error::{AggsigError, Result};
use crate::point::Point;
use crate::rng::{Rfc6979HmacSha256, MAX_REDRAWS};
use crate::scalar::Scalar;

/// A partial signature: one signer's contribution to the final aggregate
/// `s`-value, before the other signers' contributions are summed in.
#[derive(Clone, Copy, Debug)]
pub struct PartialSignature([u8; 32]);

impl PartialSignature {
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        PartialSignature(bytes)
    }
}

/// Per-index nonce/signing progress.
///
/// `Other` is part of the state machine's design space — a coordinator
/// relaying a remote signer's revealed pubnonce without holding that
/// signer's secnonce — but this session always signs every index locally,
/// so nothing in this crate ever constructs it.
#[derive(Clone)]
enum Progress {
    /// No nonce generated for this index yet.
    Unknown,
    /// We hold the secnonce and have folded its pubnonce into the running
    /// sum; we have not yet produced a partial signature for it.
    Ours(Scalar),
    /// This index has already produced a partial signature.
    #[allow(dead_code)]
    Other,
    Signed,
}

/// An n-of-n aggregate signing session over a fixed roster of public keys.
///
/// Mirrors every signer's state locally: call [`Session::generate_nonce`]
/// for each index to fold its pubnonce into the running aggregate, then
/// [`Session::partial_sign`] for each index once every nonce is known, then
/// [`Session::combine`] to produce the final 64-byte signature.
pub struct Session {
    roster: Vec<Point>,
    progress: Vec<Progress>,
    pubnonce_sum: Option<Point>,
    rng: Rfc6979HmacSha256,
}

impl Session {
    /// Starts a session for the given roster, seeded with `seed` for
    /// nonce-generation entropy.
    ///
    /// Accepts an empty roster; operations that need at least one signer
    /// (`partial_sign`, `combine`) reject it at that point with
    /// [`AggsigError::ArgumentViolation`] instead, since an empty roster is
    /// a usage mistake rather than a constructor-time invariant — nothing
    /// about holding zero entries is unsafe to represent.
    #[must_use]
    pub fn new(roster: Vec<Point>, seed: [u8; 32]) -> Self {
        let progress = vec![Progress::Unknown; roster.len()];
        Session {
            roster,
            progress,
            pubnonce_sum: None,
            rng: Rfc6979HmacSha256::new(&seed, b"aggsig/session-nonce-rng", b""),
        }
    }

    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.roster.len() {
            return Err(AggsigError::ArgumentViolation);
        }
        Ok(())
    }

    /// Generates a secnonce for `index`, folds its quadratic-residue-y
    /// pubnonce into the running aggregate, and returns that pubnonce for
    /// broadcast.
    ///
    /// Draws only from the session's own seeded RNG — independent of any
    /// signer's secret key and of the message that will eventually be
    /// signed, so every index's nonce can be generated and exchanged
    /// before the message is even chosen.
    ///
    /// # Errors
    /// Returns [`AggsigError::ArgumentViolation`] if `index` is out of
    /// range, [`AggsigError::StateViolation`] if a nonce was already
    /// generated for this index, and [`AggsigError::RngExhausted`] if
    /// [`MAX_REDRAWS`] candidate draws all overflowed or hit zero.
    pub fn generate_nonce(&mut self, index: usize) -> Result<Point> {
        self.check_index(index)?;
        if !matches!(self.progress[index], Progress::Unknown) {
            return Err(AggsigError::StateViolation);
        }

        let mut secnonce = None;
        for _ in 0..MAX_REDRAWS {
            let mut candidate = self.rng.generate();
            let parsed = Scalar::from_be_bytes(&candidate);
            candidate.zeroize();
            match parsed {
                Ok(s) if !s.is_zero() => {
                    secnonce = Some(s);
                    break;
                }
                _ => continue,
            }
        }
        let mut secnonce = secnonce.ok_or(AggsigError::RngExhausted)?;

        let mut pubnonce = Point::generator()
            .mul_scalar(secnonce.clone())
            .expect("secnonce is nonzero by construction");

        // Per-term QR-y canonicalisation: if the drawn point lacks a
        // quadratic-residue y, flip both the point and its secnonce before
        // folding it in, so every summand added to `pubnonce_sum` already
        // has QR y (distinct from the separate, aggregate-level flip
        // `partial_sign`/`combine` apply to the *sum*).
        if !pubnonce.has_quad_residue_y() {
            secnonce = secnonce.negate();
            pubnonce = pubnonce.negate();
        }

        self.pubnonce_sum = Some(match &self.pubnonce_sum {
            Some(sum) => sum
                .add(&pubnonce)
                .expect("independently drawn nonces summing to infinity is cryptographically unreachable"),
            None => pubnonce,
        });
        self.progress[index] = Progress::Ours(secnonce);

        Ok(pubnonce)
    }

    /// Produces a partial signature for `index`, using the aggregate
    /// nonce accumulated so far.
    ///
    /// # Errors
    /// Returns [`AggsigError::ArgumentViolation`] if `index` is out of
    /// range, [`AggsigError::StateViolation`] if this index has not had a
    /// nonce generated, has already signed, or any other index in the
    /// roster has not yet generated its nonce (the challenge depends on
    /// the complete aggregate nonce).
    pub fn partial_sign(
        &mut self,
        index: usize,
        seckey: &SecretKey,
        msg: &[u8; 32],
    ) -> Result<PartialSignature> {
        self.check_index(index)?;
        if self
            .progress
            .iter()
            .any(|p| matches!(p, Progress::Unknown))
        {
            return Err(AggsigError::StateViolation);
        }
        let secnonce = match &self.progress[index] {
            Progress::Ours(s) => s.clone(),
            _ => return Err(AggsigError::StateViolation),
        };

        let pubnonce_sum = self.pubnonce_sum.ok_or(AggsigError::StateViolation)?;
        let canonical_nonce = pubnonce_sum.to_quad_residue_y();
        let needs_negation = !pubnonce_sum.has_quad_residue_y();

        let prehash = challenge::prehash(&self.roster, &canonical_nonce, msg);
        let e_bytes = challenge::sighash(u32::try_from(index).unwrap_or(u32::MAX), &prehash);
        let e = Scalar::from_be_bytes(&e_bytes)?;

        let effective_secnonce = if needs_negation {
            secnonce.negate()
        } else {
            secnonce
        };
        let seckey_scalar = Scalar::from(*seckey);
        let partial = effective_secnonce.add(&e.mul(&seckey_scalar));

        self.progress[index] = Progress::Signed;

        Ok(PartialSignature(partial.to_be_bytes()))
    }

    /// Sums every signer's partial signature into the final 64-byte
    /// signature: the summed `s`-scalar followed by the canonical
    /// aggregate nonce's x-coordinate.
    ///
    /// # Errors
    /// Returns [`AggsigError::ArgumentViolation`] if the roster is empty or
    /// `partials.len()` does not match the roster size, and
    /// [`AggsigError::StateViolation`] if any index has not yet produced a
    /// partial signature.
    pub fn combine(&self, partials: &[PartialSignature]) -> Result<[u8; 64]> {
        if self.roster.is_empty() || partials.len() != self.roster.len() {
            return Err(AggsigError::ArgumentViolation);
        }
        if self
            .progress
            .iter()
            .any(|p| !matches!(p, Progress::Signed))
        {
            return Err(AggsigError::StateViolation);
        }

        let mut s = Scalar::zero();
        for partial in partials {
            let term = Scalar::from_be_bytes(&partial.to_bytes())?;
            s = s.add(&term);
        }

        let pubnonce_sum = self.pubnonce_sum.ok_or(AggsigError::StateViolation)?;
        let canonical_nonce = pubnonce_sum.to_quad_residue_y();

        let mut sig64 = [0u8; 64];
        sig64[..32].copy_from_slice(&s.to_be_bytes());
        sig64[32..].copy_from_slice(&canonical_nonce.x_bytes());
        Ok(sig64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::{PublicKey, SECP256K1};

    fn keypair(byte: u8) -> (SecretKey, Point) {
        let mut buf = [0u8; 32];
        buf[31] = byte;
        let sk = SecretKey::from_slice(&buf).unwrap();
        let pk = PublicKey::from_secret_key(SECP256K1, &sk);
        (sk, Point::from_public_key(pk))
    }

    #[test]
    fn full_two_party_round_trip_produces_a_signature() {
        let (sk0, pk0) = keypair(1);
        let (sk1, pk1) = keypair(2);
        let msg = [0x42u8; 32];

        let mut session = Session::new(vec![pk0, pk1], [7u8; 32]);
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();

        let p0 = session.partial_sign(0, &sk0, &msg).unwrap();
        let p1 = session.partial_sign(1, &sk1, &msg).unwrap();

        let sig = session.combine(&[p0, p1]).unwrap();
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn generating_nonce_twice_for_same_index_is_a_state_violation() {
        let (_sk0, pk0) = keypair(3);
        let msg = [1u8; 32];
        let mut session = Session::new(vec![pk0], [9u8; 32]);
        session.generate_nonce(0).unwrap();
        assert_eq!(
            session.generate_nonce(0).unwrap_err(),
            AggsigError::StateViolation
        );
    }

    #[test]
    fn signing_before_all_nonces_known_is_a_state_violation() {
        let (sk0, pk0) = keypair(4);
        let (_sk1, pk1) = keypair(5);
        let msg = [2u8; 32];
        let mut session = Session::new(vec![pk0, pk1], [1u8; 32]);
        session.generate_nonce(0).unwrap();
        assert_eq!(
            session.partial_sign(0, &sk0, &msg).unwrap_err(),
            AggsigError::StateViolation
        );
    }

    #[test]
    fn out_of_range_index_is_an_argument_violation() {
        let (_sk0, pk0) = keypair(6);
        let msg = [3u8; 32];
        let mut session = Session::new(vec![pk0], [2u8; 32]);
        assert_eq!(
            session.generate_nonce(5).unwrap_err(),
            AggsigError::ArgumentViolation
        );
    }

    #[test]
    fn combine_before_every_index_signed_is_a_state_violation() {
        let (sk0, pk0) = keypair(10);
        let (_sk1, pk1) = keypair(11);
        let msg = [5u8; 32];
        let mut session = Session::new(vec![pk0, pk1], [4u8; 32]);
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();
        let p0 = session.partial_sign(0, &sk0, &msg).unwrap();
        assert_eq!(
            session.combine(&[p0]).unwrap_err(),
            AggsigError::ArgumentViolation
        );
    }
}
