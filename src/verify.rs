//! Aggregate signature verification.

use crate::challenge;
use crate::error::{AggsigError, Result};
use crate::point::Point;
use crate::scalar::Scalar;

/// Maximum number of roster entries folded into a single accumulator pass
/// before merging into the running total. A simple batching of the
/// multi-scalar sum `sum(e_i * P_i)`, not a windowed Pippenger/Strauss
/// algorithm — chunking bounds how much intermediate state a single pass
/// holds rather than reducing the asymptotic point-multiplication count.
pub const MAX_CHUNK: usize = 16;

/// Returns `Err(())` if two terms in the accumulation land exactly on each
/// other's negation (the running sum would have to represent the point at
/// infinity, which this crate's `Point` cannot). That can only happen for
/// a roster/challenge combination that cannot possibly satisfy the
/// verification identity either, so the caller treats it the same as a
/// failed signature check.
fn chunked_challenge_sum(
    roster: &[Point],
    challenges: &[Scalar],
) -> core::result::Result<Option<Point>, ()> {
    let mut acc: Option<Point> = None;
    let pairs: Vec<(&Point, &Scalar)> = roster.iter().zip(challenges.iter()).collect();
    for chunk in pairs.chunks(MAX_CHUNK) {
        for (p, e) in chunk {
            let Some(term) = p.mul_scalar((*e).clone()) else {
                continue;
            };
            acc = Some(match acc {
                Some(a) => a.add(&term).ok_or(())?,
                None => term,
            });
        }
    }
    Ok(acc)
}

/// Verifies a 64-byte aggregate signature against `roster` and `msg`.
///
/// `sig64` is `s (32 bytes) || R.x (32 bytes, quadratic-residue y)`, the
/// same layout [`crate::session::Session::combine`] produces.
///
/// # Errors
/// Returns [`AggsigError::ArgumentViolation`] for an empty roster,
/// [`AggsigError::PointRecovery`] if `sig64`'s x-coordinate does not
/// recover to a point on the curve, [`AggsigError::Overflow`] if `sig64`'s
/// s-value is not reduced mod n, and [`AggsigError::SignatureInvalid`] if
/// the recovered values are well-formed but the signature does not check
/// out against `roster` and `msg`.
pub fn verify(roster: &[Point], msg: &[u8; 32], sig64: &[u8; 64]) -> Result<()> {
    if roster.is_empty() {
        return Err(AggsigError::ArgumentViolation);
    }

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&sig64[..32]);
    let s = Scalar::from_be_bytes(&s_bytes)?;

    let mut x_bytes = [0u8; 32];
    x_bytes.copy_from_slice(&sig64[32..]);
    let r = Point::from_quad_residue_x(&x_bytes)?;

    let prehash = challenge::prehash(roster, &r, msg);
    let challenges: Vec<Scalar> = (0..roster.len())
        .map(|i| {
            let e_bytes = challenge::sighash(u32::try_from(i).unwrap_or(u32::MAX), &prehash);
            Scalar::from_be_bytes(&e_bytes)
        })
        .collect::<Result<_>>()?;

    let lhs = Point::generator()
        .mul_scalar(s)
        .ok_or(AggsigError::SignatureInvalid)?;

    let rhs = match chunked_challenge_sum(roster, &challenges) {
        Ok(Some(sum)) => r.add(&sum),
        Ok(None) => Some(r),
        Err(()) => None,
    };

    if rhs == Some(lhs) {
        Ok(())
    } else {
        Err(AggsigError::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use secp256k1::{PublicKey, SecretKey, SECP256K1};

    fn keypair(byte: u8) -> (SecretKey, Point) {
        let mut buf = [0u8; 32];
        buf[31] = byte;
        let sk = SecretKey::from_slice(&buf).unwrap();
        let pk = PublicKey::from_secret_key(SECP256K1, &sk);
        (sk, Point::from_public_key(pk))
    }

    #[test]
    fn a_freshly_combined_signature_verifies() {
        let (sk0, pk0) = keypair(21);
        let (sk1, pk1) = keypair(22);
        let (sk2, pk2) = keypair(23);
        let msg = [0x99u8; 32];

        let mut session = Session::new(vec![pk0, pk1, pk2], [3u8; 32]);
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();
        session.generate_nonce(2).unwrap();

        let p0 = session.partial_sign(0, &sk0, &msg).unwrap();
        let p1 = session.partial_sign(1, &sk1, &msg).unwrap();
        let p2 = session.partial_sign(2, &sk2, &msg).unwrap();

        let sig = session.combine(&[p0, p1, p2]).unwrap();
        verify(&[pk0, pk1, pk2], &msg, &sig).unwrap();
    }

    #[test]
    fn a_tampered_message_fails_verification() {
        let (sk0, pk0) = keypair(31);
        let (sk1, pk1) = keypair(32);
        let msg = [0x11u8; 32];
        let wrong_msg = [0x12u8; 32];

        let mut session = Session::new(vec![pk0, pk1], [8u8; 32]);
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();
        let p0 = session.partial_sign(0, &sk0, &msg).unwrap();
        let p1 = session.partial_sign(1, &sk1, &msg).unwrap();
        let sig = session.combine(&[p0, p1]).unwrap();

        assert_eq!(
            verify(&[pk0, pk1], &wrong_msg, &sig).unwrap_err(),
            AggsigError::SignatureInvalid
        );
    }

    #[test]
    fn an_empty_roster_is_rejected() {
        let sig = [0u8; 64];
        assert_eq!(
            verify(&[], &[0u8; 32], &sig).unwrap_err(),
            AggsigError::ArgumentViolation
        );
    }

    #[test]
    fn an_unrecoverable_x_coordinate_is_rejected() {
        let (_, pk0) = keypair(41);
        let mut sig = [0u8; 64];
        sig[32..].copy_from_slice(&[0xffu8; 32]);
        assert_eq!(
            verify(&[pk0], &[0u8; 32], &sig).unwrap_err(),
            AggsigError::PointRecovery
        );
    }
}
