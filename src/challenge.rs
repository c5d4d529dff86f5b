//! Challenge hashing: the roster-wide prehash and each signer's per-index
//! sighash derived from it.

use sha2::{Digest, Sha256};

use crate::point::Point;

/// Encodes `index` as successive 7-bit little-endian limbs, one per byte,
/// with the top bit of every byte left clear — *not* a standard
/// continuation-bit varint. This is a length-prefix-free encoding only
/// because the sighash always appends the fixed-size 32-byte prehash
/// right after it.
///
/// Index 0 encodes to the empty byte string — a deliberate quirk carried
/// over unchanged from the reference implementation this protocol is
/// drawn from: it means index 0's sighash input is identical in shape to
/// a (hypothetical) un-indexed single-signer hash, a collision the
/// protocol accepts rather than guards against.
#[must_use]
pub fn varint7(mut index: u32) -> Vec<u8> {
    let mut out = Vec::new();
    while index > 0 {
        out.push((index & 0x7f) as u8);
        index >>= 7;
    }
    out
}

/// `H0 = SHA256(roster pubkeys compressed, in order ‖ aggregate nonce
/// compressed ‖ message)`, the value every signer's per-index sighash is
/// derived from.
#[must_use]
pub fn prehash(roster: &[Point], aggregate_nonce: &Point, message: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for pk in roster {
        hasher.update(pk.inner().serialize());
    }
    hasher.update(aggregate_nonce.inner().serialize());
    hasher.update(message);
    hasher.finalize().into()
}

/// `e_i = SHA256(varint7(i) ‖ H0)`, the per-signer challenge scalar input.
#[must_use]
pub fn sighash(index: u32, prehash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(varint7(index));
    hasher.update(prehash);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint7_index_zero_is_empty() {
        assert!(varint7(0).is_empty());
    }

    #[test]
    fn varint7_small_indices_are_single_byte() {
        assert_eq!(varint7(1), vec![0x01]);
        assert_eq!(varint7(127), vec![0x7f]);
    }

    #[test]
    fn varint7_has_no_continuation_bit() {
        // 128 = 0b1000_0000 -> low 7 bits 0, then 1; no bit 0x80 is ever set.
        assert_eq!(varint7(128), vec![0x00, 0x01]);
    }

    #[test]
    fn index_zero_and_empty_message_collide() {
        // Documents the accepted quirk: sighash(0, h) depends only on h,
        // indistinguishable from hashing h with no index prefix at all.
        let h = [7u8; 32];
        let mut hasher = Sha256::new();
        hasher.update(h);
        let direct: [u8; 32] = hasher.finalize().into();
        assert_eq!(sighash(0, &h), direct);
    }

    #[test]
    fn different_indices_give_different_sighashes() {
        let h = [9u8; 32];
        assert_ne!(sighash(1, &h), sighash(2, &h));
    }
}
