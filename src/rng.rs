//! A stateful HMAC-SHA256 deterministic byte generator, in the shape
//! libsecp256k1 uses internally for nonce generation: seeded once from a
//! key and a message, then `generate()`-able repeatedly, redrawing its
//! internal state (`K`, `V`) each time per RFC 6979 section 3.2, steps
//! d/f/g/h. This is the internal DRBG construction only, not full RFC 6979
//! deterministic-k derivation (no DER-encoded message hash or key
//! reduction) — callers that want nonce determinism supply their own seed
//! and personalization bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of extra redraws [`Rfc6979HmacSha256::generate`] attempts before
/// giving up (see [`crate::error::AggsigError::RngExhausted`]).
pub const MAX_REDRAWS: u32 = 128;

pub struct Rfc6979HmacSha256 {
    k: [u8; 32],
    v: [u8; 32],
}

impl Rfc6979HmacSha256 {
    /// Seeds the generator from a key and a message to mix into it (for
    /// this protocol: the signer's secret key and the message being
    /// signed, plus whatever additional personalization the caller mixes
    /// in via `extra`).
    #[must_use]
    pub fn new(key: &[u8], msg: &[u8], extra: &[u8]) -> Self {
        let mut k = [0x00u8; 32];
        let mut v = [0x01u8; 32];

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x00]);
        mac.update(key);
        mac.update(msg);
        mac.update(extra);
        k = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        v = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x01]);
        mac.update(key);
        mac.update(msg);
        mac.update(extra);
        k = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        v = mac.finalize().into_bytes().into();

        Rfc6979HmacSha256 { k, v }
    }

    /// Produces the next 32 output bytes and advances the internal state.
    pub fn generate(&mut self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
        mac.update(&self.v);
        self.v = mac.finalize().into_bytes().into();

        let out = self.v;

        let mut mac = HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
        mac.update(&self.v);
        mac.update(&[0x00]);
        self.k = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
        mac.update(&self.v);
        self.v = mac.finalize().into_bytes().into();

        out
    }
}

impl Drop for Rfc6979HmacSha256 {
    fn drop(&mut self) {
        self.k = [0u8; 32];
        self.v = [0u8; 32];
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
