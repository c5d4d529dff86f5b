//! Error types for the aggregate signing protocol

use std::fmt;

/// Result type alias for aggsig operations
pub type Result<T> = std::result::Result<T, AggsigError>;

/// Aggregate-signing protocol errors
///
/// Every fallible operation in this crate returns one of these variants
/// instead of panicking; the only `expect()`s left in the implementation
/// are on curve operations that are mathematically infallible given
/// already-validated operands, matching the non-panicking discipline of
/// the underlying `secp256k1` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggsigError {
    /// Out-of-range index, roster/partials length mismatch, or an empty
    /// roster passed where at least one signer is required.
    ArgumentViolation,

    /// The nonce-progress state machine was violated: a nonce was used
    /// before every index was known, an index was signed twice, or
    /// `generate_nonce`/`partial_sign` targeted an index not in the
    /// expected state.
    StateViolation,

    /// A 32-byte scalar (partial signature, aggregate signature, or
    /// per-index challenge) encoded an integer `>= n`.
    Overflow,

    /// `sig64`'s x-coordinate is not a canonical field element, is not
    /// the x-coordinate of any point on the curve, or no
    /// quadratic-residue-y point exists for it.
    PointRecovery,

    /// `verify` completed without error but the signature did not check
    /// out against the roster and message.
    SignatureInvalid,

    /// The nonce redraw loop exceeded its safety-belt bound without
    /// producing a valid nonzero, non-overflowing scalar. Cryptographically
    /// unreachable for an HMAC-SHA256-derived generator; treated as a
    /// configuration/entropy-source error rather than a protocol one.
    RngExhausted,
}

impl fmt::Display for AggsigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentViolation => write!(f, "invalid argument (index, length, or empty roster)"),
            Self::StateViolation => write!(f, "nonce-progress state machine violation"),
            Self::Overflow => write!(f, "scalar encoding is not reduced modulo the group order"),
            Self::PointRecovery => {
                write!(f, "could not recover a quadratic-residue-y point for the given x-coordinate")
            }
            Self::SignatureInvalid => {
                write!(f, "signature does not verify against the given message and roster")
            }
            Self::RngExhausted => write!(f, "nonce RNG redraw bound exceeded"),
        }
    }
}

impl std::error::Error for AggsigError {}

impl From<secp256k1::Error> for AggsigError {
    fn from(_: secp256k1::Error) -> Self {
        Self::Overflow
    }
}
