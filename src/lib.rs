//! n-of-n aggregate Schnorr-style signing over secp256k1.
//!
//! Every signer contributes a nonce and a partial signature over a fixed
//! roster of public keys; once every roster entry has signed, the partial
//! signatures combine into a single 64-byte signature verifiable against
//! the whole roster and the message, with no single signer's public key
//! ever appearing alone in the final output.
//!
//! # Example
//!
//! ```rust,no_run
//! use secp256k1_aggsig::{Point, Session};
//! use secp256k1::{PublicKey, SecretKey, SECP256K1};
//!
//! let sk1 = SecretKey::from_slice(&[0x11; 32]).unwrap();
//! let sk2 = SecretKey::from_slice(&[0x22; 32]).unwrap();
//! let pk1 = Point::from_public_key(PublicKey::from_secret_key(SECP256K1, &sk1));
//! let pk2 = Point::from_public_key(PublicKey::from_secret_key(SECP256K1, &sk2));
//!
//! let msg = [0x42u8; 32];
//! let mut session = Session::new(vec![pk1, pk2], [7u8; 32]);
//! session.generate_nonce(0).unwrap();
//! session.generate_nonce(1).unwrap();
//!
//! let p1 = session.partial_sign(0, &sk1, &msg).unwrap();
//! let p2 = session.partial_sign(1, &sk2, &msg).unwrap();
//!
//! let sig = session.combine(&[p1, p2]).unwrap();
//! secp256k1_aggsig::verify(&[pk1, pk2], &msg, &sig).unwrap();
//! ```
//!
//! # References
//!
//! - libsecp256k1's `aggsig` module (Poelstra, Wuille), which this crate's
//!   protocol follows faithfully, including its quadratic-residue nonce
//!   canonicalisation and per-index challenge hashing.

mod challenge;
mod error;
mod field;
mod point;
mod rng;
mod scalar;
mod session;
mod verify;

pub use error::{AggsigError, Result};
pub use point::Point;
pub use session::{PartialSignature, Session};
pub use verify::verify;
