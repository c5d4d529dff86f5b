//! Aggregate Signing Demo Application

use secp256k1::{PublicKey, SecretKey, SECP256K1};
use secp256k1_aggsig::{verify, Point, Session};

const SEPARATOR: &str = "======================================================================";
const LINE: &str = "----------------------------------------------------------------------";

fn main() {
    println!("{SEPARATOR}");
    println!("n-of-n Aggregate Signing Demo");
    println!("{SEPARATOR}");
    println!();
    println!("This demonstrates the full aggregate-signing flow:");
    println!("  1. Nonce generation, folded into a running aggregate nonce");
    println!("  2. Partial signing once every signer's nonce is known");
    println!("  3. Combining partial signatures into one 64-byte signature");
    println!("  4. Verifying the aggregate signature against the roster");
    println!();
    println!("Run tests with: cargo test -- --show-output");
    println!();
    println!("{SEPARATOR}");
    println!();

    demo_three_of_three_aggregate_signature();
}

fn demo_three_of_three_aggregate_signature() {
    let mut rng_bytes = [0x01u8; 32];
    let signers: Vec<(SecretKey, Point)> = (0..3u8)
        .map(|i| {
            rng_bytes[31] = i + 1;
            let sk = SecretKey::from_slice(&rng_bytes).expect("nonzero, canonical seed");
            let pk = Point::from_public_key(PublicKey::from_secret_key(SECP256K1, &sk));
            (sk, pk)
        })
        .collect();

    println!("Created 3 signers for a 3-of-3 aggregate signature");
    for (i, (_, pk)) in signers.iter().enumerate() {
        println!(
            "  Signer {} pubkey: {}...",
            i + 1,
            hex::encode(&pk.inner().serialize()[..8])
        );
    }

    let roster: Vec<Point> = signers.iter().map(|(_, pk)| *pk).collect();
    let message = [0x42u8; 32];
    let mut session = Session::new(roster.clone(), [0x99u8; 32]);

    println!("\n{LINE}");
    println!("Step 1: Nonce Generation");
    println!("{LINE}");
    for i in 0..signers.len() {
        let pubnonce = session
            .generate_nonce(i)
            .expect("fresh index, bounded redraw loop");
        println!(
            "  Signer {} pubnonce: {}...",
            i + 1,
            hex::encode(&pubnonce.inner().serialize()[..8])
        );
    }
    println!("  \u{2713} Every signer's nonce folded into the running aggregate");

    println!("\n{LINE}");
    println!("Step 2: Partial Signing");
    println!("{LINE}");
    let mut partials = Vec::with_capacity(signers.len());
    for (i, (sk, _)) in signers.iter().enumerate() {
        let partial = session
            .partial_sign(i, sk, &message)
            .expect("every nonce already generated");
        println!(
            "  Signer {} partial: {}...",
            i + 1,
            hex::encode(&partial.to_bytes()[..8])
        );
        partials.push(partial);
    }

    println!("\n{LINE}");
    println!("Step 3: Combine and Verify");
    println!("{LINE}");
    let sig = session.combine(&partials).expect("every index signed");
    println!("  Aggregate signature: {}", hex::encode(sig));

    match verify(&roster, &message, &sig) {
        Ok(()) => println!("  \u{2713} Signature verifies against the roster and message"),
        Err(e) => println!("  \u{2717} Verification failed: {e}"),
    }

    println!("\n{SEPARATOR}");
    println!("\u{2713} Aggregate signing demonstrated successfully!");
    println!("{SEPARATOR}");
}
