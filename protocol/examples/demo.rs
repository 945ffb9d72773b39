//! Interactive demo of the SIGIL identity lifecycle.
//!
//! Walks through key generation, meta derivation, address and identifier
//! construction, self-certification, and an encrypted-and-signed message
//! exchange between two freshly minted identities.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use sigil_protocol::crypto::cipher::{AesKey, Cipher};
use sigil_protocol::crypto::keys::{Encryptor, RsaPrivateKey, Signer, Verifier};
use sigil_protocol::identity::{Identifier, Meta, MetaVersion, NetworkType};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";
const BG_BLUE: &str = "\x1b[44m";

fn banner() {
    println!();
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    SIGIL PROTOCOL  --  Identity Lifecycle Demo           {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    RSA + HASH-160 + Base58Check                          {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]===================================================={RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    println!("{DIM}  [{label}: {:.2} ms]{RESET}", elapsed.as_secs_f64() * 1000.0);
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    banner();

    // Step 1: key material.
    section(1, "Key Generation");
    let t = Instant::now();
    let alice_sk = RsaPrivateKey::generate(1024).expect("keygen");
    let bob_sk = RsaPrivateKey::generate(1024).expect("keygen");
    timing("RSA keygen x2", t.elapsed());
    info("Algorithm", alice_sk.algorithm());
    success("Two keypairs minted from the OS RNG");

    // Step 2: meta derivation.
    section(2, "Meta Derivation (MKM)");
    let t = Instant::now();
    let alice_meta = Meta::generate(&alice_sk, "alice", MetaVersion::Mkm).expect("meta");
    let bob_meta = Meta::generate(&bob_sk, "bob", MetaVersion::Mkm).expect("meta");
    timing("derive x2", t.elapsed());
    info(
        "Fingerprint",
        &format!("{} bytes (signature over the seed)", alice_meta.fingerprint().len()),
    );
    success("Seed names bound into fingerprints");

    // Step 3: identifiers.
    section(3, "Address & Identifier Construction");
    let alice_id = alice_meta.build_id(NetworkType::Main);
    let bob_id = bob_meta.build_id(NetworkType::Main);
    info("Alice", &alice_id.to_string());
    info("Bob", &bob_id.to_string());
    info("Alice's number", &alice_id.number().to_string());
    success("Addresses encoded: network byte + HASH-160 digest + checksum");

    // Step 4: self-certification.
    section(4, "Self-Certification");
    let parsed: Identifier = alice_id.to_string().parse().expect("parse");
    assert!(alice_meta.matches_id(&parsed));
    assert!(!bob_meta.matches_id(&parsed));
    success("Parsed identifier re-derives from Alice's meta — and only hers");

    // Step 5: hybrid message exchange.
    section(5, "Encrypted & Signed Exchange");
    let t = Instant::now();
    let session = AesKey::generate(256).expect("session key");
    let sealed = session.encrypt(b"hello bob, it's really alice").expect("encrypt");
    let key_record = serde_json::to_vec(&session).expect("export");
    let wrapped_key = bob_sk.public_key().encrypt(&key_record).expect("wrap");
    let signature = alice_sk.sign(&sealed).expect("sign");
    timing("seal + wrap + sign", t.elapsed());

    assert!(alice_sk.public_key().verify(&sealed, &signature));
    info("Payload", &format!("{} bytes sealed under AES-256-CBC", sealed.len()));
    info("Session key", &format!("{} bytes wrapped under Bob's RSA key", wrapped_key.len()));
    success("Bob can unwrap, verify, and read; nobody else can");

    println!();
    println!("{BOLD}{GREEN}Demo complete.{RESET}");
    println!();
}
