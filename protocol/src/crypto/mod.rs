//! # Cryptographic Primitives for SIGIL
//!
//! Everything security-related the identity scheme consumes, wrapped once,
//! in one place. The derivation pipeline upstairs treats these as opaque
//! collaborators with fixed input/output contracts:
//!
//! - **RSA** for signatures and key transport — the fingerprint inside
//!   every name-bearing address is an RSA signature.
//! - **AES-CBC/PKCS#7** for symmetric payloads, explicit IV.
//! - **SHA-256 + RIPEMD-160** for the address digest and checksum.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! RustCrypto implementations. The value this module adds is contracts —
//! fixed schemes, validated lengths, deterministic bytes — not math.

pub mod cipher;
pub mod hash;
pub mod keys;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use cipher::{AesKey, Cipher, CipherError};
pub use hash::{double_sha256, hash160, ripemd160, sha256};
pub use keys::{Decryptor, Encryptor, KeyData, KeyError, RsaPrivateKey, RsaPublicKey, Signer, Verifier};
