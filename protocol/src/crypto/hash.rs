//! # Hashing Utilities
//!
//! The digest functions every derived byte in SIGIL flows through. Two
//! primitives, one composition, and nothing else:
//!
//! - **SHA-256** — the collision-resistant workhorse. Used alone for
//!   checksums (doubled, Bitcoin-style) and as the inner hash of the
//!   entity digest.
//! - **RIPEMD-160** — the outer hash that compresses a 32-byte SHA-256
//!   output down to the 20-byte digest an address carries.
//!
//! The composition `ripemd160(sha256(x))` is the HASH-160 construction —
//! the same one Bitcoin applies to public keys. We inherit it wholesale:
//! interoperability with independently written implementations of this
//! scheme matters more than picking a trendier hash.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::DIGEST_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// Returns a 32-byte digest as a `Vec<u8>`. Most callers immediately feed
/// the result to another hash or slice a prefix off it, so the heap
/// allocation is noise compared to the cost of the hash itself.
///
/// # Example
///
/// ```
/// use sigil_protocol::crypto::sha256;
///
/// let hash = sha256(b"SIGIL protocol");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// Same as [`sha256`] but returns `[u8; 32]` for callers that want a
/// fixed-size type without the heap allocation.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// This is the checksum construction of the address codec. The double hash
/// guards against length-extension, which matters here because the checksum
/// is a truncated prefix — exactly the situation where extension attacks
/// get interesting.
pub fn double_sha256(data: &[u8]) -> Vec<u8> {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 hash of the input data.
///
/// Returns a 20-byte digest. Rarely called directly — the address pipeline
/// goes through [`hash160`], which feeds a SHA-256 output in here.
pub fn ripemd160(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; DIGEST_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// Compute the HASH-160 digest: `RIPEMD-160(SHA-256(data))`.
///
/// This 20-byte value is what identifies an entity inside its address.
/// The input is the entity's fingerprint — a signature over its seed name
/// or its raw public-key bytes, depending on the derivation version.
pub fn hash160(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    ripemd160(&sha256(data))
}
