//! # Protocol Configuration & Constants
//!
//! Every magic number in SIGIL lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! These values define the wire identity of the scheme. Changing any of them
//! changes every derived address on the network, so treat this file the way
//! you'd treat a consensus rule.

// ---------------------------------------------------------------------------
// Address Layout
// ---------------------------------------------------------------------------

/// Length of the entity digest embedded in an address: RIPEMD-160 output.
pub const DIGEST_LENGTH: usize = 20;

/// Length of the truncated checksum appended to an address.
pub const CHECK_CODE_LENGTH: usize = 4;

/// Total binary length of an address record:
/// `network(1) ‖ digest(20) ‖ check_code(4)`.
pub const ADDRESS_LENGTH: usize = 1 + DIGEST_LENGTH + CHECK_CODE_LENGTH;

/// Check number carried by the reserved broadcast addresses. The broadcast
/// addresses bypass the codec entirely, so this value is a convention, not
/// a computation.
pub const BROADCAST_CHECK_NUMBER: u32 = 9527;

// ---------------------------------------------------------------------------
// Asymmetric Key Material
// ---------------------------------------------------------------------------

/// Prefix of the algorithm tag carried by RSA keys. The full tag appends the
/// modulus size in bits, e.g. `"RSA1024"`.
pub const RSA_ALGORITHM_PREFIX: &str = "RSA";

/// Default RSA modulus size in bits for freshly generated identity keys.
///
/// 1024 bits is small by modern standards, but it is the size the deployed
/// identity scheme derives addresses from — every existing identifier was
/// minted against it. Callers minting high-value identities can pass a
/// larger size explicitly.
pub const RSA_DEFAULT_BITS: usize = 1024;

/// Signature scheme fixed by the protocol: RSASSA-PKCS#1 v1.5 over a
/// SHA-256 digest of the message. Deterministic, which the MKM derivation
/// relies on — the same (key, seed) pair must always produce the same
/// fingerprint and therefore the same address.
pub const SIGNATURE_SCHEME: &str = "RSASSA-PKCS1-v1_5/SHA-256";

/// Encryption scheme fixed by the protocol: RSAES-PKCS#1 v1.5, bounded by
/// the modulus size.
pub const ENCRYPTION_SCHEME: &str = "RSAES-PKCS1-v1_5";

// ---------------------------------------------------------------------------
// Symmetric Key Material
// ---------------------------------------------------------------------------

/// Algorithm tag carried by symmetric keys in their export record.
pub const AES_ALGORITHM_TAG: &str = "AES";

/// AES block size — also the length of the explicit initialization vector.
pub const AES_BLOCK_SIZE: usize = 16;

/// IV length in bytes. CBC mode wants exactly one block.
pub const AES_IV_LENGTH: usize = AES_BLOCK_SIZE;

/// Key lengths accepted by the symmetric cipher: 128-, 192- and 256-bit.
pub const AES_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// Default symmetric key size in bits for fresh keys.
pub const AES_DEFAULT_BITS: usize = 256;

/// Returns `true` if `len` is an accepted AES key length in bytes.
pub fn is_valid_aes_key_length(len: usize) -> bool {
    AES_KEY_LENGTHS.contains(&len)
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// SHA-256 digest length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// The digest construction identifying an entity: RIPEMD-160 over SHA-256,
/// the same HASH-160 construction Bitcoin uses for public-key hashes.
pub const DIGEST_CONSTRUCTION: &str = "RIPEMD-160(SHA-256)";
