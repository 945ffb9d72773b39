//! # AES-CBC Symmetric Keys
//!
//! The symmetric side of the key material: AES in CBC mode with PKCS#7
//! padding and an explicit IV. Used for bulk payloads that RSA can't carry —
//! the usual dance is "encrypt the payload under a fresh AES key, encrypt
//! the AES key under the recipient's RSA key."
//!
//! CBC with PKCS#7 is what every deployed implementation of this scheme
//! speaks, so CBC with PKCS#7 is what we speak. It is *not* authenticated:
//! a tampered ciphertext decrypts to garbage or a padding error, not a
//! clean failure. Callers that need integrity must sign the ciphertext —
//! which, conveniently, is what the asymmetric half of this module tree
//! is for.
//!
//! ## Key sizes
//!
//! 128-, 192- and 256-bit keys, matching the AES standard. Anything else
//! is rejected at construction with [`CipherError::InvalidKeyLength`] —
//! not truncated, not padded, rejected.

use aes::cipher::{block_padding::Pkcs7, BlockModeDecrypt, BlockModeEncrypt, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{is_valid_aes_key_length, AES_ALGORITHM_TAG, AES_IV_LENGTH};
use crate::crypto::keys::KeyData;

/// Errors that can occur constructing or using a symmetric key.
///
/// Decryption failures are intentionally vague. The difference between
/// "wrong key" and "corrupted ciphertext" is none of the caller's business,
/// and even less of an attacker's.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is not one of the accepted AES sizes.
    #[error("invalid symmetric key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    /// The IV is not exactly one block.
    #[error("invalid IV length: {0} bytes (expected {AES_IV_LENGTH})")]
    InvalidIvLength(usize),

    /// The exported key record could not be decoded.
    #[error("unparsable key record: {0}")]
    KeyFormat(String),

    /// Wrong key, corrupted ciphertext, or a ciphertext that was never
    /// CBC/PKCS#7 to begin with.
    #[error("decryption failed -- wrong key or corrupted ciphertext")]
    DecryptFailed,
}

/// The symmetric-cipher capability: encrypt and decrypt with the same key.
pub trait Cipher {
    /// Encrypt a plaintext of any length; output is padded to whole blocks.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Decrypt a ciphertext produced by [`encrypt`](Cipher::encrypt).
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

// ---------------------------------------------------------------------------
// AesKey
// ---------------------------------------------------------------------------

/// An AES-CBC key with its initialization vector.
///
/// Immutable once constructed. Encryption is deterministic given
/// `(key, iv, plaintext)` — the IV travels with the key in its export
/// record rather than being prepended per message, matching the scheme's
/// wire format.
///
/// # Examples
///
/// ```
/// use sigil_protocol::crypto::cipher::{AesKey, Cipher};
///
/// let key = AesKey::generate(256).unwrap();
/// let sealed = key.encrypt(b"secret payload").unwrap();
/// assert_eq!(key.decrypt(&sealed).unwrap(), b"secret payload");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AesKey {
    key: Vec<u8>,
    iv: [u8; AES_IV_LENGTH],
}

impl AesKey {
    /// Generate a fresh key of the given size in bits (128, 192 or 256),
    /// with a random IV, from the OS cryptographic RNG.
    pub fn generate(bits: usize) -> Result<Self, CipherError> {
        let len = bits / 8;
        if !is_valid_aes_key_length(len) {
            return Err(CipherError::InvalidKeyLength(len));
        }
        let mut key = vec![0u8; len];
        rand::rngs::OsRng.fill_bytes(&mut key);
        let mut iv = [0u8; AES_IV_LENGTH];
        rand::rngs::OsRng.fill_bytes(&mut iv);
        Ok(Self { key, iv })
    }

    /// Restore a key from exported key and IV bytes.
    pub fn from_parts(key: &[u8], iv: &[u8]) -> Result<Self, CipherError> {
        if !is_valid_aes_key_length(key.len()) {
            return Err(CipherError::InvalidKeyLength(key.len()));
        }
        let iv: [u8; AES_IV_LENGTH] = iv
            .try_into()
            .map_err(|_| CipherError::InvalidIvLength(iv.len()))?;
        Ok(Self {
            key: key.to_vec(),
            iv,
        })
    }

    /// Restore a key from its `{ algorithm, data, iv }` export record.
    pub fn from_key_data(record: &KeyData) -> Result<Self, CipherError> {
        let key = BASE64
            .decode(&record.data)
            .map_err(|e| CipherError::KeyFormat(format!("key data: {e}")))?;
        let iv = record
            .iv
            .as_deref()
            .ok_or_else(|| CipherError::KeyFormat("missing iv".into()))?;
        let iv = BASE64
            .decode(iv)
            .map_err(|e| CipherError::KeyFormat(format!("iv: {e}")))?;
        Self::from_parts(&key, &iv)
    }

    /// Export this key as a `{ algorithm, data, iv }` record.
    pub fn to_key_data(&self) -> KeyData {
        KeyData {
            algorithm: AES_ALGORITHM_TAG.to_string(),
            data: BASE64.encode(&self.key),
            iv: Some(BASE64.encode(self.iv)),
        }
    }

    /// The algorithm tag carried in the export record.
    pub fn algorithm(&self) -> &str {
        AES_ALGORITHM_TAG
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        self.key.len() * 8
    }

    /// The initialization vector.
    pub fn iv(&self) -> &[u8; AES_IV_LENGTH] {
        &self.iv
    }
}

// Lengths are validated in the constructors, so `new_from_slices` cannot
// fail here.
fn encrypt_with<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    C: BlockModeEncrypt + KeyIvInit,
{
    C::new_from_slices(key, iv)
        .expect("key and IV lengths validated at construction")
        .encrypt_padded_vec::<Pkcs7>(plaintext)
}

fn decrypt_with<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: BlockModeDecrypt + KeyIvInit,
{
    C::new_from_slices(key, iv)
        .expect("key and IV lengths validated at construction")
        .decrypt_padded_vec::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::DecryptFailed)
}

impl Cipher for AesKey {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        match self.key.len() {
            16 => Ok(encrypt_with::<cbc::Encryptor<Aes128>>(
                &self.key, &self.iv, plaintext,
            )),
            24 => Ok(encrypt_with::<cbc::Encryptor<Aes192>>(
                &self.key, &self.iv, plaintext,
            )),
            32 => Ok(encrypt_with::<cbc::Encryptor<Aes256>>(
                &self.key, &self.iv, plaintext,
            )),
            n => Err(CipherError::InvalidKeyLength(n)),
        }
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        match self.key.len() {
            16 => decrypt_with::<cbc::Decryptor<Aes128>>(&self.key, &self.iv, ciphertext),
            24 => decrypt_with::<cbc::Decryptor<Aes192>>(&self.key, &self.iv, ciphertext),
            32 => decrypt_with::<cbc::Decryptor<Aes256>>(&self.key, &self.iv, ciphertext),
            n => Err(CipherError::InvalidKeyLength(n)),
        }
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key bytes stay out of logs. The size is all anyone needs to see.
        write!(f, "AesKey({}-bit)", self.bits())
    }
}

impl Serialize for AesKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_key_data().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AesKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = KeyData::deserialize(deserializer)?;
        AesKey::from_key_data(&record).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
