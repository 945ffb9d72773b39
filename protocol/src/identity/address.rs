//! # Addresses
//!
//! The Bitcoin-style address record at the bottom of every identity:
//!
//! ```text
//! binary form (25 bytes):  network(1) ‖ digest(20) ‖ check_code(4)
//!
//!     digest      = ripemd160(sha256(fingerprint))
//!     check_code  = sha256(sha256(network ‖ digest))[0..4]
//!     address     = base58(network ‖ digest ‖ check_code)
//! ```
//!
//! The check code doubles as the address's **check number** — the first
//! four bytes reassembled little-endian into a `u32`. It's the short
//! human-comparable handle ("user 4049699527") other layers display next
//! to a name.
//!
//! Decoding re-verifies the checksum against the digest. A transcription
//! error — or a forged digest with a pasted-on check code — is rejected as
//! [`AddressError::MalformedAddress`], not silently accepted.
//!
//! Two reserved literal addresses, `"anywhere"` and `"everywhere"`, denote
//! broadcast scope. They bypass the codec entirely: process-wide constants,
//! compared like any other address (by string), never derived from keys.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, BROADCAST_CHECK_NUMBER, CHECK_CODE_LENGTH, DIGEST_LENGTH};
use crate::crypto::hash::{double_sha256, hash160};
use crate::identity::network::{InvalidNetworkType, NetworkType};

/// Errors that can occur decoding an address string.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Corrupt base-58, wrong decoded length, or checksum mismatch.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// The classification byte is not an enumerated network type.
    #[error(transparent)]
    InvalidNetworkType(#[from] InvalidNetworkType),
}

/// The reserved broadcast target "any single entity."
static ANYWHERE: Lazy<Address> = Lazy::new(|| Address {
    encoded: "anywhere".to_string(),
    network: NetworkType::Main,
    check_number: BROADCAST_CHECK_NUMBER,
});

/// The reserved broadcast target "every entity."
static EVERYWHERE: Lazy<Address> = Lazy::new(|| Address {
    encoded: "everywhere".to_string(),
    network: NetworkType::Group,
    check_number: BROADCAST_CHECK_NUMBER,
});

/// A self-certifying entity address.
///
/// Immutable value object. Two addresses with the same textual form are
/// the same entity — equality and hashing go through the encoded string
/// and nothing else.
///
/// # Examples
///
/// ```
/// use sigil_protocol::identity::{Address, NetworkType};
///
/// let addr: Address = "4WDfe3zZ4T7opFSi3iDAKiuTnUHjxmXekk".parse().unwrap();
/// assert_eq!(addr.network(), NetworkType::Main);
/// assert_eq!(addr.check_number(), 1840839527);
/// ```
#[derive(Clone)]
pub struct Address {
    encoded: String,
    network: NetworkType,
    check_number: u32,
}

impl Address {
    /// Encode an address from a network type and a 20-byte entity digest.
    ///
    /// This is the raw codec operation; most callers want
    /// [`from_fingerprint`](Self::from_fingerprint), which hashes the
    /// fingerprint down to a digest first.
    pub fn from_digest(network: NetworkType, digest: &[u8; DIGEST_LENGTH]) -> Self {
        let mut head = [0u8; 1 + DIGEST_LENGTH];
        head[0] = network.as_byte();
        head[1..].copy_from_slice(digest);

        let cc = double_sha256(&head);
        let mut check_code = [0u8; CHECK_CODE_LENGTH];
        check_code.copy_from_slice(&cc[..CHECK_CODE_LENGTH]);

        let mut data = Vec::with_capacity(ADDRESS_LENGTH);
        data.extend_from_slice(&head);
        data.extend_from_slice(&check_code);

        Self {
            encoded: bs58::encode(data).into_string(),
            network,
            check_number: u32::from_le_bytes(check_code),
        }
    }

    /// Derive an address from an entity fingerprint: digest the fingerprint
    /// with HASH-160, then encode.
    ///
    /// The fingerprint is whatever the derivation version says it is — a
    /// signature over the seed name, or raw public-key bytes.
    pub fn from_fingerprint(fingerprint: &[u8], network: NetworkType) -> Self {
        Self::from_digest(network, &hash160(fingerprint))
    }

    /// The broadcast address reaching any single entity.
    pub fn anywhere() -> &'static Address {
        &ANYWHERE
    }

    /// The broadcast address reaching every entity.
    pub fn everywhere() -> &'static Address {
        &EVERYWHERE
    }

    /// The base-58 textual form (or the reserved literal for broadcast
    /// addresses).
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The entity classification carried in the first byte.
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// The check code reassembled little-endian into a `u32`.
    pub fn check_number(&self) -> u32 {
        self.check_number
    }

    /// Whether this is one of the reserved broadcast addresses.
    pub fn is_broadcast(&self) -> bool {
        self == Self::anywhere() || self == Self::everywhere()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Decode an address string.
    ///
    /// The reserved literals `"anywhere"` / `"everywhere"` return the
    /// broadcast constants without touching the codec. Everything else is
    /// base-58 decoded and validated: exactly 25 bytes, a recognized
    /// network byte, and a checksum that matches the digest.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ANYWHERE.encoded {
            return Ok(ANYWHERE.clone());
        }
        if s == EVERYWHERE.encoded {
            return Ok(EVERYWHERE.clone());
        }

        let data = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::MalformedAddress(e.to_string()))?;
        if data.len() != ADDRESS_LENGTH {
            return Err(AddressError::MalformedAddress(format!(
                "decoded length {} (expected {ADDRESS_LENGTH})",
                data.len()
            )));
        }

        let network = NetworkType::from_byte(data[0])?;

        // Recompute the checksum from the head and hold the trailing bytes
        // to it. A digest tampered after the fact fails here.
        let cc = double_sha256(&data[..=DIGEST_LENGTH]);
        if cc[..CHECK_CODE_LENGTH] != data[1 + DIGEST_LENGTH..] {
            return Err(AddressError::MalformedAddress("checksum mismatch".into()));
        }

        let mut check_code = [0u8; CHECK_CODE_LENGTH];
        check_code.copy_from_slice(&cc[..CHECK_CODE_LENGTH]);

        Ok(Self {
            encoded: s.to_string(),
            network,
            check_number: u32::from_le_bytes(check_code),
        })
    }
}

impl PartialEq for Address {
    /// Equal textual form means the same entity. The derived fields are a
    /// function of the string, so comparing them too would be redundant.
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address({}, {}|{})",
            self.encoded, self.network, self.check_number
        )
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
