//! # Meta — Versioned Identity Derivation
//!
//! The record that makes an identity provable. A `Meta` binds together the
//! algorithm version, the public key, the seed name, and the fingerprint;
//! from it, anyone can rebuild the address and check that a claimed
//! identifier really belongs to the key holder:
//!
//! ```text
//! fingerprint = sign(seed, SK)         (MKM, ExBTC)
//!             | public key bytes       (BTC)
//!
//! digest      = ripemd160(sha256(CT))  where CT is the fingerprint (MKM)
//!                                      or the public key bytes (BTC, ExBTC)
//! address     = base58(network ‖ digest ‖ check_code)
//! ```
//!
//! Three versions, one closed enum, exhaustive matches everywhere. Adding
//! a version is a compile-time-checked exercise: the compiler walks you to
//! every dispatch site that needs an opinion.
//!
//! | version | fingerprint        | digest source | identifier |
//! |---------|--------------------|---------------|------------|
//! | MKM     | signature over seed| fingerprint   | named      |
//! | BTC     | public key bytes   | public key    | nameless   |
//! | ExBTC   | signature over seed| public key    | named      |
//!
//! The signature scheme is deterministic, so MKM fingerprints — and
//! therefore MKM addresses — are reproducible from `(key, seed)` alone.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::keys::{KeyError, RsaPrivateKey, RsaPublicKey, Signer};
use crate::identity::address::Address;
use crate::identity::identifier::Identifier;
use crate::identity::network::NetworkType;

/// The version byte was not one of the enumerated derivation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown meta version: 0x{0:02X}")]
pub struct UnknownMetaVersion(pub u8);

/// The derivation algorithm a `Meta` was minted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MetaVersion {
    /// Name-bearing: fingerprint is a signature over the seed, and the
    /// address digest comes from the fingerprint. The scheme's native
    /// algorithm and the default.
    #[default]
    Mkm = 0x01,

    /// Key-only, Bitcoin-compatible: no seed binding, the address digest
    /// comes straight from the public-key bytes.
    Btc = 0x02,

    /// The hybrid: a seed-signed fingerprint like MKM, but a key-derived
    /// address like BTC. The name travels with the identifier while the
    /// address stays portable across renames.
    ExBtc = 0x03,
}

impl MetaVersion {
    /// Decode a version byte. Unknown bytes are an error, not a default.
    pub fn from_byte(byte: u8) -> Result<Self, UnknownMetaVersion> {
        match byte {
            0x01 => Ok(MetaVersion::Mkm),
            0x02 => Ok(MetaVersion::Btc),
            0x03 => Ok(MetaVersion::ExBtc),
            other => Err(UnknownMetaVersion(other)),
        }
    }

    /// The raw version byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether this version binds a seed name into the fingerprint.
    pub fn has_seed(self) -> bool {
        match self {
            MetaVersion::Mkm | MetaVersion::ExBtc => true,
            MetaVersion::Btc => false,
        }
    }
}

impl Serialize for MetaVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_byte())
    }
}

impl<'de> Deserialize<'de> for MetaVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let byte = u8::deserialize(deserializer)?;
        MetaVersion::from_byte(byte).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

/// An identity's derivation record.
///
/// Immutable once generated. Holding a `Meta` and nothing else, any party
/// can rebuild the address for any network type and decide whether a
/// claimed identifier or public key belongs to this identity — that's the
/// self-certifying property the whole scheme exists for.
///
/// # Examples
///
/// ```
/// use sigil_protocol::crypto::keys::RsaPrivateKey;
/// use sigil_protocol::identity::{Meta, MetaVersion, NetworkType};
///
/// let sk = RsaPrivateKey::generate(1024).unwrap();
/// let meta = Meta::generate(&sk, "moky", MetaVersion::default()).unwrap();
///
/// let id = meta.build_id(NetworkType::Main);
/// assert_eq!(id.name(), Some("moky"));
/// assert!(meta.matches_id(&id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    version: MetaVersion,
    public_key: RsaPublicKey,
    seed: String,
    fingerprint: Vec<u8>,
}

impl Meta {
    /// Derive a fresh `Meta` from a private key and a seed name.
    ///
    /// For the name-bearing versions the fingerprint is a signature over
    /// the UTF-8 seed bytes; for BTC it is the exported public-key bytes
    /// and the seed plays no part in derivation.
    pub fn generate(
        private_key: &RsaPrivateKey,
        seed: &str,
        version: MetaVersion,
    ) -> Result<Self, KeyError> {
        let public_key = private_key.public_key();
        let fingerprint = match version {
            MetaVersion::Btc => public_key.data(),
            MetaVersion::Mkm | MetaVersion::ExBtc => private_key.sign(seed.as_bytes())?,
        };
        tracing::debug!(
            version = version.as_byte(),
            seed,
            algorithm = public_key.algorithm(),
            "derived identity meta"
        );
        Ok(Self {
            version,
            public_key,
            seed: seed.to_string(),
            fingerprint,
        })
    }

    /// The derivation version.
    pub fn version(&self) -> MetaVersion {
        self.version
    }

    /// The public key the identity is provable against.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// The seed name. Empty under key-only derivations.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// The versioned proof value the address digest is derived from.
    pub fn fingerprint(&self) -> &[u8] {
        &self.fingerprint
    }

    /// Materialize the address for a given network type.
    pub fn build_address(&self, network: NetworkType) -> Address {
        match self.version {
            // Signature-derived: the digest commits to the (key, seed) pair.
            MetaVersion::Mkm => Address::from_fingerprint(&self.fingerprint, network),
            // Key-derived: the digest commits to the key alone.
            MetaVersion::Btc | MetaVersion::ExBtc => {
                Address::from_fingerprint(&self.public_key.data(), network)
            }
        }
    }

    /// Materialize the identifier for a given network type.
    ///
    /// Name-bearing versions carry the seed as the identifier's name; an
    /// empty seed yields a nameless identifier.
    pub fn build_id(&self, network: NetworkType) -> Identifier {
        let address = self.build_address(network);
        match self.version {
            MetaVersion::Btc => Identifier::from_address(address, None),
            MetaVersion::Mkm | MetaVersion::ExBtc => {
                Identifier::from_address(address, Some(&self.seed))
            }
        }
    }

    /// Does this meta belong to the given public key?
    ///
    /// Algorithm tag and exported bytes must both match. A query, not a
    /// validator — a mismatch is `false`, never an error.
    pub fn matches_key(&self, key: &RsaPublicKey) -> bool {
        self.public_key == *key
    }

    /// Does this meta derive the given identifier?
    ///
    /// Recomputes the identifier for the target's own network type and
    /// compares. Like [`matches_key`](Self::matches_key), a query: any
    /// non-match is `false`.
    pub fn matches_id(&self, identifier: &Identifier) -> bool {
        self.build_id(identifier.network()) == *identifier
    }
}

// The interchange record: `{ version, seed, key, fingerprint }` with the
// fingerprint in base64, matching what other implementations of the scheme
// read and write.
#[derive(Serialize, Deserialize)]
struct MetaRecord {
    version: MetaVersion,
    seed: String,
    key: RsaPublicKey,
    fingerprint: String,
}

impl Serialize for Meta {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MetaRecord {
            version: self.version,
            seed: self.seed.clone(),
            key: self.public_key.clone(),
            fingerprint: BASE64.encode(&self.fingerprint),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = MetaRecord::deserialize(deserializer)?;
        let fingerprint = BASE64
            .decode(&record.fingerprint)
            .map_err(serde::de::Error::custom)?;
        Ok(Meta {
            version: record.version,
            public_key: record.key,
            seed: record.seed,
            fingerprint,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
