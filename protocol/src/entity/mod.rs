//! # Entities
//!
//! The data containers that hang application state off an identifier:
//! accounts, users, groups. They hold references and delegate — every
//! identity rule lives in [`crate::identity`], every crypto operation in
//! [`crate::crypto`]. If you find yourself adding derivation logic here,
//! you're in the wrong module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::keys::{Decryptor, KeyError, RsaPrivateKey, RsaPublicKey, Signer, Verifier};
use crate::identity::{Identifier, Meta};

/// The lookup seam for meta records.
///
/// Whoever stores metas — a cache, a database, a directory service —
/// implements this so entities can be re-verified without the core caring
/// where the record came from.
pub trait MetaSource {
    /// Fetch the meta record for an identifier, if one is known.
    fn meta(&self, identifier: &Identifier) -> Option<Meta>;
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A verification-capable view of an entity: its identifier plus the
/// public key the identity is provable against.
///
/// This is what you hold for *other* people — enough to verify their
/// signatures and encrypt towards them, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The entity's identifier.
    pub identifier: Identifier,
    /// The public key backing the identity.
    pub public_key: RsaPublicKey,
}

impl Account {
    /// Bundle an identifier with its public key.
    pub fn new(identifier: Identifier, public_key: RsaPublicKey) -> Self {
        Self {
            identifier,
            public_key,
        }
    }

    /// Verify a signature made by this entity.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Check this account's key and identifier against a meta record.
    pub fn certified_by(&self, meta: &Meta) -> bool {
        meta.matches_key(&self.public_key) && meta.matches_id(&self.identifier)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Account: {}>", entity_summary(&self.identifier))
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A local entity: an account we hold the private half for.
///
/// No `Serialize` on purpose — a `User` carries a private key, and private
/// keys don't wander into JSON by accident. Export the key explicitly via
/// [`RsaPrivateKey::to_key_data`] if you really mean it.
#[derive(Debug, Clone)]
pub struct User {
    /// The entity's identifier.
    pub identifier: Identifier,
    /// The public key backing the identity.
    pub public_key: RsaPublicKey,
    /// The private half. Guard it.
    pub private_key: RsaPrivateKey,
}

impl User {
    /// Build a user from an identifier and its private key; the public
    /// half is derived, not trusted from the caller.
    pub fn new(identifier: Identifier, private_key: RsaPrivateKey) -> Self {
        Self {
            identifier,
            public_key: private_key.public_key(),
            private_key,
        }
    }

    /// The shareable view of this user.
    pub fn account(&self) -> Account {
        Account::new(self.identifier.clone(), self.public_key.clone())
    }

    /// Sign a message as this entity.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, KeyError> {
        self.private_key.sign(message)
    }

    /// Decrypt a payload addressed to this entity.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KeyError> {
        self.private_key.decrypt(ciphertext)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User: {}>", entity_summary(&self.identifier))
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A membership container: a group identifier, its founder and owner, and
/// the member roster.
///
/// Pure data. Whether a member may invite or expel is policy for a layer
/// that knows about permissions; this struct only records who is in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// The group's identifier.
    pub identifier: Identifier,
    /// The entity that created the group.
    pub founder: Identifier,
    /// The current owner. Starts out as the founder.
    pub owner: Identifier,
    /// The member roster, founder included.
    pub members: Vec<Identifier>,
}

impl Group {
    /// Create a group owned by its founder, with the founder as the first
    /// member.
    pub fn new(identifier: Identifier, founder: Identifier) -> Self {
        Self {
            identifier,
            owner: founder.clone(),
            members: vec![founder.clone()],
            founder,
        }
    }

    /// Whether the given entity founded this group.
    pub fn is_founder(&self, identifier: &Identifier) -> bool {
        self.founder == *identifier
    }

    /// Whether the given entity currently owns this group.
    pub fn is_owner(&self, identifier: &Identifier) -> bool {
        self.owner == *identifier
    }

    /// Whether the given entity is on the roster.
    pub fn is_member(&self, identifier: &Identifier) -> bool {
        self.members.contains(identifier)
    }

    /// Add an entity to the roster. Adding an existing member is a no-op.
    pub fn add_member(&mut self, identifier: Identifier) {
        if !self.is_member(&identifier) {
            self.members.push(identifier);
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Group: {} members={}>",
            entity_summary(&self.identifier),
            self.members.len()
        )
    }
}

/// `identifier(network|number) "name"` — the debug summary every container
/// prints.
fn entity_summary(identifier: &Identifier) -> String {
    let name = identifier
        .name()
        .unwrap_or_else(|| identifier.address().as_str());
    format!(
        "{}({}|{}) \"{}\"",
        identifier,
        identifier.network(),
        identifier.number(),
        name
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
