//! # Identifiers
//!
//! The user-facing name of an entity:
//!
//! ```text
//! [name '@'] address ['/' terminal]
//!
//! moky@4DnqXWdTV8wuZgfqSCX9GjE2kNq7HJrUgQ/home
//! ```
//!
//! The name is the human-chosen seed bound into the address by the
//! derivation; the terminal is a routing hint ("which of my devices") that
//! rides along in the string but is **not** part of the identity — two
//! identifiers that differ only in terminal are the same entity.
//!
//! Parsing delegates all address validation to the codec and propagates
//! its errors untouched. There is nothing to validate about the name or
//! terminal themselves; an empty name is simply no name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::identity::address::{Address, AddressError};
use crate::identity::network::NetworkType;

/// A parsed entity identifier.
///
/// Immutable value object referencing an [`Address`]. Equality and hashing
/// cover `(name, address)` only — see the module docs for why the terminal
/// is excluded.
///
/// # Examples
///
/// ```
/// use sigil_protocol::identity::Identifier;
///
/// let id: Identifier = "moky@4DnqXWdTV8wuZgfqSCX9GjE2kNq7HJrUgQ".parse().unwrap();
/// assert_eq!(id.name(), Some("moky"));
/// assert_eq!(id.number(), 4049699527);
/// ```
#[derive(Clone)]
pub struct Identifier {
    name: Option<String>,
    address: Address,
    terminal: Option<String>,
}

impl Identifier {
    /// Build an identifier from an address and an optional name.
    ///
    /// Pure constructor — the address already carries every guarantee this
    /// type needs. An empty name is normalized to no name.
    pub fn from_address(address: Address, name: Option<&str>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            address,
            terminal: None,
        }
    }

    /// Return this identifier with a terminal attached.
    pub fn with_terminal(mut self, terminal: &str) -> Self {
        self.terminal = if terminal.is_empty() {
            None
        } else {
            Some(terminal.to_string())
        };
        self
    }

    /// The bound name, if the derivation carried one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The underlying address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The routing terminal, if present.
    pub fn terminal(&self) -> Option<&str> {
        self.terminal.as_deref()
    }

    /// The address's check number — the short numeric handle displayed
    /// next to the name.
    pub fn number(&self) -> u32 {
        self.address.check_number()
    }

    /// The entity classification of the underlying address.
    pub fn network(&self) -> NetworkType {
        self.address.network()
    }

    /// Whether this identifier points at a broadcast address.
    pub fn is_broadcast(&self) -> bool {
        self.address.is_broadcast()
    }
}

impl FromStr for Identifier {
    type Err = AddressError;

    /// Parse the canonical string form.
    ///
    /// The *last* `/` splits off the terminal; the *first* `@` of the rest
    /// splits the name from the address. Address errors propagate from the
    /// codec unchanged.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, terminal) = match s.rsplit_once('/') {
            Some((main, terminal)) => (main, Some(terminal)),
            None => (s, None),
        };

        let (name, address) = match main.split_once('@') {
            Some((name, address)) => (Some(name), address),
            None => (None, main),
        };

        let address: Address = address.parse()?;
        let id = Self::from_address(address, name);
        Ok(match terminal {
            Some(t) => id.with_terminal(t),
            None => id,
        })
    }
}

impl PartialEq for Identifier {
    /// Same name, same address — the terminal is routing metadata, not
    /// identity.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.address == other.address
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must stay consistent with PartialEq: name and address only.
        self.name.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}@")?;
        }
        write!(f, "{}", self.address)?;
        if let Some(terminal) = &self.terminal {
            write!(f, "/{terminal}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl Serialize for Identifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
