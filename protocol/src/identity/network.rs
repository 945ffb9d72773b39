//! # Network Types
//!
//! The classification byte carried in the first position of every address.
//! One byte tells you what kind of entity you're talking to — a person, a
//! group of people, a server node, a fridge.
//!
//! The byte is a loose bit-field rather than a dense enumeration:
//!
//! ```text
//! 0000 1000 — acts like a human (person accounts, stations, robots)
//! 0001 0000 — contains members (the group family)
//! 0010 0000 — needs administrators (large groups)
//! 0100 0000 — exists in reality (social entities, providers)
//! 1000 0000 — is a 'Thing' (IoT: devices, stations, robots)
//! ```
//!
//! The predicates below test bits, not exhaustive variant lists, so a
//! future sub-kind that shares a bit with an existing family automatically
//! inherits its family behavior. Decoding is the opposite: only the
//! enumerated bytes are valid, and an unrecognized byte is an error — an
//! address with a byte we don't know is an address we don't trust.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Byte marking entities that act like a human.
const PERSON_BIT: u8 = 0x08;

/// Byte marking entities that contain members.
const GROUP_BIT: u8 = 0x10;

/// Byte marking IoT entities.
const THING_BIT: u8 = 0x80;

/// The classification byte was not one of the enumerated network types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized network type byte: 0x{0:02X}")]
pub struct InvalidNetworkType(pub u8);

/// The kind of entity an address identifies.
///
/// Exactly one canonical variant exists per valid byte. `Polylogue` — the
/// historical name for a small ad-hoc group — shares byte `0x10` with
/// [`Group`](NetworkType::Group) and is provided as an alias constant, not
/// a variant, so decoding stays unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NetworkType {
    /// BTC-compatible person account (the all-zero legacy byte).
    BtcMain = 0x00,
    /// Person account.
    Main = 0x08,
    /// Multi-person group.
    Group = 0x10,
    /// Large persistent group with administrators.
    Chatroom = 0x30,
    /// Service provider.
    Provider = 0x76,
    /// Server node. Acts like a person on the wire, is a thing in a rack.
    Station = 0x88,
    /// IoT device.
    Thing = 0x80,
    /// Automated agent.
    Robot = 0xC8,
}

impl NetworkType {
    /// Historical alias: a small ad-hoc group. Same byte as [`Group`](Self::Group).
    pub const POLYLOGUE: NetworkType = NetworkType::Group;

    /// Decode a classification byte.
    ///
    /// Fails with [`InvalidNetworkType`] for any byte outside the table —
    /// no silent default, no "probably a person."
    pub fn from_byte(byte: u8) -> Result<Self, InvalidNetworkType> {
        match byte {
            0x00 => Ok(NetworkType::BtcMain),
            0x08 => Ok(NetworkType::Main),
            0x10 => Ok(NetworkType::Group),
            0x30 => Ok(NetworkType::Chatroom),
            0x76 => Ok(NetworkType::Provider),
            0x88 => Ok(NetworkType::Station),
            0x80 => Ok(NetworkType::Thing),
            0xC8 => Ok(NetworkType::Robot),
            other => Err(InvalidNetworkType(other)),
        }
    }

    /// The raw classification byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Entity that can hold a conversation: anything with the person bit,
    /// plus the legacy BTC byte.
    pub fn is_communicator(self) -> bool {
        (self.as_byte() & PERSON_BIT) != 0 || self == NetworkType::BtcMain
    }

    /// Person account in either encoding.
    pub fn is_person(self) -> bool {
        self == NetworkType::Main || self == NetworkType::BtcMain
    }

    /// Anything in the group family.
    pub fn is_group(self) -> bool {
        (self.as_byte() & GROUP_BIT) != 0
    }

    /// Server node.
    pub fn is_station(self) -> bool {
        self == NetworkType::Station
    }

    /// Service provider.
    pub fn is_provider(self) -> bool {
        self == NetworkType::Provider
    }

    /// Anything with the IoT bit: devices, robots, and stations alike.
    pub fn is_thing(self) -> bool {
        (self.as_byte() & THING_BIT) != 0
    }

    /// Automated agent.
    pub fn is_robot(self) -> bool {
        self == NetworkType::Robot
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkType::BtcMain => "btc-main",
            NetworkType::Main => "main",
            NetworkType::Group => "group",
            NetworkType::Chatroom => "chatroom",
            NetworkType::Provider => "provider",
            NetworkType::Station => "station",
            NetworkType::Thing => "thing",
            NetworkType::Robot => "robot",
        };
        write!(f, "{name}")
    }
}

impl Serialize for NetworkType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_byte())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let byte = u8::deserialize(deserializer)?;
        NetworkType::from_byte(byte).map_err(serde::de::Error::custom)
    }
}
