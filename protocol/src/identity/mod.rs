//! # Identity Module
//!
//! The derivation pipeline that turns key material into provable names.
//! Everything in this module is a pure function over immutable values —
//! derive as many identities in parallel as you like, there is nothing
//! to coordinate.
//!
//! The stack, bottom to top:
//!
//! 1. **NetworkType** — one byte classifying the entity (person, group,
//!    station, thing, ...).
//! 2. **Address** — `base58(network ‖ hash160(fingerprint) ‖ checksum)`,
//!    the 25-byte self-certifying core.
//! 3. **Meta** — the versioned derivation record binding a key and a seed
//!    name to an address. Three algorithms (MKM, BTC, ExBTC) behind one
//!    closed enum.
//! 4. **Identifier** — `name@address/terminal`, the string humans pass
//!    around.
//!
//! The loop closes at `Meta::matches_id`: recompute, compare, done. No
//! registry was consulted in the proving of this identity.

pub mod address;
pub mod identifier;
pub mod meta;
pub mod network;

pub use address::{Address, AddressError};
pub use identifier::Identifier;
pub use meta::{Meta, MetaVersion, UnknownMetaVersion};
pub use network::{InvalidNetworkType, NetworkType};
