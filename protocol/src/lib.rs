// Copyright (c) 2026 Sigil Labs. MIT License.
// See LICENSE for details.

//! # SIGIL Protocol — Core Library
//!
//! SIGIL derives self-certifying network identities from asymmetric key
//! material, Bitcoin-style: hash the proof, stamp a network byte on it,
//! checksum it, base-58 it. No registry, no authority, no "please contact
//! support to recover your identity." If you hold the key, you can prove
//! the identity; if you don't, you can't. That's the whole trust model.
//!
//! An identity here is a pair of values everyone can recompute:
//!
//! - an **Address** — `base58(network ‖ ripemd160(sha256(proof)) ‖ checksum)`,
//!   25 bytes on the wire, 34-ish characters to a human.
//! - an **Identifier** — `name@address/terminal`, the thing you actually
//!   put in a contact list.
//!
//! The "proof" varies by algorithm version: a signature over a chosen seed
//! name (MKM, ExBTC) or the raw public key (BTC). Given the public key and
//! the version tag, any party re-derives the same bytes — that's what makes
//! the identity self-certifying.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the layers of the scheme:
//!
//! - **crypto** — RSA key material, AES-CBC symmetric keys, hash toolbox.
//! - **identity** — NetworkType, Address codec, Meta derivation, Identifier.
//! - **entity** — Account/User/Group containers that hang data off an
//!   identifier without touching the derivation rules.
//! - **config** — Protocol constants. All of them. In one place.
//!
//! ## Design Philosophy
//!
//! 1. Every value object is immutable; every operation is a pure function.
//! 2. Byte-exact or bust — two independent implementations must agree on
//!    every derived byte, or the scheme is decorative.
//! 3. No unsafe code in crypto paths — we sleep at night.
//! 4. Failures are rejected operations, never crashes or silent defaults.

pub mod config;
pub mod crypto;
pub mod entity;
pub mod identity;
