//! # claim-crypto
//!
//! Cryptographic and wire-format primitives for the device-claim handshake.
//!
//! This crate provides:
//! - The blob format's 1-or-2-byte length-prefix integer codec
//! - Ephemeral Diffie-Hellman over the fixed 768-bit group
//! - Credential blob construction and the inner AES-192-ECB layer
//! - The outer AES-128-CTR + HMAC-SHA1 envelope
//!
//! Every primitive and constant here (SHA1, PBKDF2 at 256 iterations,
//! AES-192-ECB, AES-128-CTR, the Oakley Group 1 prime) is pinned by the
//! device firmware's decoder. Substituting a stronger primitive breaks the
//! handshake; none of these choices is a recommendation.
//!
//! Private scalars, shared secrets, and derived keys are zeroized on drop.

pub mod blob;
pub mod dh;
pub mod outer;
pub mod varint;

pub use blob::InnerKey;
pub use dh::{DhKeyPair, DhParams, SharedSecret};
pub use outer::OuterKeys;
