//! # claim-core
//!
//! Shared types for the device-claim protocol client.
//!
//! This crate provides:
//! - The error taxonomy for claim attempts
//! - Device coordinates as supplied by an external discovery step
//! - The addUser request form model
//! - The device's JSON reply, passed through verbatim

pub mod device;
pub mod error;
pub mod request;
pub mod response;

pub use device::DeviceInfo;
pub use error::{CryptoError, EncodingError, Error, ProtocolError, Result, TransportError};
pub use request::ClaimRequest;
pub use response::ClaimResponse;
