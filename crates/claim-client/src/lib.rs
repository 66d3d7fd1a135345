//! # claim-client
//!
//! The device-claim protocol driver.
//!
//! This crate composes the full claim request — ephemeral DH key exchange,
//! credential blob construction, both encryption layers — and delivers it to
//! the device's locally advertised endpoint in a single HTTP round trip.
//!
//! One claim attempt is one blocking round trip bounded by a timeout. Each
//! attempt draws its own keypair and IV, so concurrent attempts against
//! different devices need no coordination. Failed attempts are not retried
//! here; trying the next discovered device is the caller's loop.

mod client;
mod transport;

pub use client::{DeviceClaimClient, DEFAULT_DEVICE_NAME};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};
