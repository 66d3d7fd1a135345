//! Error types for the device-claim client.

use thiserror::Error;

/// Primary error type for all claim operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Crypto input error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors on cryptographic inputs and key material.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid device public key: {0}")]
    InvalidDeviceKey(String),

    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),
}

/// Errors in the blob's length-prefix integer encoding.
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("{field} is {len} bytes, exceeds the {max}-byte length-prefix limit")]
    LengthLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Truncated length prefix")]
    Truncated,
}

/// Errors reaching the device over the network.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors in the device's response.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Device returned an empty response body")]
    EmptyResponse,

    #[error("Device response is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
