//! The blob format's length-prefix integer codec.
//!
//! One byte for values up to 127, two bytes otherwise:
//!
//! ```text
//! n <= 127:  [n]
//! n  > 127:  [(n & 0x7f) | 0x80, n >> 7]
//! ```
//!
//! Unlike general-purpose varint schemes this one stops at two bytes, so it
//! caps out at 14 bits. Usernames and access tokens fit comfortably below
//! that, but the bound is enforced rather than truncated.

use claim_core::error::EncodingError;

/// Largest value the two-byte form can carry.
pub const MAX_VALUE: usize = 0x3fff;

/// Encode a length prefix.
///
/// Values above [`MAX_VALUE`] are rejected; `field` names the offending
/// input in the error.
pub fn encode(n: usize, field: &'static str) -> Result<Vec<u8>, EncodingError> {
    if n > MAX_VALUE {
        return Err(EncodingError::LengthLimit {
            field,
            len: n,
            max: MAX_VALUE,
        });
    }
    if n > 127 {
        Ok(vec![((n & 0x7f) | 0x80) as u8, (n >> 7) as u8])
    } else {
        Ok(vec![n as u8])
    }
}

/// Decode a length prefix from the front of `data`.
///
/// Returns the value and the number of bytes consumed (1 or 2).
pub fn decode(data: &[u8]) -> Result<(usize, usize), EncodingError> {
    let first = *data.first().ok_or(EncodingError::Truncated)?;
    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }
    let second = *data.get(1).ok_or(EncodingError::Truncated)?;
    Ok((((first & 0x7f) as usize) | ((second as usize) << 7), 2))
}
