//! Credential blob construction and the inner encryption layer.
//!
//! The blob serializes `(username, auth type, access token)` in the layout
//! the device firmware's decoder reads back field by field:
//!
//! ```text
//! 0x00
//! varint(len(username)) || username
//! 0x00
//! varint(4)                          // auth type: OAuth access token
//! 0x00
//! varint(len(token)) || token
//! <zero padding to a 16-byte boundary>
//! ```
//!
//! The padded buffer is then XOR-obfuscated ([`xor_obfuscate`]) and
//! encrypted with AES-192-ECB under a key derived from the device id and
//! username.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes192;
use claim_core::error::{CryptoError, EncodingError};
use pbkdf2::pbkdf2_hmac;
use sha1::{Digest, Sha1};
use zeroize::ZeroizeOnDrop;

use crate::varint;

/// Auth-type tag for an OAuth access token credential.
pub const AUTH_TYPE_ACCESS_TOKEN: usize = 4;

/// PBKDF2 iteration count for the inner key. Fixed by the firmware decoder.
pub const PBKDF2_ITERATIONS: u32 = 256;

const BLOCK_BYTES: usize = 16;
const INNER_KEY_BYTES: usize = 24;

/// 24-byte AES-192 key for the inner layer.
#[derive(Clone, ZeroizeOnDrop)]
pub struct InnerKey([u8; INNER_KEY_BYTES]);

impl InnerKey {
    /// Create from raw bytes.
    pub fn new(bytes: [u8; INNER_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; INNER_KEY_BYTES] {
        &self.0
    }
}

/// Build the plaintext credential blob: serialized fields, zero-padded to a
/// 16-byte boundary, then XOR-obfuscated.
pub fn build_credentials(username: &str, access_token: &str) -> Result<Vec<u8>, EncodingError> {
    let username_bytes = username.as_bytes();
    let token_bytes = access_token.as_bytes();

    let mut blob = Vec::with_capacity(username_bytes.len() + token_bytes.len() + 24);
    blob.push(0x00);
    blob.extend_from_slice(&varint::encode(username_bytes.len(), "username")?);
    blob.extend_from_slice(username_bytes);
    blob.push(0x00);
    blob.extend_from_slice(&varint::encode(AUTH_TYPE_ACCESS_TOKEN, "auth type")?);
    blob.push(0x00);
    blob.extend_from_slice(&varint::encode(token_bytes.len(), "access token")?);
    blob.extend_from_slice(token_bytes);

    let padding = (BLOCK_BYTES - blob.len() % BLOCK_BYTES) % BLOCK_BYTES;
    blob.resize(blob.len() + padding, 0x00);

    xor_obfuscate(&mut blob);
    Ok(blob)
}

/// The blob format's self-referential byte transform: every byte at offset
/// 16 or later is XORed with the byte 16 positions earlier, processed
/// FORWARD from offset 16 to the end.
///
/// The firmware decoder inverts this by walking backward; direction and
/// offset are wire-format facts, so the transform lives in its own function
/// where both stay auditable. The first 16 bytes are never touched.
pub fn xor_obfuscate(buffer: &mut [u8]) {
    for j in BLOCK_BYTES..buffer.len() {
        buffer[j] ^= buffer[j - BLOCK_BYTES];
    }
}

/// Derive the 24-byte inner key from the device id and username.
///
/// `secret = SHA1(deviceId)`, then
/// `baseKey = PBKDF2-HMAC-SHA1(secret, username, 256 iterations, 20 bytes)`,
/// then `key = SHA1(baseKey) || big-endian-u32(20)`. The trailing length
/// word brings the key to AES-192 width.
pub fn derive_inner_key(device_id: &str, username: &str) -> InnerKey {
    let secret: [u8; 20] = Sha1::digest(device_id.as_bytes()).into();

    let mut base_key = [0u8; 20];
    pbkdf2_hmac::<Sha1>(
        &secret,
        username.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut base_key,
    );

    let digest: [u8; 20] = Sha1::digest(base_key).into();
    let mut key = [0u8; INNER_KEY_BYTES];
    key[..20].copy_from_slice(&digest);
    key[20..].copy_from_slice(&(base_key.len() as u32).to_be_bytes());
    InnerKey(key)
}

/// Encrypt a built blob with AES-192 in ECB mode.
///
/// The blob is already block-aligned, so no further padding is applied.
/// ECB is the firmware's choice for this layer, not ours.
pub fn encrypt_credentials(key: &InnerKey, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if blob.len() % BLOCK_BYTES != 0 {
        return Err(CryptoError::Encryption(
            "Credential blob must be a multiple of 16 bytes".to_string(),
        ));
    }

    let cipher = Aes192::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("Invalid key: {}", e)))?;

    let mut ciphertext = blob.to_vec();
    for chunk in ciphertext.chunks_mut(BLOCK_BYTES) {
        let block = aes::Block::from_mut_slice(chunk);
        cipher.encrypt_block(block);
    }

    Ok(ciphertext)
}
