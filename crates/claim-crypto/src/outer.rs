//! The outer envelope: AES-128-CTR over the inner ciphertext, keyed from
//! the DH shared secret, with a trailing HMAC-SHA1 tag.
//!
//! Wire layout:
//!
//! ```text
//! +----------+--------------------------+----------+
//! | IV (16)  | AES-128-CTR(inner) (N)   | MAC (20) |
//! +----------+--------------------------+----------+
//! ```
//!
//! The MAC covers the stream ciphertext only, not the IV.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes128;
use claim_core::error::CryptoError;
use ctr::Ctr128BE;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::{Digest, Sha1};
use zeroize::ZeroizeOnDrop;

use crate::dh::SharedSecret;

/// IV length in bytes.
pub const IV_BYTES: usize = 16;
/// HMAC-SHA1 tag length in bytes.
pub const MAC_BYTES: usize = 20;

/// Derivation label for the MAC key.
const CHECKSUM_LABEL: &[u8] = b"checksum";
/// Derivation label for the stream cipher key.
const ENCRYPTION_LABEL: &[u8] = b"encryption";

type Aes128Ctr = Ctr128BE<Aes128>;
type HmacSha1 = Hmac<Sha1>;

/// Keys for the outer envelope, both derived from the DH shared secret.
#[derive(ZeroizeOnDrop)]
pub struct OuterKeys {
    checksum_key: [u8; MAC_BYTES],
    encryption_key: [u8; 16],
}

impl OuterKeys {
    /// Get the 20-byte MAC key.
    pub fn checksum_key(&self) -> &[u8; MAC_BYTES] {
        &self.checksum_key
    }

    /// Get the 16-byte AES-128 key.
    pub fn encryption_key(&self) -> &[u8; 16] {
        &self.encryption_key
    }
}

/// Derive the outer keys from the DH shared secret.
///
/// `base = SHA1(sharedSecret)`, then each direction key is
/// `HMAC-SHA1(base, label)`: the full 20 bytes for "checksum", the first
/// 16 bytes for "encryption".
pub fn derive_outer_keys(shared_secret: &SharedSecret) -> OuterKeys {
    let base: [u8; 20] = Sha1::digest(shared_secret.as_bytes()).into();

    let checksum_key = hmac_sha1(&base, CHECKSUM_LABEL);
    let full_encryption_key = hmac_sha1(&base, ENCRYPTION_LABEL);

    let mut encryption_key = [0u8; 16];
    encryption_key.copy_from_slice(&full_encryption_key[..16]);

    OuterKeys {
        checksum_key,
        encryption_key,
    }
}

/// Wrap the inner ciphertext with a fresh random IV.
pub fn wrap(inner_ciphertext: &[u8], shared_secret: &SharedSecret) -> Result<Vec<u8>, CryptoError> {
    let mut iv = [0u8; IV_BYTES];
    OsRng.fill_bytes(&mut iv);
    wrap_with_iv(inner_ciphertext, shared_secret, &iv)
}

/// Wrap the inner ciphertext with an explicit IV.
///
/// Deterministic given its inputs; [`wrap`] is this with CSPRNG IV.
pub fn wrap_with_iv(
    inner_ciphertext: &[u8],
    shared_secret: &SharedSecret,
    iv: &[u8; IV_BYTES],
) -> Result<Vec<u8>, CryptoError> {
    let keys = derive_outer_keys(shared_secret);

    let mut stream_ciphertext = inner_ciphertext.to_vec();
    apply_ctr(&keys.encryption_key, iv, &mut stream_ciphertext)?;

    let mac = hmac_sha1(&keys.checksum_key, &stream_ciphertext);

    let mut blob = Vec::with_capacity(IV_BYTES + stream_ciphertext.len() + MAC_BYTES);
    blob.extend_from_slice(iv);
    blob.extend_from_slice(&stream_ciphertext);
    blob.extend_from_slice(&mac);
    Ok(blob)
}

/// AES-128-CTR keystream over `data` in place. The IV is the initial
/// counter block, incremented big-endian.
fn apply_ctr(key: &[u8; 16], iv: &[u8; IV_BYTES], data: &mut [u8]) -> Result<(), CryptoError> {
    let mut cipher = Aes128Ctr::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Encryption(format!("Invalid key/IV: {}", e)))?;
    cipher.apply_keystream(data);
    Ok(())
}

/// HMAC-SHA1 of `message` under `key`.
fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; MAC_BYTES] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().into()
}
