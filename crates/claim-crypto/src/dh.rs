//! Ephemeral Diffie-Hellman key exchange with the device.
//!
//! Uses the fixed 768-bit prime (RFC 2409 Oakley Group 1) with generator 2.
//! The group is a protocol constant, never negotiated. 768-bit DH is weak by
//! current standards; the device firmware accepts nothing else.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use claim_core::error::CryptoError;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public values and shared secrets are fixed-width: 768 bits = 96 bytes.
pub const KEY_BYTES: usize = 96;

/// RFC 2409 Oakley Group 1 768-bit prime as hex string.
const OAKLEY_GROUP1_PRIME: &str = concat!(
    "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd1",
    "29024e088a67cc74020bbea63b139b22514a08798e3404dd",
    "ef9519b3cd3a431b302b0a6df25f14374fe1356d6d51c245",
    "e485b576625e7ec6f44c42e9a63a3620ffffffffffffffff"
);

/// DH group parameters (768-bit, RFC 2409 Oakley Group 1).
pub struct DhParams {
    /// Prime modulus P.
    pub prime: BigUint,
    /// Generator g (always 2).
    pub generator: BigUint,
}

impl Default for DhParams {
    fn default() -> Self {
        let prime = BigUint::parse_bytes(OAKLEY_GROUP1_PRIME.as_bytes(), 16)
            .expect("Invalid Oakley Group 1 prime constant");
        let generator = BigUint::from(2u32);
        Self { prime, generator }
    }
}

/// Shared secret from the DH exchange, 96 bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Ephemeral DH key pair, generated fresh per claim attempt.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DhKeyPair {
    #[zeroize(skip)]
    params: DhParams,
    /// Private scalar as 95 big-endian bytes of CSPRNG output.
    private_scalar: Vec<u8>,
    #[zeroize(skip)]
    public: BigUint,
}

impl DhKeyPair {
    /// Generate a new random key pair over the default group.
    pub fn generate() -> Self {
        Self::generate_with(DhParams::default())
    }

    /// Generate a new random key pair over explicit parameters.
    pub fn generate_with(params: DhParams) -> Self {
        let mut private_scalar = vec![0u8; KEY_BYTES - 1];
        OsRng.fill_bytes(&mut private_scalar);

        let a = BigUint::from_bytes_be(&private_scalar);
        let public = params.generator.modpow(&a, &params.prime);

        Self {
            params,
            private_scalar,
            public,
        }
    }

    /// Create a key pair with a specific private scalar (for testing).
    #[cfg(test)]
    pub fn with_private_scalar(private_scalar: &[u8]) -> Self {
        let params = DhParams::default();
        let a = BigUint::from_bytes_be(private_scalar);
        let public = params.generator.modpow(&a, &params.prime);

        Self {
            params,
            private_scalar: private_scalar.to_vec(),
            public,
        }
    }

    /// Get the public value, 96 bytes big-endian, left-padded with zeros.
    pub fn public_key(&self) -> [u8; KEY_BYTES] {
        pad_to_key(&self.public)
    }

    /// Compute the shared secret from the device's base64 public value.
    ///
    /// The decoded value must be exactly 96 bytes. Beyond that the peer
    /// value is trusted as-is: `1 < peer < P-1` is deliberately NOT
    /// enforced, because the deployed firmware does not perform the check
    /// either and a stricter client could diverge from it. The only party
    /// that can exploit the omission is the device being claimed.
    pub fn shared_secret(&self, peer_public_b64: &str) -> Result<SharedSecret, CryptoError> {
        let peer_bytes = BASE64
            .decode(peer_public_b64)
            .map_err(|e| CryptoError::InvalidDeviceKey(format!("base64 decode failed: {}", e)))?;

        if peer_bytes.len() != KEY_BYTES {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_BYTES,
                actual: peer_bytes.len(),
            });
        }

        let peer = BigUint::from_bytes_be(&peer_bytes);
        let a = BigUint::from_bytes_be(&self.private_scalar);
        let shared = peer.modpow(&a, &self.params.prime);

        Ok(SharedSecret(pad_to_key(&shared).to_vec()))
    }
}

/// Pad a group element to KEY_BYTES with leading zeros.
fn pad_to_key(value: &BigUint) -> [u8; KEY_BYTES] {
    let bytes = value.to_bytes_be();
    let mut padded = [0u8; KEY_BYTES];
    padded[KEY_BYTES - bytes.len()..].copy_from_slice(&bytes);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    mod dh_params {
        use super::*;

        #[test]
        fn default_uses_768_bit_prime() {
            let params = DhParams::default();
            let prime_bytes = params.prime.to_bytes_be();
            // 768 bits = 96 bytes
            assert_eq!(prime_bytes.len(), 96);
        }

        #[test]
        fn generator_is_2() {
            let params = DhParams::default();
            assert_eq!(params.generator, BigUint::from(2u32));
        }

        #[test]
        fn prime_matches_oakley_group_1() {
            let params = DhParams::default();
            let prime_hex = hex::encode(params.prime.to_bytes_be());
            assert_eq!(prime_hex, OAKLEY_GROUP1_PRIME);
        }
    }

    mod key_generation {
        use super::*;

        #[test]
        fn public_key_is_96_bytes() {
            let keypair = DhKeyPair::generate();
            assert_eq!(keypair.public_key().len(), KEY_BYTES);
        }

        #[test]
        fn generate_creates_unique_keys() {
            let kp1 = DhKeyPair::generate();
            let kp2 = DhKeyPair::generate();
            assert_ne!(kp1.public_key(), kp2.public_key());
        }

        #[test]
        fn public_key_is_deterministic_for_same_scalar() {
            let scalar = vec![0x42u8; 95];
            let kp1 = DhKeyPair::with_private_scalar(&scalar);
            let kp2 = DhKeyPair::with_private_scalar(&scalar);
            assert_eq!(kp1.public_key(), kp2.public_key());
        }

        #[test]
        fn small_scalar_public_key_is_left_padded() {
            // g^1 mod P = 2, so the public value is 95 zero bytes then 0x02
            let keypair = DhKeyPair::with_private_scalar(&[0x01]);
            let public = keypair.public_key();
            assert!(public[..KEY_BYTES - 1].iter().all(|&b| b == 0));
            assert_eq!(public[KEY_BYTES - 1], 0x02);
        }
    }

    mod shared_secret {
        use super::*;

        #[test]
        fn exchange_is_symmetric() {
            let alice = DhKeyPair::generate();
            let bob = DhKeyPair::generate();

            let alice_public_b64 = BASE64.encode(alice.public_key());
            let bob_public_b64 = BASE64.encode(bob.public_key());

            let shared_a = alice.shared_secret(&bob_public_b64).unwrap();
            let shared_b = bob.shared_secret(&alice_public_b64).unwrap();

            assert_eq!(shared_a.as_bytes(), shared_b.as_bytes());
        }

        #[test]
        fn shared_secret_is_96_bytes() {
            let alice = DhKeyPair::generate();
            let bob = DhKeyPair::generate();
            let shared = alice
                .shared_secret(&BASE64.encode(bob.public_key()))
                .unwrap();
            assert_eq!(shared.as_bytes().len(), KEY_BYTES);
        }

        #[test]
        fn different_peers_produce_different_secrets() {
            let alice = DhKeyPair::generate();
            let bob = DhKeyPair::generate();
            let charlie = DhKeyPair::generate();

            let shared_ab = alice
                .shared_secret(&BASE64.encode(bob.public_key()))
                .unwrap();
            let shared_ac = alice
                .shared_secret(&BASE64.encode(charlie.public_key()))
                .unwrap();

            assert_ne!(shared_ab.as_bytes(), shared_ac.as_bytes());
        }

        #[test]
        fn rejects_invalid_base64() {
            let keypair = DhKeyPair::generate();
            let result = keypair.shared_secret("not-valid-base64!!!");
            assert!(matches!(result, Err(CryptoError::InvalidDeviceKey(_))));
        }

        #[test]
        fn rejects_undersized_peer_key() {
            let keypair = DhKeyPair::generate();
            let short = BASE64.encode([0xABu8; 12]);
            match keypair.shared_secret(&short) {
                Err(CryptoError::InvalidKeyLength { expected, actual }) => {
                    assert_eq!(expected, 96);
                    assert_eq!(actual, 12);
                }
                other => panic!("expected InvalidKeyLength, got {:?}", other.map(|_| ())),
            }
        }

        #[test]
        fn rejects_oversized_peer_key() {
            let keypair = DhKeyPair::generate();
            let long = BASE64.encode([0xABu8; 97]);
            assert!(matches!(
                keypair.shared_secret(&long),
                Err(CryptoError::InvalidKeyLength { .. })
            ));
        }
    }

    mod known_vectors {
        use super::*;

        #[test]
        fn modpow_matches_hand_computed_small_exponent() {
            // g^7 mod P = 128 for any P > 128, so the encoding is
            // 95 zero bytes then 0x80
            let keypair = DhKeyPair::with_private_scalar(&[0x07]);
            let public = keypair.public_key();
            assert!(public[..KEY_BYTES - 1].iter().all(|&b| b == 0));
            assert_eq!(public[KEY_BYTES - 1], 0x80);
        }

        #[test]
        fn shared_secret_with_known_scalars() {
            // With a = 2 and b = 3: shared = g^(ab) = 2^6 = 64 on both sides
            let alice = DhKeyPair::with_private_scalar(&[0x02]);
            let bob = DhKeyPair::with_private_scalar(&[0x03]);

            let shared_a = alice
                .shared_secret(&BASE64.encode(bob.public_key()))
                .unwrap();
            let shared_b = bob
                .shared_secret(&BASE64.encode(alice.public_key()))
                .unwrap();

            assert_eq!(shared_a.as_bytes(), shared_b.as_bytes());
            assert_eq!(shared_a.as_bytes()[KEY_BYTES - 1], 64);
            assert!(shared_a.as_bytes()[..KEY_BYTES - 1].iter().all(|&b| b == 0));
        }
    }

    mod security {
        use super::*;

        #[test]
        fn private_scalar_zeroized_on_drop() {
            // Create a keypair, drop it, verify memory is cleared
            // This is verified by the ZeroizeOnDrop derive
            let keypair = DhKeyPair::generate();
            drop(keypair);
            // The ZeroizeOnDrop derive ensures the scalar is cleared
        }
    }
}
