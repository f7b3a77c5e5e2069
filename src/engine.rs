//! The cryptographic engine the operations are built on.
//!
//! [`Engine`] is the seam between the encoding layer and the primitives it
//! defers to. It works strictly on raw bytes of engine-defined lengths and
//! knows nothing about encodings. [`SodiumEngine`] is the default backend and
//! reproduces libsodium's default constructions: unkeyed BLAKE2b with a
//! 32-byte digest for generic hashing, and Ed25519 detached signatures with
//! 64-byte secret keys laid out as `seed || public key`.

use crate::error::{CryptoError, Result};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{
    Signature, Signer as DalekSigner, SigningKey, VerifyingKey, KEYPAIR_LENGTH,
    PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// BLAKE2b-256 of the empty message, checked at initialization.
const EMPTY_DIGEST_HEX: &str = "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8";

/// Fixed buffer lengths mandated by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSizes {
    pub digest: usize,
    pub public_key: usize,
    pub secret_key: usize,
    pub signature: usize,
}

/// Primitive operations provided by a cryptographic backend.
///
/// Implementations must be safe to share between threads once `init` has
/// succeeded.
pub trait Engine: Send + Sync {
    /// Prepare the engine for use. Called until it first succeeds.
    fn init(&self) -> std::result::Result<(), String>;

    /// Buffer lengths used by this engine.
    fn sizes(&self) -> EngineSizes;

    /// Unkeyed hash of `message`, `sizes().digest` bytes long.
    fn generic_hash(&self, message: &[u8]) -> Vec<u8>;

    /// Generate a fresh `(public key, secret key)` pair.
    fn sign_keypair(&self) -> (Vec<u8>, Zeroizing<Vec<u8>>);

    /// Create a detached signature of `message`.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKey`] if `secret_key` is not a usable
    /// secret key for this engine.
    fn sign_detached(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>>;

    /// Check a detached signature. Any malformed input is simply `false`.
    fn verify_detached(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool;
}

/// Default engine: BLAKE2b-256 and Ed25519 with libsodium-compatible keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct SodiumEngine;

impl SodiumEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for SodiumEngine {
    fn init(&self) -> std::result::Result<(), String> {
        let digest = self.generic_hash(&[]);
        if hex::encode(&digest) != EMPTY_DIGEST_HEX {
            return Err("hash self test failed".to_string());
        }

        let mut probe = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut probe)
            .map_err(|e| format!("randomness source unavailable: {e}"))?;
        Ok(())
    }

    fn sizes(&self) -> EngineSizes {
        EngineSizes {
            digest: 32,
            public_key: PUBLIC_KEY_LENGTH,
            secret_key: KEYPAIR_LENGTH,
            signature: SIGNATURE_LENGTH,
        }
    }

    fn generic_hash(&self, message: &[u8]) -> Vec<u8> {
        Blake2b::<U32>::digest(message).to_vec()
    }

    fn sign_keypair(&self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let secret = Zeroizing::new(signing_key.to_keypair_bytes());
        let public = signing_key.verifying_key().to_bytes().to_vec();
        (public, Zeroizing::new(secret.to_vec()))
    }

    fn sign_detached(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
        let bytes: &[u8; KEYPAIR_LENGTH] = secret_key.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Invalid secret key length: expected {}, got {}",
                KEYPAIR_LENGTH,
                secret_key.len()
            ))
        })?;

        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(signing_key.sign(message).to_bytes().to_vec())
    }

    fn verify_detached(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        let Ok(public_key) = <&[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
            return false;
        };
        verifying_key.verify_strict(message, &signature).is_ok()
    }
}
