//! Signing keypairs.

use crate::crypto::Crypto;
use crate::encoding::{Output, OutputEncoding};
use crate::engine::Engine;
use crate::error::{CryptoError, Result};
use crate::transcode;
use std::fmt;
use tracing::trace;
use zeroize::Zeroizing;

/// A public/secret key pair for detached signatures.
///
/// Immutable once built. The secret key is wiped from memory on drop.
#[derive(Clone)]
pub struct KeyPair {
    public_key: Vec<u8>,
    secret_key: Zeroizing<Vec<u8>>,
}

/// Borrowed view of a keypair's raw key material.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyPair<'a> {
    /// The public key bytes.
    pub public_key: &'a [u8],
    /// The secret key bytes.
    pub secret_key: &'a [u8],
}

impl KeyPair {
    /// Wrap existing key material.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKey`] if either key is empty.
    pub fn new(public_key: Vec<u8>, secret_key: Vec<u8>) -> Result<Self> {
        Self::from_parts(public_key, Zeroizing::new(secret_key))
    }

    fn from_parts(public_key: Vec<u8>, secret_key: Zeroizing<Vec<u8>>) -> Result<Self> {
        if public_key.is_empty() {
            return Err(CryptoError::InvalidKey(
                "Invalid public key for keypair".to_string(),
            ));
        }
        if secret_key.is_empty() {
            return Err(CryptoError::InvalidKey(
                "Invalid secret key for keypair".to_string(),
            ));
        }
        Ok(Self {
            public_key,
            secret_key,
        })
    }

    /// Get the public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Get the secret key bytes.
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// Get both keys as a borrowed view.
    pub fn raw_keypair(&self) -> RawKeyPair<'_> {
        RawKeyPair {
            public_key: &self.public_key,
            secret_key: &self.secret_key,
        }
    }

    /// Render the public key, e.g. as hex or base64 for sharing.
    pub fn public_key_encoded(&self, encoding: OutputEncoding) -> Output {
        transcode::from_binary(self.public_key.clone(), encoding)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(&self.public_key))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl<E: Engine> Crypto<E> {
    /// Generate a new random keypair.
    ///
    /// # Errors
    /// Returns [`CryptoError::Initialization`] if the engine cannot start, or
    /// [`CryptoError::InvalidKey`] if the engine produced keys of the wrong
    /// length.
    pub fn generate_keypair(&self) -> Result<KeyPair> {
        self.init()?;

        let (public_key, secret_key) = self.engine().sign_keypair();
        let sizes = self.sizes();
        if public_key.len() != sizes.public_key || secret_key.len() != sizes.secret_key {
            return Err(CryptoError::InvalidKey(format!(
                "Invalid key lengths: expected {}/{}, got {}/{}",
                sizes.public_key,
                sizes.secret_key,
                public_key.len(),
                secret_key.len()
            )));
        }

        trace!(public_key_len = public_key.len(), "generated keypair");
        KeyPair::from_parts(public_key, secret_key)
    }
}

/// Generate a new random keypair with the shared engine.
pub fn generate_keypair() -> Result<KeyPair> {
    Crypto::global().generate_keypair()
}
