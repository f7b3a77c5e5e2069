//! Detached signature verification.

use crate::crypto::Crypto;
use crate::encoding::Value;
use crate::engine::Engine;
use crate::error::Result;
use crate::options::VerifyOptions;
use tracing::{debug, trace};

impl<E: Engine> Crypto<E> {
    /// Check that `signature` is a valid signature of `message` under
    /// `public_key`.
    ///
    /// A signature that does not verify is `Ok(false)`, whatever the cause:
    /// wrong key, wrong message, tampered or wrong-length signature, or a
    /// malformed public key. Only encoding problems are errors.
    ///
    /// # Errors
    /// Returns [`crate::CryptoError::EncodingMismatch`] if `signature` or
    /// `message` does not match its declared encoding.
    pub fn verify<'a, 'b>(
        &self,
        signature: impl Into<Value<'a>>,
        message: impl Into<Value<'b>>,
        public_key: &[u8],
        options: VerifyOptions,
    ) -> Result<bool> {
        self.init()?;

        let signature = self.decode_input(signature.into(), options.sig_encoding)?;
        let message = self.decode_input(message.into(), options.message_encoding)?;
        trace!(
            sig_encoding = %options.sig_encoding,
            message_encoding = %options.message_encoding,
            len = message.len(),
            "verifying signature"
        );

        let valid = self
            .engine()
            .verify_detached(&signature, &message, public_key);
        if !valid {
            debug!("signature did not verify");
        }
        Ok(valid)
    }
}

/// Verify a detached signature with the shared engine.
pub fn verify<'a, 'b>(
    signature: impl Into<Value<'a>>,
    message: impl Into<Value<'b>>,
    public_key: &[u8],
    options: VerifyOptions,
) -> Result<bool> {
    Crypto::global().verify(signature, message, public_key, options)
}
