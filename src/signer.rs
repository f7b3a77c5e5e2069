//! Detached signature creation.

use crate::crypto::Crypto;
use crate::encoding::{Output, Value};
use crate::engine::Engine;
use crate::error::{CryptoError, Result};
use crate::options::SignOptions;
use crate::transcode;
use tracing::trace;

impl<E: Engine> Crypto<E> {
    /// Create a detached signature of `message` with `secret_key`.
    ///
    /// # Errors
    /// Returns [`CryptoError::EncodingMismatch`] if `message` does not match
    /// `options.input_encoding`, [`CryptoError::InvalidKey`] if the engine
    /// cannot use `secret_key`, or [`CryptoError::EngineOutput`] if the
    /// signature is not `sizes().signature` bytes.
    pub fn sign<'a>(
        &self,
        message: impl Into<Value<'a>>,
        secret_key: &[u8],
        options: SignOptions,
    ) -> Result<Output> {
        self.init()?;

        let message = self.decode_input(message.into(), options.input_encoding)?;
        trace!(
            input_encoding = %options.input_encoding,
            output_encoding = %options.output_encoding,
            len = message.len(),
            "signing message"
        );

        let signature = self.engine().sign_detached(&message, secret_key)?;
        let expected = self.sizes().signature;
        if signature.len() != expected {
            return Err(CryptoError::EngineOutput(format!(
                "Invalid signature length: expected {}, got {}",
                expected,
                signature.len()
            )));
        }
        Ok(transcode::from_binary(signature, options.output_encoding))
    }
}

/// Sign `message` with the shared engine.
pub fn sign<'a>(
    message: impl Into<Value<'a>>,
    secret_key: &[u8],
    options: SignOptions,
) -> Result<Output> {
    Crypto::global().sign(message, secret_key, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{is_valid_base64, InputEncoding, OutputEncoding};
    use crate::keys::generate_keypair;

    #[test]
    fn test_sign_bytes() {
        let keypair = generate_keypair().unwrap();
        let sig = sign(b"This is a test", keypair.secret_key(), SignOptions::default()).unwrap();
        assert_eq!(sig.as_bytes().map(<[u8]>::len), Some(64));
    }

    #[test]
    fn test_sign_text() {
        let keypair = generate_keypair().unwrap();
        let opts = SignOptions::new().with_input_encoding(InputEncoding::Utf8);

        let from_text = sign("This is a test", keypair.secret_key(), opts).unwrap();
        let from_bytes =
            sign(b"This is a test", keypair.secret_key(), SignOptions::default()).unwrap();

        // Ed25519 is deterministic, so both paths sign the same bytes.
        assert_eq!(from_text, from_bytes);
    }

    #[test]
    fn test_output_encoding() {
        let keypair = generate_keypair().unwrap();
        let opts = SignOptions::new()
            .with_input_encoding(InputEncoding::Utf8)
            .with_output_encoding(OutputEncoding::Base64);

        let sig = sign("This is a test", keypair.secret_key(), opts).unwrap();
        let text = sig.as_text().unwrap();
        assert!(is_valid_base64(text));
        assert_eq!(text.len(), 88);
    }

    #[test]
    fn test_declared_binary_with_text_fails() {
        let keypair = generate_keypair().unwrap();
        let result = sign("This is a test", keypair.secret_key(), SignOptions::default());
        assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));
    }

    #[test]
    fn test_wrong_secret_key_length() {
        let keypair = generate_keypair().unwrap();
        let result = sign(b"This is a test", keypair.public_key(), SignOptions::default());
        assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
    }
}
