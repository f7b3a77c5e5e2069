//! Unkeyed hashing.

use crate::crypto::Crypto;
use crate::encoding::{Output, Value};
use crate::engine::Engine;
use crate::error::{CryptoError, Result};
use crate::options::HashOptions;
use crate::transcode;
use tracing::trace;

impl<E: Engine> Crypto<E> {
    /// Hash `message` with the engine's generic hash.
    ///
    /// The digest is `sizes().digest` bytes, rendered per
    /// `options.output_encoding`. The same message and input encoding
    /// always produce the same digest.
    ///
    /// # Errors
    /// Returns [`CryptoError::EncodingMismatch`] if `message` does not match
    /// `options.input_encoding`, or [`CryptoError::EngineOutput`] if the
    /// engine's digest is not `sizes().digest` bytes.
    pub fn hash<'a>(&self, message: impl Into<Value<'a>>, options: HashOptions) -> Result<Output> {
        self.init()?;

        let message = self.decode_input(message.into(), options.input_encoding)?;
        trace!(
            input_encoding = %options.input_encoding,
            output_encoding = %options.output_encoding,
            len = message.len(),
            "hashing message"
        );

        let digest = self.engine().generic_hash(&message);
        let expected = self.sizes().digest;
        if digest.len() != expected {
            return Err(CryptoError::EngineOutput(format!(
                "Invalid digest length: expected {}, got {}",
                expected,
                digest.len()
            )));
        }
        Ok(transcode::from_binary(digest, options.output_encoding))
    }
}

/// Hash `message` with the shared engine.
pub fn hash<'a>(message: impl Into<Value<'a>>, options: HashOptions) -> Result<Output> {
    Crypto::global().hash(message, options)
}
