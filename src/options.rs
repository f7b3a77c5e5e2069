//! Per-operation encoding options.
//!
//! Every field defaults to binary. Options can be built in code with the
//! `with_*` setters or loaded from a partial JSON object, in which case
//! missing fields keep their defaults:
//!
//! ```rust
//! use rust_sign_codec::{HashOptions, InputEncoding, OutputEncoding};
//!
//! let opts = HashOptions::from_json(r#"{"outputEncoding": "hex"}"#).unwrap();
//! assert_eq!(opts.input_encoding, InputEncoding::Binary);
//! assert_eq!(opts.output_encoding, OutputEncoding::Hex);
//! ```

use crate::encoding::{InputEncoding, OutputEncoding};
use crate::error::{CryptoError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Options for [`crate::Crypto::hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HashOptions {
    pub input_encoding: InputEncoding,
    pub output_encoding: OutputEncoding,
}

/// Options for [`crate::Crypto::sign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SignOptions {
    pub input_encoding: InputEncoding,
    pub output_encoding: OutputEncoding,
}

/// Options for [`crate::Crypto::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyOptions {
    pub sig_encoding: InputEncoding,
    pub message_encoding: InputEncoding,
}

/// Option fields as written in JSON, before tag names are resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawHashOptions {
    input_encoding: Option<String>,
    output_encoding: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSignOptions {
    input_encoding: Option<String>,
    output_encoding: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawVerifyOptions {
    sig_encoding: Option<String>,
    message_encoding: Option<String>,
}

/// Resolve an optional tag name, falling back to the default encoding.
fn tag<T>(name: Option<String>) -> Result<T>
where
    T: FromStr<Err = CryptoError> + Default,
{
    name.map_or_else(|| Ok(T::default()), |name| name.parse())
}

impl HashOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_encoding(mut self, encoding: InputEncoding) -> Self {
        self.input_encoding = encoding;
        self
    }

    pub fn with_output_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }

    /// Parse options from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    /// Returns [`CryptoError::Json`] for malformed JSON or unknown fields, and
    /// [`CryptoError::UnsupportedEncoding`] for an unrecognized encoding name.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawHashOptions = serde_json::from_str(json)?;
        Ok(Self {
            input_encoding: tag(raw.input_encoding)?,
            output_encoding: tag(raw.output_encoding)?,
        })
    }
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_encoding(mut self, encoding: InputEncoding) -> Self {
        self.input_encoding = encoding;
        self
    }

    pub fn with_output_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }

    /// Parse options from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    /// Returns [`CryptoError::Json`] for malformed JSON or unknown fields, and
    /// [`CryptoError::UnsupportedEncoding`] for an unrecognized encoding name.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSignOptions = serde_json::from_str(json)?;
        Ok(Self {
            input_encoding: tag(raw.input_encoding)?,
            output_encoding: tag(raw.output_encoding)?,
        })
    }
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sig_encoding(mut self, encoding: InputEncoding) -> Self {
        self.sig_encoding = encoding;
        self
    }

    pub fn with_message_encoding(mut self, encoding: InputEncoding) -> Self {
        self.message_encoding = encoding;
        self
    }

    /// Parse options from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    /// Returns [`CryptoError::Json`] for malformed JSON or unknown fields, and
    /// [`CryptoError::UnsupportedEncoding`] for an unrecognized encoding name.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawVerifyOptions = serde_json::from_str(json)?;
        Ok(Self {
            sig_encoding: tag(raw.sig_encoding)?,
            message_encoding: tag(raw.message_encoding)?,
        })
    }
}
