//! Encoding tags, input/output values, and structural encoding checks.
//!
//! Every value handed to an operation is paired with an [`InputEncoding`].
//! Before any transcoding happens the pair goes through
//! [`check_input_encoding`], which rejects values whose shape cannot be what
//! the caller declared. The checks are structural only: a string that looks
//! like both hex and base64 passes for whichever one was declared.

use crate::error::{CryptoError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-zA-Z+/]{4})*(([0-9a-zA-Z+/]{2}==)|([0-9a-zA-Z+/]{3}=))?$")
        .expect("invalid regex")
});

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(0x)?([a-f0-9]{2})+$").expect("invalid regex"));

/// How an input value's bytes are to be interpreted.
///
/// Serialized by canonical name. Deserialization goes through [`FromStr`],
/// so names are matched case-insensitively and aliases are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum InputEncoding {
    /// Already-decoded bytes.
    #[default]
    Binary,
    /// Text taken as its UTF-8 bytes.
    Utf8,
    /// Pairs of hex digits, optionally `0x`-prefixed.
    Hex,
    /// Standard padded base64.
    Base64,
}

/// How a binary result is rendered for the caller.
///
/// There is no UTF-8 variant: digests, signatures and keys are not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OutputEncoding {
    #[default]
    Binary,
    Hex,
    Base64,
}

impl InputEncoding {
    /// Canonical name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "buffer",
            Self::Utf8 => "utf-8",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl OutputEncoding {
    /// Canonical name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "buffer",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buffer" | "binary" => Ok(Self::Binary),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "hex" | "hexadecimal" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(CryptoError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buffer" | "binary" => Ok(Self::Binary),
            "hex" | "hexadecimal" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(CryptoError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for InputEncoding {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for OutputEncoding {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<InputEncoding> for &'static str {
    fn from(encoding: InputEncoding) -> Self {
        encoding.as_str()
    }
}

impl From<OutputEncoding> for &'static str {
    fn from(encoding: OutputEncoding) -> Self {
        encoding.as_str()
    }
}

/// A caller-supplied value: either raw bytes or text.
///
/// Values are borrowed; operations never mutate their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Raw bytes.
    Binary(&'a [u8]),
    /// Text in UTF-8, hex or base64 form.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Value::Binary(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Value<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Value::Binary(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Value<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Value::Binary(bytes)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(text: &'a str) -> Self {
        Value::Text(text)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(text: &'a String) -> Self {
        Value::Text(text)
    }
}

impl<'a> From<&'a Output> for Value<'a> {
    fn from(output: &'a Output) -> Self {
        match output {
            Output::Binary(bytes) => Value::Binary(bytes),
            Output::Text(text) => Value::Text(text),
        }
    }
}

impl Value<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Value::Binary(_) => "binary value",
            Value::Text(_) => "text value",
        }
    }
}

/// The result of an operation, rendered per its [`OutputEncoding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Raw bytes, for [`OutputEncoding::Binary`].
    Binary(Vec<u8>),
    /// Lowercase hex or padded base64 text.
    Text(String),
}

impl Output {
    /// The binary result, if the output encoding was binary.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Output::Binary(bytes) => Some(bytes),
            Output::Text(_) => None,
        }
    }

    /// The textual result, if the output encoding was hex or base64.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Binary(_) => None,
        }
    }

    /// Whether the output was rendered as text.
    pub fn is_text(&self) -> bool {
        matches!(self, Output::Text(_))
    }

    /// Consume a binary output, returning its bytes.
    ///
    /// Text outputs yield `None`; decode them with their encoding instead of
    /// treating the characters as result bytes.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Output::Binary(bytes) => Some(bytes),
            Output::Text(_) => None,
        }
    }

    /// Consume a text output, returning its string.
    pub fn into_string(self) -> Option<String> {
        match self {
            Output::Text(text) => Some(text),
            Output::Binary(_) => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Binary(bytes) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

/// Whether `s` is structurally valid standard base64.
///
/// Accepts the standard alphabet in groups of four, with an optional final
/// group padded by one or two `=`. The empty string is valid.
pub fn is_valid_base64(s: &str) -> bool {
    BASE64_RE.is_match(s)
}

/// Whether `s` is one or more pairs of hex digits, optionally `0x`-prefixed.
pub fn is_valid_hex(s: &str) -> bool {
    HEX_RE.is_match(s)
}

/// Fail unless `value` structurally matches `encoding`.
pub fn check_input_encoding(value: &Value<'_>, encoding: InputEncoding) -> Result<()> {
    let ok = match (encoding, value) {
        (InputEncoding::Binary, Value::Binary(_)) => true,
        (InputEncoding::Utf8, Value::Text(_)) => true,
        (InputEncoding::Base64, Value::Text(text)) => is_valid_base64(text),
        (InputEncoding::Hex, Value::Text(text)) => is_valid_hex(text),
        _ => false,
    };

    if ok {
        return Ok(());
    }

    let reason = match (encoding, value) {
        (_, Value::Binary(_)) | (InputEncoding::Binary, _) => {
            format!("got a {}", value.kind())
        }
        _ => format!("text is not valid {}", encoding),
    };
    Err(CryptoError::mismatch(encoding, reason))
}
