//! Conversion between caller-facing values and the engine's raw bytes.

use crate::encoding::{InputEncoding, Output, OutputEncoding, Value};
use crate::error::{CryptoError, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine;
use std::borrow::Cow;

/// Standard-alphabet decoder that tolerates non-zero trailing bits.
///
/// Input is gated by the structural check in [`crate::encoding`], so anything
/// that passed it must decode.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode `value` into the bytes the engine operates on.
///
/// Binary values are borrowed unchanged. The value is expected to have
/// passed [`crate::encoding::check_input_encoding`]; a shape mismatch is
/// still reported rather than coerced.
pub fn to_binary<'a>(value: Value<'a>, encoding: InputEncoding) -> Result<Cow<'a, [u8]>> {
    match (encoding, value) {
        (InputEncoding::Binary, Value::Binary(bytes)) => Ok(Cow::Borrowed(bytes)),
        (InputEncoding::Utf8, Value::Text(text)) => Ok(Cow::Borrowed(text.as_bytes())),
        (InputEncoding::Hex, Value::Text(text)) => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            hex::decode(digits)
                .map(Cow::Owned)
                .map_err(|e| CryptoError::mismatch(encoding, e.to_string()))
        }
        (InputEncoding::Base64, Value::Text(text)) => LENIENT_BASE64
            .decode(text)
            .map(Cow::Owned)
            .map_err(|e| CryptoError::mismatch(encoding, e.to_string())),
        (_, Value::Binary(_)) => Err(CryptoError::mismatch(encoding, "got a binary value")),
        (_, Value::Text(_)) => Err(CryptoError::mismatch(encoding, "got a text value")),
    }
}

/// Render engine output in the requested encoding.
///
/// Hex is lowercase, base64 is standard and padded.
pub fn from_binary(bytes: Vec<u8>, encoding: OutputEncoding) -> Output {
    match encoding {
        OutputEncoding::Binary => Output::Binary(bytes),
        OutputEncoding::Hex => Output::Text(hex::encode(bytes)),
        OutputEncoding::Base64 => Output::Text(STANDARD.encode(bytes)),
    }
}
