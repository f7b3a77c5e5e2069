//! Integration tests for rust-sign-codec.

use rust_sign_codec::{
    generate_keypair, hash, is_valid_base64, sign, verify, Crypto, CryptoError, Engine,
    EngineSizes, HashOptions, InputEncoding, Output, OutputEncoding, SignOptions, SodiumEngine,
    Value, VerifyOptions,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use zeroize::Zeroizing;

const HASH_INPUT: &str = "Testing_the_hashing_function!";
const MSG: &str = "This is a test";

fn utf8_sign() -> SignOptions {
    SignOptions::new().with_input_encoding(InputEncoding::Utf8)
}

fn utf8_verify() -> VerifyOptions {
    VerifyOptions::new().with_message_encoding(InputEncoding::Utf8)
}

#[test]
fn test_hash_literal_vectors() {
    let opts = HashOptions::new().with_input_encoding(InputEncoding::Utf8);

    let b64 = hash(HASH_INPUT, opts.with_output_encoding(OutputEncoding::Base64)).unwrap();
    assert_eq!(
        b64,
        Output::Text("fMEIMsPsH1WB+nzHlQcGmht9Rw+jR38APvbG2mosjoU=".to_string())
    );

    let hex = hash(HASH_INPUT, opts.with_output_encoding(OutputEncoding::Hex)).unwrap();
    assert_eq!(
        hex,
        Output::Text("7cc10832c3ec1f5581fa7cc79507069a1b7d470fa3477f003ef6c6da6a2c8e85".to_string())
    );

    // Same bytes supplied as a buffer.
    let from_bytes = hash(
        HASH_INPUT.as_bytes(),
        HashOptions::new().with_output_encoding(OutputEncoding::Base64),
    )
    .unwrap();
    assert_eq!(from_bytes, b64);
}

#[test]
fn test_full_signing_workflow() {
    let keypair = generate_keypair().unwrap();
    let raw = keypair.raw_keypair();
    assert_eq!(raw.public_key.len(), 32);
    assert_eq!(raw.secret_key.len(), 64);

    let signature = sign(MSG, raw.secret_key, utf8_sign()).unwrap();
    assert!(!signature.is_text());
    assert!(verify(&signature, MSG, raw.public_key, utf8_verify()).unwrap());
}

#[test]
fn test_corrupted_first_byte() {
    let keypair = generate_keypair().unwrap();
    let signature = sign(MSG, keypair.secret_key(), utf8_sign()).unwrap();

    let mut corrupted = signature.into_bytes().unwrap();
    corrupted[0] = if corrupted[0] == 0x00 { 0xff } else { 0x00 };

    let valid = verify(&corrupted, MSG, keypair.public_key(), utf8_verify()).unwrap();
    assert!(!valid);
}

#[test]
fn test_any_flipped_byte_fails() {
    let keypair = generate_keypair().unwrap();
    let signature = sign(MSG, keypair.secret_key(), utf8_sign())
        .unwrap()
        .into_bytes()
        .unwrap();

    for i in 0..signature.len() {
        let mut tampered = signature.clone();
        tampered[i] ^= 0x80;
        assert!(
            !verify(&tampered, MSG, keypair.public_key(), utf8_verify()).unwrap(),
            "flipping byte {i} still verified"
        );
    }
}

#[test]
fn test_cross_key_and_message() {
    let alice = generate_keypair().unwrap();
    let bob = generate_keypair().unwrap();

    let sig = sign(MSG, alice.secret_key(), utf8_sign()).unwrap();
    assert!(verify(&sig, MSG, alice.public_key(), utf8_verify()).unwrap());
    assert!(!verify(&sig, MSG, bob.public_key(), utf8_verify()).unwrap());
    assert!(!verify(&sig, "This is another test", alice.public_key(), utf8_verify()).unwrap());
}

#[test]
fn test_all_input_encodings_agree() {
    let keypair = generate_keypair().unwrap();
    let bytes = MSG.as_bytes();
    let hex_msg = format!("0x{}", hex::encode(bytes));
    let b64_msg = Output::Text("VGhpcyBpcyBhIHRlc3Q=".to_string());

    let sig_bin = sign(bytes, keypair.secret_key(), SignOptions::default()).unwrap();
    let sig_hex = sign(
        &hex_msg,
        keypair.secret_key(),
        SignOptions::new().with_input_encoding(InputEncoding::Hex),
    )
    .unwrap();
    let sig_b64 = sign(
        &b64_msg,
        keypair.secret_key(),
        SignOptions::new().with_input_encoding(InputEncoding::Base64),
    )
    .unwrap();
    assert_eq!(sig_bin, sig_hex);
    assert_eq!(sig_bin, sig_b64);

    let sig_text = sign(
        bytes,
        keypair.secret_key(),
        SignOptions::new().with_output_encoding(OutputEncoding::Base64),
    )
    .unwrap();
    assert!(is_valid_base64(sig_text.as_text().unwrap()));

    let opts = VerifyOptions::new()
        .with_sig_encoding(InputEncoding::Base64)
        .with_message_encoding(InputEncoding::Hex);
    assert!(verify(&sig_text, &hex_msg, keypair.public_key(), opts).unwrap());
}

#[test]
fn test_encoding_mismatches() {
    let keypair = generate_keypair().unwrap();
    let bytes = MSG.as_bytes();

    // Text declared as binary.
    let result = sign(MSG, keypair.secret_key(), SignOptions::default());
    assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));

    // Binary declared as text.
    let result = hash(bytes, HashOptions::new().with_input_encoding(InputEncoding::Utf8));
    assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));

    // Malformed hex and base64.
    let result = hash("abc", HashOptions::new().with_input_encoding(InputEncoding::Hex));
    assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));
    let result = hash("abc", HashOptions::new().with_input_encoding(InputEncoding::Base64));
    assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));

    // Verify reports mismatch as an error, not as `false`.
    let sig = sign(bytes, keypair.secret_key(), SignOptions::default()).unwrap();
    let result = verify(&sig, MSG, keypair.public_key(), VerifyOptions::default());
    assert!(matches!(result, Err(CryptoError::EncodingMismatch { .. })));
}

#[test]
fn test_options_from_json() {
    let keypair = generate_keypair().unwrap();
    let sign_opts = SignOptions::from_json(r#"{"inputEncoding": "utf-8", "outputEncoding": "hex"}"#)
        .unwrap();
    let sig = sign(MSG, keypair.secret_key(), sign_opts).unwrap();

    let verify_opts =
        VerifyOptions::from_json(r#"{"sigEncoding": "hex", "messageEncoding": "utf-8"}"#).unwrap();
    assert!(verify(&sig, MSG, keypair.public_key(), verify_opts).unwrap());

    let result = SignOptions::from_json(r#"{"inputEncoding": "ascii"}"#);
    assert!(matches!(
        result,
        Err(CryptoError::UnsupportedEncoding(name)) if name == "ascii"
    ));

    let result = HashOptions::from_json(r#"{"outputEncoding": "utf-8"}"#);
    assert!(matches!(result, Err(CryptoError::UnsupportedEncoding(_))));

    let opts = HashOptions::from_json(r#"{"inputEncoding": "UTF-8", "outputEncoding": "HEX"}"#)
        .unwrap();
    let digest = hash(HASH_INPUT, opts).unwrap();
    assert_eq!(
        digest.as_text(),
        Some("7cc10832c3ec1f5581fa7cc79507069a1b7d470fa3477f003ef6c6da6a2c8e85")
    );
}

#[test]
fn test_value_conversions() {
    let owned = String::from("text");
    let bytes = vec![1u8, 2, 3];
    assert_eq!(Value::from(&owned), Value::Text("text"));
    assert_eq!(Value::from(&bytes), Value::Binary(&[1, 2, 3]));
    assert_eq!(Value::from(&[9u8; 2]), Value::Binary(&[9, 9]));
}

/// Engine wrapper that fails `init` until told otherwise.
struct GatedEngine {
    ready: AtomicBool,
    init_calls: AtomicUsize,
}

impl GatedEngine {
    fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
        }
    }
}

impl Engine for GatedEngine {
    fn init(&self) -> std::result::Result<(), String> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.ready.load(Ordering::SeqCst) {
            SodiumEngine.init()
        } else {
            Err("engine offline".to_string())
        }
    }

    fn sizes(&self) -> EngineSizes {
        SodiumEngine.sizes()
    }

    fn generic_hash(&self, message: &[u8]) -> Vec<u8> {
        SodiumEngine.generic_hash(message)
    }

    fn sign_keypair(&self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        SodiumEngine.sign_keypair()
    }

    fn sign_detached(&self, message: &[u8], secret_key: &[u8]) -> rust_sign_codec::Result<Vec<u8>> {
        SodiumEngine.sign_detached(message, secret_key)
    }

    fn verify_detached(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
        SodiumEngine.verify_detached(signature, message, public_key)
    }
}

#[test]
fn test_initialization_failure_is_retryable() {
    let crypto = Crypto::with_engine(GatedEngine::new());

    let err = crypto.generate_keypair().unwrap_err();
    assert!(matches!(err, CryptoError::Initialization(_)));
    assert!(err.is_retryable());
    assert!(!crypto.is_initialized());

    let err = crypto.hash(b"data", HashOptions::default()).unwrap_err();
    assert!(matches!(err, CryptoError::Initialization(_)));

    crypto.engine().ready.store(true, Ordering::SeqCst);
    let keypair = crypto.generate_keypair().unwrap();
    assert!(crypto.is_initialized());

    let sig = crypto
        .sign(b"data", keypair.secret_key(), SignOptions::default())
        .unwrap();
    assert!(crypto
        .verify(&sig, b"data", keypair.public_key(), VerifyOptions::default())
        .unwrap());

    // Two failures, one success, then no further init calls.
    assert_eq!(crypto.engine().init_calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_initialization_checked_before_encoding() {
    let crypto = Crypto::with_engine(GatedEngine::new());
    let err = crypto.hash("not bytes", HashOptions::default()).unwrap_err();
    assert!(matches!(err, CryptoError::Initialization(_)));
}

#[test]
fn test_concurrent_first_use() {
    let crypto = Crypto::with_engine(GatedEngine::new());
    crypto.engine().ready.store(true, Ordering::SeqCst);

    std::thread::scope(|s| {
        for i in 0..8u8 {
            let crypto = &crypto;
            s.spawn(move || {
                let digest = crypto.hash(&[i], HashOptions::default()).unwrap();
                assert_eq!(digest.as_bytes().map(<[u8]>::len), Some(32));
            });
        }
    });

    assert_eq!(crypto.engine().init_calls.load(Ordering::SeqCst), 1);
}

/// Engine that drops the last byte of every digest and signature.
struct TruncatingEngine;

impl Engine for TruncatingEngine {
    fn init(&self) -> std::result::Result<(), String> {
        SodiumEngine.init()
    }

    fn sizes(&self) -> EngineSizes {
        SodiumEngine.sizes()
    }

    fn generic_hash(&self, message: &[u8]) -> Vec<u8> {
        let mut digest = SodiumEngine.generic_hash(message);
        digest.pop();
        digest
    }

    fn sign_keypair(&self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        SodiumEngine.sign_keypair()
    }

    fn sign_detached(&self, message: &[u8], secret_key: &[u8]) -> rust_sign_codec::Result<Vec<u8>> {
        let mut signature = SodiumEngine.sign_detached(message, secret_key)?;
        signature.pop();
        Ok(signature)
    }

    fn verify_detached(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
        SodiumEngine.verify_detached(signature, message, public_key)
    }
}

#[test]
fn test_wrong_length_engine_output_rejected() {
    let crypto = Crypto::with_engine(TruncatingEngine);

    let result = crypto.hash(b"data", HashOptions::default());
    assert!(matches!(result, Err(CryptoError::EngineOutput(_))));

    let keypair = crypto.generate_keypair().unwrap();
    let result = crypto.sign(b"data", keypair.secret_key(), SignOptions::default());
    assert!(matches!(result, Err(CryptoError::EngineOutput(_))));
}
