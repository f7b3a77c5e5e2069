//! # rust-sign-codec
//!
//! Hashing, keypair generation, and detached signatures that accept and
//! produce values in several encodings instead of raw byte buffers.
//!
//! ## Features
//!
//! - **BLAKE2b-256** unkeyed hashing
//! - **Ed25519** detached signatures with libsodium-compatible keys
//! - **Encoding-aware inputs**: raw bytes, UTF-8, hex, or base64, each checked
//!   against its declared encoding before use
//! - **Encoding-aware outputs**: raw bytes, lowercase hex, or base64
//! - **Lazy, once-only** engine initialization, safe under concurrent first use
//!
//! ## Quick Start
//!
//! ### Hash a String
//!
//! ```rust
//! use rust_sign_codec::{hash, HashOptions, InputEncoding, OutputEncoding};
//!
//! let digest = hash(
//!     "Testing_the_hashing_function!",
//!     HashOptions::new()
//!         .with_input_encoding(InputEncoding::Utf8)
//!         .with_output_encoding(OutputEncoding::Hex),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     digest.as_text(),
//!     Some("7cc10832c3ec1f5581fa7cc79507069a1b7d470fa3477f003ef6c6da6a2c8e85")
//! );
//! ```
//!
//! ### Sign and Verify
//!
//! ```rust
//! use rust_sign_codec::{
//!     generate_keypair, sign, verify, InputEncoding, OutputEncoding, SignOptions,
//!     VerifyOptions,
//! };
//!
//! let keypair = generate_keypair().unwrap();
//!
//! let signature = sign(
//!     "This is a test",
//!     keypair.secret_key(),
//!     SignOptions::new()
//!         .with_input_encoding(InputEncoding::Utf8)
//!         .with_output_encoding(OutputEncoding::Base64),
//! )
//! .unwrap();
//!
//! let valid = verify(
//!     &signature,
//!     "This is a test",
//!     keypair.public_key(),
//!     VerifyOptions::new()
//!         .with_sig_encoding(InputEncoding::Base64)
//!         .with_message_encoding(InputEncoding::Utf8),
//! )
//! .unwrap();
//! assert!(valid);
//! ```
//!
//! ### Custom Engines
//!
//! The crate-level functions share one lazily built [`Crypto`]. Build your
//! own with [`Crypto::with_engine`] to inject a different [`Engine`] or to
//! keep initialization state separate.

pub mod crypto;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod hash;
pub mod keys;
pub mod lifecycle;
pub mod options;
pub mod signer;
pub mod transcode;
pub mod verifier;

// Re-export main types for convenience
pub use crypto::{init, is_initialized, Crypto};
pub use encoding::{
    check_input_encoding, is_valid_base64, is_valid_hex, InputEncoding, Output, OutputEncoding,
    Value,
};
pub use engine::{Engine, EngineSizes, SodiumEngine};
pub use error::{CryptoError, Result};
pub use hash::hash;
pub use keys::{generate_keypair, KeyPair, RawKeyPair};
pub use lifecycle::EngineLifecycle;
pub use options::{HashOptions, SignOptions, VerifyOptions};
pub use signer::sign;
pub use verifier::verify;
