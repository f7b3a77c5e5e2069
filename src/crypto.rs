//! The operations facade and its process-wide default instance.

use crate::encoding::{check_input_encoding, InputEncoding, Value};
use crate::engine::{Engine, EngineSizes, SodiumEngine};
use crate::error::Result;
use crate::lifecycle::EngineLifecycle;
use crate::transcode;
use std::borrow::Cow;
use std::sync::OnceLock;

static GLOBAL: OnceLock<Crypto> = OnceLock::new();

/// Encoding-aware hashing and signing over an [`Engine`].
///
/// Every operation initializes the engine on first use, validates each input
/// against its declared encoding, decodes it to bytes, runs the engine
/// primitive and renders the result in the requested output encoding.
///
/// A `Crypto` owns its engine and initialization state, so independent
/// instances never share lifecycle. The free functions at the crate root
/// use [`Crypto::global`].
#[derive(Debug)]
pub struct Crypto<E: Engine = SodiumEngine> {
    engine: E,
    sizes: EngineSizes,
    lifecycle: EngineLifecycle,
}

impl Crypto<SodiumEngine> {
    /// Create a facade over the default engine.
    pub fn new() -> Self {
        Self::with_engine(SodiumEngine::new())
    }

    /// The shared instance used by the crate-level functions.
    ///
    /// Built on first access; the engine itself is still initialized lazily
    /// by the first operation.
    pub fn global() -> &'static Crypto {
        GLOBAL.get_or_init(Crypto::new)
    }
}

impl Default for Crypto<SodiumEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Crypto<E> {
    /// Create a facade over a custom engine.
    pub fn with_engine(engine: E) -> Self {
        let sizes = engine.sizes();
        Self {
            engine,
            sizes,
            lifecycle: EngineLifecycle::new(),
        }
    }

    /// Initialize the engine now instead of on first use.
    ///
    /// # Errors
    /// Returns [`crate::CryptoError::Initialization`] if the engine fails to
    /// start. The call may be retried.
    pub fn init(&self) -> Result<()> {
        self.lifecycle.ensure_initialized(&self.engine)
    }

    /// Whether the engine has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    /// Buffer lengths reported by the engine.
    pub fn sizes(&self) -> EngineSizes {
        self.sizes
    }

    /// Get the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate `value` against `encoding` and decode it to bytes.
    pub(crate) fn decode_input<'a>(
        &self,
        value: Value<'a>,
        encoding: InputEncoding,
    ) -> Result<Cow<'a, [u8]>> {
        check_input_encoding(&value, encoding)?;
        transcode::to_binary(value, encoding)
    }
}

/// Initialize the shared engine.
pub fn init() -> Result<()> {
    Crypto::global().init()
}

/// Whether the shared engine has been initialized.
pub fn is_initialized() -> bool {
    Crypto::global().is_initialized()
}
