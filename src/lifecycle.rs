//! One-time, lazy engine initialization.

use crate::engine::Engine;
use crate::error::{CryptoError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Tracks whether an engine has been initialized.
///
/// The flag goes from `false` to `true` at most once and is never reset.
/// Concurrent first callers serialize on an internal lock so the engine's
/// `init` runs exactly once on success. A failed `init` leaves the flag
/// unset and the next caller tries again.
#[derive(Debug, Default)]
pub struct EngineLifecycle {
    initialized: AtomicBool,
    lock: Mutex<()>,
}

impl EngineLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Initialize `engine` unless that has already succeeded.
    ///
    /// # Errors
    /// Returns [`CryptoError::Initialization`] if the engine reports failure.
    pub fn ensure_initialized(&self, engine: &dyn Engine) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        // The guarded section only touches the flag, so a poisoned lock
        // carries no broken state.
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.is_initialized() {
            return Ok(());
        }

        match engine.init() {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                debug!(sizes = ?engine.sizes(), "crypto engine initialized");
                Ok(())
            }
            Err(reason) => {
                warn!(%reason, "crypto engine failed to initialize");
                Err(CryptoError::Initialization(reason))
            }
        }
    }
}
