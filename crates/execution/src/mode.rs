// In crates/execution/src/mode.rs

use core_types::Mode;
use std::sync::{Arc, RwLock};

/// The process-wide, runtime-switchable order routing mode.
///
/// Clones share the same underlying value.
#[derive(Debug, Clone, Default)]
pub struct ModeGate {
    mode: Arc<RwLock<Mode>>,
}

impl ModeGate {
    pub fn new(initial: Mode) -> Self {
        Self {
            mode: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Mode {
        // A poisoned lock still holds a valid `Mode`.
        *self.mode.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Stores `mode` and returns the previous one.
    pub fn set(&self, mode: Mode) -> Mode {
        let mut guard = self.mode.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, mode)
    }
}
