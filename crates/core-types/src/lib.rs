// In crates/core-types/src/lib.rs

pub mod error;
pub mod instrument;
pub mod sinks;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use instrument::{validate_instruments, InstrumentConfig};
pub use sinks::{Notifier, OrderStore};
pub use types::{
    Execution, InstrumentToken, Mode, OrderRecord, OrderRequest, Side, Symbol, Tick,
};
