// In crates/strategies/src/types.rs

use core_types::InstrumentConfig;
use serde::{Deserialize, Serialize};

/// The decision a strategy reaches for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Open a long position at the current price.
    Buy,
    /// Do nothing.
    Hold,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    pub short_period: usize,
    pub long_period: usize,
}

impl From<&InstrumentConfig> for MACrossoverSettings {
    fn from(config: &InstrumentConfig) -> Self {
        Self {
            short_period: config.short_period,
            long_period: config.long_period,
        }
    }
}
