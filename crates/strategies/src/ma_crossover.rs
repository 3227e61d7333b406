// In crates/strategies/src/ma_crossover.rs

use crate::types::MACrossoverSettings;
use crate::{PriceWindow, Signal, Strategy};
use rust_decimal::Decimal;

/// The short/long moving averages computed for one assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub short: Decimal,
    pub long: Decimal,
}

/// Simple moving-average crossover entry strategy.
///
/// Emits `Buy` whenever the short-period average is strictly above the long-period
/// average and the instrument is flat. There is no memory of the previous tick: the
/// open-position gate is what turns a sustained crossover into a single entry.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }

    /// Both averages, or `None` until the window holds `long_period` prices.
    pub fn averages(&self, window: &PriceWindow) -> Option<Averages> {
        let short = window.moving_average(self.settings.short_period)?;
        let long = window.moving_average(self.settings.long_period)?;
        Some(Averages { short, long })
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn required_history(&self) -> usize {
        self.settings.long_period
    }

    fn assess(&self, window: &PriceWindow, has_open_position: bool) -> Signal {
        if has_open_position {
            return Signal::Hold;
        }

        match self.averages(window) {
            // A tie never fires, so a flat market does not trigger entries.
            Some(Averages { short, long }) if short > long => Signal::Buy,
            _ => Signal::Hold,
        }
    }
}
