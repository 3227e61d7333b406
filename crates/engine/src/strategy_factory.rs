// In crates/engine/src/strategy_factory.rs

use core_types::InstrumentConfig;
use strategies::{MACrossover, MACrossoverSettings, Strategy};

/// Creates the strategy instance for one instrument from its `live.toml` entry.
pub fn create_strategy(config: &InstrumentConfig) -> Box<dyn Strategy + Send + Sync> {
    let strategy = MACrossover::new(MACrossoverSettings::from(config));
    tracing::debug!(
        symbol = %config.symbol,
        strategy = strategy.name(),
        short_period = config.short_period,
        long_period = config.long_period,
        "Strategy created."
    );
    Box::new(strategy)
}
