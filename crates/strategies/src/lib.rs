// In crates/strategies/src/lib.rs

pub mod ma_crossover;
pub mod types;
pub mod window;

pub use ma_crossover::MACrossover;
pub use types::{MACrossoverSettings, Signal};
pub use window::PriceWindow;

/// The universal interface for an entry strategy.
///
/// A strategy looks at the recent price history of one instrument and decides whether
/// a position should be opened. It is stateless: everything it needs lives in the
/// `PriceWindow` it is handed, plus whether the instrument already has an open position.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The number of prices the window must retain for this strategy to work.
    fn required_history(&self) -> usize;

    fn assess(&self, window: &PriceWindow, has_open_position: bool) -> Signal;
}
