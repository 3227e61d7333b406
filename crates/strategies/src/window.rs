// In crates/strategies/src/window.rs

use rust_decimal::Decimal;
use std::collections::VecDeque;

/// A bounded, ordered history of prices for one instrument (most recent last).
///
/// Once `capacity` prices are held, every new price evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    prices: VecDeque<Decimal>,
    capacity: usize,
}

impl PriceWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            prices: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a price to the tail, evicting the head when over capacity.
    ///
    /// Prices are not validated here; malformed ticks are the feed's concern.
    pub fn push(&mut self, price: Decimal) {
        self.prices.push_back(price);
        if self.prices.len() > self.capacity {
            self.prices.pop_front();
        }
    }

    /// The arithmetic mean of the last `period` prices.
    ///
    /// Returns `None` while fewer than `period` prices are held (warm-up), and for a
    /// zero period.
    pub fn moving_average(&self, period: usize) -> Option<Decimal> {
        if period == 0 || self.prices.len() < period {
            return None;
        }
        let sum: Decimal = self.prices.iter().skip(self.prices.len() - period).sum();
        Some(sum / Decimal::from(period))
    }

    /// The oldest retained price, used as the baseline of the trend ranking.
    pub fn oldest(&self) -> Option<Decimal> {
        self.prices.front().copied()
    }

    #[cfg(test)]
    fn latest(&self) -> Option<Decimal> {
        self.prices.back().copied()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.prices.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.prices.iter()
    }
}
