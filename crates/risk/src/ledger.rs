// In crates/risk/src/ledger.rs

use core_types::{InstrumentConfig, OrderRequest, Side, Symbol};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// `price × (1 − stop_loss_percent / 100)`.
pub fn stop_loss_price(price: Decimal, stop_loss_percent: Decimal) -> Decimal {
    price * (Decimal::ONE - stop_loss_percent / Decimal::ONE_HUNDRED)
}

/// Why an open position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    TargetHit,
    StopHit,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::TargetHit => f.write_str("target hit"),
            ExitReason::StopHit => f.write_str("stop hit"),
        }
    }
}

/// A single open long position.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub config: Arc<InstrumentConfig>,
    pub entry_price: Decimal,
    /// Never decreases while the position is open.
    pub highest_price: Decimal,
    /// Always `stop_loss_price(highest_price)` at the time it was last raised; never lowered.
    pub dynamic_stop_loss: Decimal,
}

impl Position {
    pub fn open(config: Arc<InstrumentConfig>, price: Decimal) -> Self {
        let dynamic_stop_loss = stop_loss_price(price, config.stop_loss_percent);
        Self {
            config,
            entry_price: price,
            highest_price: price,
            dynamic_stop_loss,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.config.symbol
    }

    /// Raises the high-water mark and the trailing stop on a new high.
    ///
    /// Returns `true` when the stop moved.
    pub fn ratchet(&mut self, price: Decimal) -> bool {
        if price <= self.highest_price {
            return false;
        }
        self.highest_price = price;

        let candidate = stop_loss_price(price, self.config.stop_loss_percent);
        if candidate > self.dynamic_stop_loss {
            self.dynamic_stop_loss = candidate;
            true
        } else {
            false
        }
    }

    /// Percent gain of `price` over the entry price; `None` for a zero entry price.
    pub fn profit_percent(&self, price: Decimal) -> Option<Decimal> {
        (price - self.entry_price)
            .checked_div(self.entry_price)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
    }

    /// The exit rule for `price`; the target is checked before the stop.
    pub fn exit_reason(&self, price: Decimal) -> Option<ExitReason> {
        if self
            .profit_percent(price)
            .is_some_and(|profit| profit >= self.config.target_percent)
        {
            Some(ExitReason::TargetHit)
        } else if price <= self.dynamic_stop_loss {
            Some(ExitReason::StopHit)
        } else {
            None
        }
    }
}

/// A position that has just been removed from the ledger, with the order that closes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPosition {
    pub position: Position,
    pub reason: ExitReason,
    pub order: OrderRequest,
}

/// The set of open positions, at most one per symbol.
///
/// A symbol absent from the ledger is flat.
#[derive(Debug, Default, Clone)]
pub struct PositionLedger {
    positions: HashMap<Symbol, Position>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, symbol: &Symbol) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Position)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// FLAT → OPEN at `price`.
    ///
    /// Returns the BUY order to dispatch, or `None` when the symbol is already open.
    pub fn try_open(&mut self, config: &Arc<InstrumentConfig>, price: Decimal) -> Option<OrderRequest> {
        if self.is_open(&config.symbol) {
            tracing::debug!(symbol = %config.symbol, "Position already open; ignoring entry.");
            return None;
        }

        let position = Position::open(Arc::clone(config), price);
        tracing::info!(
            symbol = %config.symbol,
            entry_price = %position.entry_price,
            stop_loss = %position.dynamic_stop_loss,
            "Opening position."
        );
        self.positions.insert(config.symbol.clone(), position);

        Some(OrderRequest {
            symbol: config.symbol.clone(),
            side: Side::Buy,
            quantity: config.quantity,
            price,
        })
    }

    /// Applies a new price to the symbol's open position, if any.
    ///
    /// Ratchets the trailing stop, then checks the exits. On an exit the position is
    /// removed (OPEN → FLAT) and returned along with its SELL order.
    pub fn on_price(&mut self, symbol: &Symbol, price: Decimal) -> Option<ClosedPosition> {
        let position = self.positions.get_mut(symbol)?;

        if position.ratchet(price) {
            tracing::debug!(
                symbol = %symbol,
                highest_price = %position.highest_price,
                stop_loss = %position.dynamic_stop_loss,
                "Trailing stop raised."
            );
        }

        let reason = position.exit_reason(price)?;
        let position = self.positions.remove(symbol)?;
        tracing::info!(
            symbol = %symbol,
            %reason,
            price = %price,
            entry_price = %position.entry_price,
            stop_loss = %position.dynamic_stop_loss,
            "Closing position."
        );

        let order = OrderRequest {
            symbol: symbol.clone(),
            side: Side::Sell,
            quantity: position.config.quantity,
            price,
        };
        Some(ClosedPosition {
            position,
            reason,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::InstrumentToken;
    use rust_decimal_macros::dec;

    fn config(stop_loss_percent: Decimal, target_percent: Decimal) -> Arc<InstrumentConfig> {
        Arc::new(InstrumentConfig {
            token: InstrumentToken(738561),
            symbol: Symbol::from("NIFTY50"),
            short_period: 5,
            long_period: 15,
            quantity: 2,
            stop_loss_percent,
            target_percent,
        })
    }

    #[test]
    fn opening_sets_entry_high_and_stop() {
        let config = config(dec!(0.5), dec!(5));
        let mut ledger = PositionLedger::new();

        let order = ledger.try_open(&config, dec!(114)).unwrap();
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.quantity, 2);
        assert_eq!(order.price, dec!(114));

        let position = ledger.get(&config.symbol).unwrap();
        assert_eq!(position.entry_price, dec!(114));
        assert_eq!(position.highest_price, dec!(114));
        assert_eq!(position.dynamic_stop_loss, dec!(113.43));
    }

    #[test]
    fn second_open_is_a_no_op() {
        let config = config(dec!(0.5), dec!(5));
        let mut ledger = PositionLedger::new();

        assert!(ledger.try_open(&config, dec!(100)).is_some());
        assert!(ledger.try_open(&config, dec!(120)).is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&config.symbol).unwrap().entry_price, dec!(100));
    }

    #[test]
    fn stop_ratchets_up_and_never_relaxes() {
        let config = config(dec!(0.5), dec!(5));
        let mut ledger = PositionLedger::new();
        ledger.try_open(&config, dec!(114));

        assert!(ledger.on_price(&config.symbol, dec!(116)).is_none());
        let position = ledger.get(&config.symbol).unwrap();
        assert_eq!(position.highest_price, dec!(116));
        assert_eq!(position.dynamic_stop_loss, dec!(115.42));

        assert!(ledger.on_price(&config.symbol, dec!(115.5)).is_none());
        let position = ledger.get(&config.symbol).unwrap();
        assert_eq!(position.highest_price, dec!(116));
        assert_eq!(position.dynamic_stop_loss, dec!(115.42));
    }

    #[test]
    fn stop_hit_closes_the_position() {
        let config = config(dec!(0.5), dec!(5));
        let mut ledger = PositionLedger::new();
        ledger.try_open(&config, dec!(114));
        ledger.on_price(&config.symbol, dec!(116));

        let closed = ledger.on_price(&config.symbol, dec!(115.4)).unwrap();
        assert_eq!(closed.reason, ExitReason::StopHit);
        assert_eq!(closed.order.side, Side::Sell);
        assert_eq!(closed.order.quantity, 2);
        assert_eq!(closed.order.price, dec!(115.4));
        assert!(!ledger.is_open(&config.symbol));
    }

    #[test]
    fn stop_is_inclusive() {
        let config = config(dec!(1), dec!(5));
        let mut ledger = PositionLedger::new();
        ledger.try_open(&config, dec!(100));

        let closed = ledger.on_price(&config.symbol, dec!(99)).unwrap();
        assert_eq!(closed.reason, ExitReason::StopHit);
    }

    #[test]
    fn target_is_checked_before_the_stop() {
        let config = config(dec!(0.5), dec!(1));
        let mut position = Position::open(Arc::clone(&config), dec!(100));
        // Force a stop above the tick price so both rules hold at once.
        position.dynamic_stop_loss = dec!(102);

        assert_eq!(position.exit_reason(dec!(101)), Some(ExitReason::TargetHit));
    }

    #[test]
    fn target_hit_closes_the_position() {
        let config = config(dec!(0.5), dec!(1));
        let mut ledger = PositionLedger::new();
        ledger.try_open(&config, dec!(100));

        let closed = ledger.on_price(&config.symbol, dec!(101)).unwrap();
        assert_eq!(closed.reason, ExitReason::TargetHit);
        assert_eq!(closed.reason.to_string(), "target hit");
        assert!(ledger.is_empty());
    }

    #[test]
    fn flat_symbol_ignores_prices() {
        let config = config(dec!(0.5), dec!(1));
        let mut ledger = PositionLedger::new();
        assert!(ledger.on_price(&config.symbol, dec!(1)).is_none());
    }

    #[test]
    fn zero_entry_price_never_hits_the_target() {
        let config = config(dec!(0.5), dec!(1));
        let position = Position::open(config, Decimal::ZERO);

        assert_eq!(position.profit_percent(dec!(10)), None);
        assert_eq!(position.exit_reason(dec!(10)), None);
    }
}
