// In crates/engine/src/status.rs

use analytics::TrendEntry;
use core_types::{Mode, Symbol};
use risk::Position;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A point-in-time copy of the engine state, as served to the control surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub open_positions: BTreeMap<Symbol, PositionView>,
    #[serde(serialize_with = "prices_as_numbers")]
    pub last_prices: BTreeMap<Symbol, Decimal>,
    pub mode: Mode,
    pub trending_stocks: Vec<TrendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    #[serde(with = "rust_decimal::serde::float")]
    pub entry_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub dynamic_stop_loss: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub highest_price: Decimal,
    pub quantity: u32,
}

impl From<&Position> for PositionView {
    fn from(position: &Position) -> Self {
        Self {
            entry_price: position.entry_price,
            dynamic_stop_loss: position.dynamic_stop_loss,
            highest_price: position.highest_price,
            quantity: position.config.quantity,
        }
    }
}

fn prices_as_numbers<S: Serializer>(
    prices: &BTreeMap<Symbol, Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(prices.iter().map(|(symbol, price)| (symbol, price.to_f64())))
}
