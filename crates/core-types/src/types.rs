// In crates/core-types/src/types.rs

use crate::Error;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The display symbol of a tracked instrument (e.g., "NIFTY50").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// The exchange-assigned numeric identifier carried by every feed packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentToken(pub u32);

impl fmt::Display for InstrumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where orders are routed: a simulated fill or the real broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Paper,
    Live,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Paper => "paper",
            Mode::Live => "live",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// Only the exact lowercase names are accepted, as the control surface receives them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paper" => Ok(Mode::Paper),
            "live" => Ok(Mode::Live),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// One last-traded-price update from the market feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub token: InstrumentToken,
    pub price: Decimal,
}

/// An order the engine has decided to place.
///
/// `price` is the tick price at decision time. Paper fills happen at exactly this
/// price; live orders are sent as market orders and use it only for the record.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: u32,
    pub price: Decimal,
}

/// The result of a successfully dispatched order.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: u32,
    pub price: Decimal,
    /// Broker order id; `None` for paper fills.
    pub order_id: Option<String>,
    pub mode: Mode,
}

/// One entry of the persisted order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "type")]
    pub side: Side,
    pub symbol: Symbol,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub price: Option<Decimal>,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub mode: Mode,
}

impl OrderRecord {
    pub fn from_execution(execution: &Execution, time: DateTime<Utc>) -> Self {
        Self {
            side: execution.side,
            symbol: execution.symbol.clone(),
            quantity: execution.quantity,
            price: Some(execution.price),
            time,
            mode: execution.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mode_parses_only_known_names() {
        assert_eq!("paper".parse::<Mode>(), Ok(Mode::Paper));
        assert_eq!("live".parse::<Mode>(), Ok(Mode::Live));
        assert_eq!(
            "LIVE".parse::<Mode>(),
            Err(Error::InvalidMode("LIVE".to_string()))
        );
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_defaults_to_paper() {
        assert_eq!(Mode::default(), Mode::Paper);
    }

    #[test]
    fn order_record_uses_type_key_and_numeric_price() {
        let record = OrderRecord {
            side: Side::Buy,
            symbol: Symbol::from("NIFTY50"),
            quantity: 1,
            price: Some(dec!(114)),
            time: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            mode: Mode::Paper,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "BUY");
        assert_eq!(json["symbol"], "NIFTY50");
        assert_eq!(json["price"], 114.0);
        assert_eq!(json["mode"], "paper");
    }

    #[test]
    fn order_record_reads_entries_without_mode_or_price() {
        let json = r#"{"type":"SELL","symbol":"BANKNIFTY","quantity":1,"time":"2024-01-02T03:04:05Z"}"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.side, Side::Sell);
        assert_eq!(record.price, None);
        assert_eq!(record.mode, Mode::Paper);
    }
}
