// In crates/core-types/src/instrument.rs

use crate::{Error, InstrumentToken, Result, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-instrument trading parameters, loaded once at startup from `live.toml`.
///
/// Percent fields are in percent units (`0.5` means half a percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub token: InstrumentToken,
    pub symbol: Symbol,
    pub short_period: usize,
    pub long_period: usize,
    pub quantity: u32,
    pub stop_loss_percent: Decimal,
    pub target_percent: Decimal,
}

impl InstrumentConfig {
    /// Checks the bounds that keep the detector and the ledger meaningful.
    ///
    /// A configuration with `short_period >= long_period` would never produce a
    /// signal, so it is rejected instead of silently idling.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidConfig(format!("{}: {}", self.symbol, reason)));

        if self.symbol.0.trim().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "instrument {} has an empty symbol",
                self.token
            )));
        }
        if self.short_period < 1 {
            return invalid("short_period must be at least 1".to_string());
        }
        if self.long_period <= self.short_period {
            return invalid(format!(
                "long_period ({}) must be greater than short_period ({})",
                self.long_period, self.short_period
            ));
        }
        if self.quantity == 0 {
            return invalid("quantity must be a positive integer".to_string());
        }
        if self.stop_loss_percent <= Decimal::ZERO || self.stop_loss_percent >= Decimal::ONE_HUNDRED {
            return invalid(format!(
                "stop_loss_percent ({}) must be between 0 and 100",
                self.stop_loss_percent
            ));
        }
        if self.target_percent <= Decimal::ZERO {
            return invalid(format!(
                "target_percent ({}) must be positive",
                self.target_percent
            ));
        }
        Ok(())
    }
}

/// Validates every instrument and rejects duplicate symbols or tokens.
pub fn validate_instruments(instruments: &[InstrumentConfig]) -> Result<()> {
    if instruments.is_empty() {
        return Err(Error::InvalidConfig("no instruments configured".to_string()));
    }

    let mut symbols = HashSet::new();
    let mut tokens = HashSet::new();
    for instrument in instruments {
        instrument.validate()?;
        if !symbols.insert(&instrument.symbol) {
            return Err(Error::InvalidConfig(format!(
                "duplicate symbol {}",
                instrument.symbol
            )));
        }
        if !tokens.insert(instrument.token) {
            return Err(Error::InvalidConfig(format!(
                "duplicate token {}",
                instrument.token
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn nifty() -> InstrumentConfig {
        InstrumentConfig {
            token: InstrumentToken(738561),
            symbol: Symbol::from("NIFTY50"),
            short_period: 5,
            long_period: 15,
            quantity: 1,
            stop_loss_percent: dec!(0.5),
            target_percent: dec!(1),
        }
    }

    #[test]
    fn accepts_a_sane_instrument() {
        assert!(nifty().validate().is_ok());
    }

    #[test]
    fn rejects_periods_that_can_never_cross() {
        let mut config = nifty();
        config.long_period = 5;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.short_period = 0;
        config.long_period = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_quantity_and_percents() {
        let mut config = nifty();
        config.quantity = 0;
        assert!(config.validate().is_err());

        let mut config = nifty();
        config.stop_loss_percent = dec!(0);
        assert!(config.validate().is_err());

        let mut config = nifty();
        config.stop_loss_percent = dec!(100);
        assert!(config.validate().is_err());

        let mut config = nifty();
        config.target_percent = dec!(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicates_and_empty_lists() {
        assert!(validate_instruments(&[]).is_err());

        let mut second = nifty();
        second.token = InstrumentToken(1);
        assert!(validate_instruments(&[nifty(), second]).is_err());

        let mut second = nifty();
        second.symbol = Symbol::from("BANKNIFTY");
        assert!(validate_instruments(&[nifty(), second]).is_err());
    }

    #[test]
    fn deserializes_from_toml_numbers() {
        let config: InstrumentConfig = toml::from_str(
            r#"
            token = 260105
            symbol = "BANKNIFTY"
            short_period = 10
            long_period = 30
            quantity = 1
            stop_loss_percent = 0.7
            target_percent = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.token, InstrumentToken(260105));
        assert_eq!(config.stop_loss_percent, dec!(0.7));
        assert_eq!(config.target_percent, dec!(1.5));
        assert!(config.validate().is_ok());
    }
}
