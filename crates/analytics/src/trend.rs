// In crates/analytics/src/trend.rs

use core_types::Symbol;
use rust_decimal::Decimal;
use serde::Serialize;

/// How many movers the ranking keeps.
pub const DEFAULT_TREND_LIMIT: usize = 5;

/// One row of the "trending instruments" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub symbol: Symbol,
    #[serde(with = "rust_decimal::serde::float")]
    pub move_percent: Decimal,
}

/// Percent move of `last_price` over `baseline`.
///
/// A missing or zero baseline counts as no move.
pub fn move_percent(last_price: Decimal, baseline: Option<Decimal>) -> Decimal {
    let baseline = baseline.unwrap_or(last_price);
    (last_price - baseline)
        .checked_div(baseline)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Ranks instruments by the absolute size of their move across the current price window.
///
/// The ranking is rebuilt from scratch on every call; it is a snapshot, not a
/// leaderboard, so its baselines slide forward as old prices leave the windows.
#[derive(Debug, Clone)]
pub struct TrendRanker {
    limit: usize,
}

impl Default for TrendRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_LIMIT)
    }
}

impl TrendRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Ranks `(symbol, last price, oldest windowed price)` observations.
    ///
    /// Sorted by descending absolute move. Equal moves keep the order in which the
    /// observations were given.
    pub fn rank<'a, I>(&self, observations: I) -> Vec<TrendEntry>
    where
        I: IntoIterator<Item = (&'a Symbol, Decimal, Option<Decimal>)>,
    {
        let mut entries: Vec<TrendEntry> = observations
            .into_iter()
            .map(|(symbol, last_price, baseline)| TrendEntry {
                symbol: symbol.clone(),
                move_percent: move_percent(last_price, baseline),
            })
            .collect();

        // `sort_by` is stable, which gives the tie-breaking above.
        entries.sort_by(|a, b| b.move_percent.abs().cmp(&a.move_percent.abs()));
        entries.truncate(self.limit);
        entries
    }
}
