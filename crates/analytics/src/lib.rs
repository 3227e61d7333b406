// In crates/analytics/src/lib.rs

pub mod trend;

pub use trend::{move_percent, TrendEntry, TrendRanker, DEFAULT_TREND_LIMIT};
