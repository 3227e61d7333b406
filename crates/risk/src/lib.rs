// In crates/risk/src/lib.rs

pub mod ledger;

pub use ledger::{stop_loss_price, ClosedPosition, ExitReason, Position, PositionLedger};
