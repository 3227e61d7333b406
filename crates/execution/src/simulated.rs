// In crates/execution/src/simulated.rs

use crate::{Executor, Result};
use async_trait::async_trait;
use core_types::{Execution, Mode, OrderRequest};

/// Paper trading: every order fills immediately at the price it was decided at.
#[derive(Debug, Clone, Default)]
pub struct SimulatedExecutor;

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for SimulatedExecutor {
    fn name(&self) -> &'static str {
        "SimulatedExecutor"
    }

    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution> {
        tracing::info!(
            symbol = %order_request.symbol,
            side = %order_request.side,
            quantity = order_request.quantity,
            price = %order_request.price,
            "[PAPER] Order filled."
        );

        Ok(Execution {
            symbol: order_request.symbol.clone(),
            side: order_request.side,
            quantity: order_request.quantity,
            price: order_request.price,
            order_id: None,
            mode: Mode::Paper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Side, Symbol};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn fills_at_the_requested_price() {
        let request = OrderRequest {
            symbol: Symbol::from("NIFTY50"),
            side: Side::Buy,
            quantity: 3,
            price: dec!(114),
        };

        let execution = SimulatedExecutor::new().execute(&request).await.unwrap();

        assert_eq!(execution.price, dec!(114));
        assert_eq!(execution.quantity, 3);
        assert_eq!(execution.mode, Mode::Paper);
        assert!(execution.order_id.is_none());
    }
}
