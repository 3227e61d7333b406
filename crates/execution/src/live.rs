// In crates/execution/src/live.rs

use crate::{Error, Executor, Result};
use api_client::KiteClient;
use async_trait::async_trait;
use core_types::{Execution, Mode, OrderRequest};

/// An executor that places real market orders through Kite Connect.
#[derive(Debug, Clone)]
pub struct LiveExecutor {
    api_client: KiteClient,
}

impl LiveExecutor {
    pub fn new(api_client: KiteClient) -> Self {
        Self { api_client }
    }
}

#[async_trait]
impl Executor for LiveExecutor {
    fn name(&self) -> &'static str {
        "LiveExecutor"
    }

    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution> {
        tracing::info!(?order_request, "Executing live order request...");

        let order_response = match self
            .api_client
            .place_market_order(
                &order_request.symbol,
                order_request.side,
                order_request.quantity,
            )
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, symbol = %order_request.symbol, "Failed to place market order.");
                return Err(Error::ExecutionFailed {
                    reason: e.to_string(),
                });
            }
        };
        tracing::info!(order_id = %order_response.order_id, symbol = %order_request.symbol, "Market order placed.");

        // Market orders carry no fill price in the placement response; the record
        // keeps the tick price the decision was made at.
        Ok(Execution {
            symbol: order_request.symbol.clone(),
            side: order_request.side,
            quantity: order_request.quantity,
            price: order_request.price,
            order_id: Some(order_response.order_id),
            mode: Mode::Live,
        })
    }
}
