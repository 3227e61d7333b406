// In crates/engine/src/task.rs

use crate::{Engine, Error, Result};
use api_client::KiteTicker;
use core_types::Tick;
use futures::{Stream, StreamExt};
use std::sync::Arc;

/// Forwards market-feed ticks to the engine, one at a time and in arrival order.
pub struct FeedTask {
    engine: Arc<Engine>,
    ticker: KiteTicker,
}

impl FeedTask {
    pub fn new(engine: Arc<Engine>, ticker: KiteTicker) -> Self {
        Self { engine, ticker }
    }

    /// The main, long-running loop. Only returns when the feed ends.
    pub async fn run(&self) -> Result<()> {
        tracing::info!(instruments = self.engine.tokens().len(), "Starting feed task.");
        let ticks = self.ticker.subscribe_to_ticks(self.engine.tokens().to_vec());
        consume(&self.engine, ticks).await
    }
}

/// Drives `engine` from a stream of tick batches until the stream ends.
///
/// Each tick is fully processed before the next one is looked at; dispatch tasks
/// are left running in the background.
pub async fn consume<S>(engine: &Engine, ticks: S) -> Result<()>
where
    S: Stream<Item = api_client::Result<Vec<Tick>>>,
{
    let mut ticks = Box::pin(ticks);

    while let Some(batch) = ticks.next().await {
        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, "Market feed error.");
                continue;
            }
        };

        for tick in batch {
            match engine.symbol_for(tick.token) {
                Some(symbol) => {
                    engine.on_tick(symbol, tick.price).await;
                }
                None => tracing::debug!(token = %tick.token, "Tick for an unknown token ignored."),
            }
        }
    }

    tracing::error!("Market feed ended.");
    Err(Error::FeedEnded)
}
