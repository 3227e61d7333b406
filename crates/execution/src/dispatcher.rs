// In crates/execution/src/dispatcher.rs

use crate::{Executor, Result};
use chrono::Utc;
use core_types::{Execution, Mode, Notifier, OrderRecord, OrderRequest, OrderStore};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Routes committed orders to the paper or live venue and fans the outcome out to
/// the order store and the notifier.
#[derive(Clone)]
pub struct OrderDispatcher {
    paper: Arc<dyn Executor>,
    live: Arc<dyn Executor>,
    store: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
}

impl OrderDispatcher {
    pub fn new(
        paper: Arc<dyn Executor>,
        live: Arc<dyn Executor>,
        store: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            paper,
            live,
            store,
            notifier,
        }
    }

    /// Executes `request` on the venue for `mode`, then records and announces the result.
    ///
    /// Failures are logged and notified here; the returned `Result` is informational
    /// only and nothing upstream rolls back on it.
    pub async fn execute(&self, request: OrderRequest, mode: Mode) -> Result<Execution> {
        let executor = match mode {
            Mode::Paper => &self.paper,
            Mode::Live => &self.live,
        };

        match executor.execute(&request).await {
            Ok(execution) => {
                self.store
                    .append(OrderRecord::from_execution(&execution, Utc::now()))
                    .await;
                self.notifier.notify(&fill_message(&execution)).await;
                Ok(execution)
            }
            Err(e) => {
                tracing::error!(
                    executor = executor.name(),
                    symbol = %request.symbol,
                    side = %request.side,
                    error = %e,
                    "Error placing order. Position state is kept as decided."
                );
                self.notifier
                    .notify(&format!(
                        "❌ Error placing {} order for {}: {}",
                        request.side, request.symbol, e
                    ))
                    .await;
                Err(e)
            }
        }
    }

    /// Starts a worker task that executes submitted orders one at a time, in
    /// submission order. Must be called from within a Tokio runtime.
    ///
    /// The worker stops once the returned queue is dropped and drained.
    pub fn queue(&self) -> OrderQueue {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Queued>();
        let dispatcher = self.clone();
        tokio::spawn(async move {
            while let Some(Queued { request, mode, done }) = receiver.recv().await {
                let _ = dispatcher.execute(request, mode).await;
                let _ = done.send(());
            }
        });
        OrderQueue { sender }
    }
}

struct Queued {
    request: OrderRequest,
    mode: Mode,
    done: oneshot::Sender<()>,
}

/// Resolves once a queued order has been executed, recorded and announced.
pub type Dispatched = oneshot::Receiver<()>;

/// The sending side of one dispatch worker. Orders submitted here never overtake
/// each other.
#[derive(Clone)]
pub struct OrderQueue {
    sender: mpsc::UnboundedSender<Queued>,
}

impl OrderQueue {
    /// Enqueues `request` without waiting for it to run.
    ///
    /// Dropping the returned handle does not cancel the order.
    pub fn submit(&self, request: OrderRequest, mode: Mode) -> Dispatched {
        let (done, dispatched) = oneshot::channel();
        if let Err(mpsc::error::SendError(queued)) = self.sender.send(Queued { request, mode, done }) {
            tracing::error!(
                symbol = %queued.request.symbol,
                side = %queued.request.side,
                "Dispatch worker has stopped. Order dropped."
            );
        }
        dispatched
    }
}

fn fill_message(execution: &Execution) -> String {
    match execution.mode {
        Mode::Paper => format!(
            "(PAPER) {} Order: {} x{}",
            execution.side, execution.symbol, execution.quantity
        ),
        Mode::Live => format!(
            "✅ {} Order: {} x{}",
            execution.side, execution.symbol, execution.quantity
        ),
    }
}
