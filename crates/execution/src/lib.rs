// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::{Execution, OrderRequest};

pub mod dispatcher;
pub mod error;
pub mod live;
pub mod mode;
pub mod simulated;

// Re-export public types
pub use dispatcher::{Dispatched, OrderDispatcher, OrderQueue};
pub use error::{Error, Result};
pub use live::LiveExecutor;
pub use mode::ModeGate;
pub use simulated::SimulatedExecutor;

/// The universal interface for an execution handler.
///
/// An `Executor` takes an `OrderRequest` the engine has already committed to and
/// submits it to a venue, which could be the broker or a paper simulation.
#[async_trait]
pub trait Executor: Send + Sync {
    /// The name of the executor (e.g., "LiveExecutor", "SimulatedExecutor").
    fn name(&self) -> &'static str;

    /// Executes a given order request.
    ///
    /// Returns the `Execution` on success, or an `Error` if the venue rejected
    /// the order or could not be reached.
    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution>;
}
