// In crates/core-types/src/sinks.rs

use crate::OrderRecord;
use async_trait::async_trait;

/// Durable storage for the order history.
///
/// Implementations swallow their own failures (logging them); a broken store must
/// never interrupt order dispatch.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn append(&self, record: OrderRecord);
}

/// Best-effort outbound messages (chat, email, ...).
///
/// An unconfigured notifier degrades to a logged warning.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}
