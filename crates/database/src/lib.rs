// In crates/database/src/lib.rs

use async_trait::async_trait;
use core_types::{OrderRecord, OrderStore};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub mod error;

// Re-export the most important types for easy access.
pub use error::{Error, Result};

/// An append-only order history kept as one pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct JsonOrderStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles so concurrent appends never drop records.
    write_lock: Mutex<()>,
}

impl JsonOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads every record in file order. A missing file is an empty history.
    pub async fn load_all(&self) -> Result<Vec<OrderRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Appends `record`, rewriting the whole file.
    ///
    /// A corrupt file is logged and replaced by a fresh history.
    pub async fn try_append(&self, record: OrderRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = match self.load_all().await {
            Ok(records) => records,
            Err(Error::Serialization(e)) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error reading order log. Resetting it.");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        records.push(record);

        let json = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonOrderStore {
    async fn append(&self, record: OrderRecord) {
        let symbol = record.symbol.clone();
        if let Err(e) = self.try_append(record).await {
            tracing::error!(path = %self.path.display(), %symbol, error = %e, "Error writing order log.");
        }
    }
}
