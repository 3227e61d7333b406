// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid instrument configuration: {0}")]
    InvalidConfig(#[from] core_types::Error),
    #[error("The market feed ended unexpectedly")]
    FeedEnded,
}

pub type Result<T> = std::result::Result<T, Error>;
