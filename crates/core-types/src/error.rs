// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid instrument configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid mode '{0}', expected 'paper' or 'live'")]
    InvalidMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
