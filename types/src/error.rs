//! Error type for value-level operations.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid value format: {0:?}")]
    InvalidFormat(String),

    #[error("unit must be a power of 10 and greater than 0, got {0}")]
    InvalidUnit(u64),

    #[error("only single-color assets are supported, got {0} color definitions")]
    MultiColorAsset(usize),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
}
