//! Abstract storage traits for the wallet core.
//!
//! The persistence format belongs to the embedding wallet. The core only
//! reads and writes through these traits.

pub mod error;
pub mod transaction;

pub use error::StoreError;
pub use transaction::{TxRecord, TxStore};
