//! Fundamental types for the colored-coin wallet core.
//!
//! This crate defines the value types shared by every other crate in the
//! workspace: colors and color values, coins, payment targets, asset
//! definitions (with the decimal value codec), transaction ids, timestamps,
//! transaction status, and the raw transaction codec.

pub mod address;
pub mod asset;
pub mod coin;
pub mod color;
pub mod error;
pub mod keys;
pub mod state;
pub mod time;
pub mod tx;

pub use asset::{AssetDefinition, AssetDefinitionData};
pub use coin::{Coin, CoinList, RawCoin};
pub use color::{ColorDefinition, ColorId, ColorTarget, ColorValue};
pub use error::TypesError;
/// Transaction ids, block hashes and outpoints are the `bitcoin` crate's.
pub use bitcoin::{BlockHash, OutPoint, Txid as TxId};
pub use keys::Seed;
pub use state::Status;
pub use time::Timestamp;
pub use tx::{RawTx, TxIn, TxOut};
