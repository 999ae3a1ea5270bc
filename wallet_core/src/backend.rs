//! Collaborators the wallet core talks to.
//!
//! Anything that may reach the network returns a boxed future so the traits
//! stay object-safe and can be injected as `Arc<dyn Trait>`. Local lookups
//! are plain synchronous traits.

use ccwallet_types::{
    AssetDefinition, BlockHash, ColorDefinition, ColorValue, CoinList, RawTx, Seed, Status,
    Timestamp, TxId,
};
use futures_util::future::BoxFuture;

use crate::operational_tx::OperationalTx;
use crate::WalletError;

/// Restriction applied to a coin lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinQuery {
    /// Only coins colored under this definition.
    pub color: ColorDefinition,
    /// Only coins owned by these addresses.
    pub addresses: Vec<String>,
    pub include_unconfirmed: bool,
}

/// Source of unspent coins. The returned order is significant: coin
/// selection scans it front to back.
pub trait CoinSource: Send + Sync {
    fn query<'a>(&'a self, query: &'a CoinQuery) -> BoxFuture<'a, Result<CoinList, WalletError>>;
}

/// The wallet's address registry.
pub trait AddressBook: Send + Sync {
    /// Addresses known to hold the given color.
    fn addresses_for(&self, colordef: &ColorDefinition) -> Vec<String>;

    /// Every address the wallet controls, across all colors.
    fn all_addresses(&self) -> Vec<String>;

    /// An address suitable for receiving change of the given color.
    fn change_address(&self, colordef: &ColorDefinition) -> Result<String, WalletError>;
}

/// External classification of a transaction's confirmation state.
pub trait StatusClassifier: Send + Sync {
    fn classify<'a>(&'a self, txid: &'a TxId) -> BoxFuture<'a, Result<Status, WalletError>>;
}

/// Block metadata lookups.
pub trait BlockSource: Send + Sync {
    fn block_hash_of<'a>(
        &'a self,
        txid: &'a TxId,
    ) -> BoxFuture<'a, Result<BlockHash, WalletError>>;

    fn block_time_of<'a>(
        &'a self,
        hash: &'a BlockHash,
    ) -> BoxFuture<'a, Result<Timestamp, WalletError>>;

    fn block_height_of<'a>(
        &'a self,
        hash: &'a BlockHash,
    ) -> BoxFuture<'a, Result<u64, WalletError>>;
}

/// Callback into the UTXO registry: marks the coins a transaction spends
/// and records the ones it creates.
pub trait CoinApplier: Send + Sync {
    fn apply_tx<'a>(&'a self, tx: &'a RawTx) -> BoxFuture<'a, Result<(), WalletError>>;
}

pub trait Signer: Send + Sync {
    /// Sign `tx` with keys derived from `seed`. When `only_inputs` is set,
    /// every other input is left untouched.
    fn sign<'a>(
        &'a self,
        tx: RawTx,
        seed: &'a Seed,
        only_inputs: Option<&'a [usize]>,
    ) -> BoxFuture<'a, Result<RawTx, WalletError>>;
}

pub trait Broadcaster: Send + Sync {
    fn send_tx<'a>(&'a self, tx: &'a RawTx) -> BoxFuture<'a, Result<TxId, WalletError>>;
}

/// Color-aware inspection of transactions that did not originate locally.
pub trait TxInspector: Send + Sync {
    /// The value each output carries under `colordef`, `None` for outputs
    /// of another color.
    fn output_color_values<'a>(
        &'a self,
        tx: &'a RawTx,
        colordef: &'a ColorDefinition,
    ) -> BoxFuture<'a, Result<Vec<Option<ColorValue>>, WalletError>>;

    /// Addresses that the outputs spent by the given inputs paid to.
    fn input_addresses<'a>(
        &'a self,
        tx: &'a RawTx,
        indexes: &'a [usize],
    ) -> BoxFuture<'a, Result<Vec<String>, WalletError>>;
}

pub trait AssetRegistry: Send + Sync {
    fn asset_by_id(&self, asset_id: &str) -> Option<AssetDefinition>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Fee estimate for a transaction being composed, given how many more
/// inputs it might gain.
pub trait FeeEstimator: Send + Sync {
    fn estimate_required_fee(&self, extra_tx_ins: usize) -> ColorValue;
}

/// Turns a set of targets into an unsigned transaction, selecting coins
/// and adding change as needed.
pub trait TxComposer: Send + Sync {
    fn compose<'a>(
        &'a self,
        op_tx: &'a OperationalTx,
    ) -> BoxFuture<'a, Result<RawTx, WalletError>>;
}
