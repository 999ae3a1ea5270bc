//! Nullable blockchain — scripted transaction status and block metadata.

use ccwallet_core::{BlockSource, CoinApplier, StatusClassifier, WalletError};
use ccwallet_store::TxStore;
use ccwallet_types::{BlockHash, RawTx, Status, Timestamp, TxId};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A blockchain view that answers from scripted state.
///
/// Unknown transactions classify as `Unknown`; block lookups for them fail.
pub struct NullChain {
    statuses: Mutex<HashMap<TxId, Status>>,
    tx_blocks: Mutex<HashMap<TxId, BlockHash>>,
    block_times: Mutex<HashMap<BlockHash, Timestamp>>,
    block_heights: Mutex<HashMap<BlockHash, u64>>,
    classify_failure: Mutex<Option<String>>,
    classify_calls: AtomicUsize,
    block_time_calls: AtomicUsize,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(HashMap::new()),
            tx_blocks: Mutex::new(HashMap::new()),
            block_times: Mutex::new(HashMap::new()),
            block_heights: Mutex::new(HashMap::new()),
            classify_failure: Mutex::new(None),
            classify_calls: AtomicUsize::new(0),
            block_time_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_status(&self, tx_id: TxId, status: Status) {
        self.statuses.lock().unwrap().insert(tx_id, status);
    }

    /// Mark a transaction confirmed in the given block.
    pub fn confirm(&self, tx_id: TxId, block: BlockHash, height: u64, time: Timestamp) {
        self.set_status(tx_id, Status::Confirmed);
        self.tx_blocks.lock().unwrap().insert(tx_id, block);
        self.block_times.lock().unwrap().insert(block, time);
        self.block_heights.lock().unwrap().insert(block, height);
    }

    /// Make every later `classify` fail with `WalletError::Blockchain`.
    pub fn fail_classify(&self, message: &str) {
        *self.classify_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Number of `classify` calls so far.
    pub fn classify_count(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    /// Number of `block_time_of` calls so far.
    pub fn block_time_count(&self) -> usize {
        self.block_time_calls.load(Ordering::SeqCst)
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusClassifier for NullChain {
    fn classify<'a>(&'a self, txid: &'a TxId) -> BoxFuture<'a, Result<Status, WalletError>> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.classify_failure.lock().unwrap().clone() {
            return future::ready(Err(WalletError::Blockchain(message))).boxed();
        }
        let status = self
            .statuses
            .lock()
            .unwrap()
            .get(txid)
            .copied()
            .unwrap_or_default();
        future::ready(Ok(status)).boxed()
    }
}

impl BlockSource for NullChain {
    fn block_hash_of<'a>(
        &'a self,
        txid: &'a TxId,
    ) -> BoxFuture<'a, Result<BlockHash, WalletError>> {
        let result = self
            .tx_blocks
            .lock()
            .unwrap()
            .get(txid)
            .copied()
            .ok_or_else(|| WalletError::Blockchain(format!("no block for {txid}")));
        future::ready(result).boxed()
    }

    fn block_time_of<'a>(
        &'a self,
        hash: &'a BlockHash,
    ) -> BoxFuture<'a, Result<Timestamp, WalletError>> {
        self.block_time_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .block_times
            .lock()
            .unwrap()
            .get(hash)
            .copied()
            .ok_or_else(|| WalletError::Blockchain(format!("unknown block {hash}")));
        future::ready(result).boxed()
    }

    fn block_height_of<'a>(
        &'a self,
        hash: &'a BlockHash,
    ) -> BoxFuture<'a, Result<u64, WalletError>> {
        let result = self
            .block_heights
            .lock()
            .unwrap()
            .get(hash)
            .copied()
            .ok_or_else(|| WalletError::Blockchain(format!("unknown block {hash}")));
        future::ready(result).boxed()
    }
}

/// Records every transaction applied to the coin registry.
///
/// When built with [`NullCoinApplier::observing`], also records whether the
/// transaction was already in the store at the moment it was applied.
pub struct NullCoinApplier {
    store: Option<Arc<dyn TxStore>>,
    applied: Mutex<Vec<TxId>>,
    stored_when_applied: Mutex<Vec<bool>>,
}

impl NullCoinApplier {
    pub fn new() -> Self {
        Self {
            store: None,
            applied: Mutex::new(Vec::new()),
            stored_when_applied: Mutex::new(Vec::new()),
        }
    }

    pub fn observing(store: Arc<dyn TxStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    pub fn applied(&self) -> Vec<TxId> {
        self.applied.lock().unwrap().clone()
    }

    pub fn stored_when_applied(&self) -> Vec<bool> {
        self.stored_when_applied.lock().unwrap().clone()
    }
}

impl Default for NullCoinApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinApplier for NullCoinApplier {
    fn apply_tx<'a>(&'a self, tx: &'a RawTx) -> BoxFuture<'a, Result<(), WalletError>> {
        let txid = tx.txid();
        if let Some(store) = &self.store {
            let stored = matches!(store.get(&txid), Ok(Some(_)));
            self.stored_when_applied.lock().unwrap().push(stored);
        }
        self.applied.lock().unwrap().push(txid);
        future::ready(Ok(())).boxed()
    }
}
