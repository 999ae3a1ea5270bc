//! Transaction status tracking.
//!
//! Every transaction the wallet learns about is stored once and then
//! re-classified lazily: a status query goes out at most once per recheck
//! interval per transaction, and never again once the transaction is
//! confirmed with a known block time.
//!
//! Reorgs and double spends are not handled: `Invalid` is terminal, and a
//! settled transaction is never looked at again.

use std::sync::{Arc, Mutex, PoisonError};

use ccwallet_store::{TxRecord, TxStore};
use ccwallet_types::{RawTx, Status, Timestamp, TxId};

use crate::backend::{BlockSource, Clock, CoinApplier, StatusClassifier};
use crate::recently_checked::RecentlyChecked;
use crate::{WalletConfig, WalletError};

pub struct TxDb {
    store: Arc<dyn TxStore>,
    classifier: Arc<dyn StatusClassifier>,
    blocks: Arc<dyn BlockSource>,
    coins: Arc<dyn CoinApplier>,
    clock: Arc<dyn Clock>,
    recently_checked: Mutex<RecentlyChecked>,
}

impl TxDb {
    pub fn new(
        store: Arc<dyn TxStore>,
        classifier: Arc<dyn StatusClassifier>,
        blocks: Arc<dyn BlockSource>,
        coins: Arc<dyn CoinApplier>,
        clock: Arc<dyn Clock>,
        config: &WalletConfig,
    ) -> Self {
        Self {
            store,
            classifier,
            blocks,
            coins,
            clock,
            recently_checked: Mutex::new(RecentlyChecked::new(
                config.recheck_cache_capacity,
                config.recheck_interval_secs,
            )),
        }
    }

    /// Record a transaction. A transaction already stored is not inserted
    /// again; its status is rechecked instead.
    ///
    /// Without an explicit `status` the classifier decides. Coins are applied
    /// right after the record is persisted, before any block lookup, so a
    /// failed lookup never leaves a stored transaction with unapplied coins.
    pub async fn add_tx(
        &self,
        tx: &RawTx,
        status: Option<Status>,
        timestamp: Option<Timestamp>,
    ) -> Result<(), WalletError> {
        let tx_id = tx.txid();

        if self.store.get(&tx_id)?.is_some() {
            tracing::debug!(txid = %tx_id, "transaction already known, rechecking");
            self.maybe_recheck_tx_status(&tx_id).await?;
            return Ok(());
        }

        let status = match status {
            Some(status) => status,
            None => self.classifier.classify(&tx_id).await?,
        };
        self.store.put(&tx_id, &tx.to_hex(), status, timestamp)?;
        self.coins.apply_tx(tx).await?;
        self.update_tx_info(&tx_id, status).await?;
        self.mark_checked(tx_id);

        tracing::info!(txid = %tx_id, %status, "transaction added");
        Ok(())
    }

    pub async fn add_unconfirmed_tx(
        &self,
        tx: &RawTx,
        timestamp: Option<Timestamp>,
    ) -> Result<(), WalletError> {
        self.add_tx(tx, Some(Status::Unconfirmed), timestamp).await
    }

    /// Re-query the status of a stored transaction unless it is settled or
    /// was checked within the recheck interval. Returns the resulting status.
    pub async fn maybe_recheck_tx_status(&self, tx_id: &TxId) -> Result<Status, WalletError> {
        let record = self.record(tx_id)?;
        if record.is_settled() {
            return Ok(record.status);
        }
        if !self.try_mark_checked(*tx_id) {
            return Ok(record.status);
        }

        let status = self.classifier.classify(tx_id).await?;
        if status != record.status {
            tracing::info!(txid = %tx_id, from = %record.status, to = %status, "status changed");
            self.store.set_status(tx_id, status)?;
        }
        self.update_tx_info(tx_id, status).await?;
        Ok(status)
    }

    /// Fill in block height and, if still missing, block time for a
    /// confirmed transaction. Does nothing for any other status.
    pub async fn update_tx_info(&self, tx_id: &TxId, status: Status) -> Result<(), WalletError> {
        if status != Status::Confirmed {
            return Ok(());
        }

        let block_hash = self.blocks.block_hash_of(tx_id).await?;
        if self.record(tx_id)?.timestamp.is_none() {
            let time = self.blocks.block_time_of(&block_hash).await?;
            self.store.set_timestamp(tx_id, time)?;
        }
        let height = self.blocks.block_height_of(&block_hash).await?;
        self.store.set_block_height(tx_id, height)?;

        tracing::debug!(txid = %tx_id, block = %block_hash, height, "block info recorded");
        Ok(())
    }

    pub async fn is_tx_confirmed(&self, tx_id: &TxId) -> Result<bool, WalletError> {
        Ok(self.maybe_recheck_tx_status(tx_id).await? == Status::Confirmed)
    }

    pub async fn is_tx_valid(&self, tx_id: &TxId) -> Result<bool, WalletError> {
        Ok(self.maybe_recheck_tx_status(tx_id).await?.is_valid())
    }

    pub fn get_tx_by_id(&self, tx_id: &TxId) -> Result<Option<RawTx>, WalletError> {
        match self.store.get(tx_id)? {
            Some(record) => Ok(Some(record.decode_tx()?)),
            None => Ok(None),
        }
    }

    pub fn get_block_height(&self, tx_id: &TxId) -> Result<Option<u64>, WalletError> {
        Ok(self.store.get(tx_id)?.and_then(|r| r.block_height))
    }

    pub fn get_timestamp(&self, tx_id: &TxId) -> Result<Option<Timestamp>, WalletError> {
        Ok(self.store.get(tx_id)?.and_then(|r| r.timestamp))
    }

    fn record(&self, tx_id: &TxId) -> Result<TxRecord, WalletError> {
        self.store
            .get(tx_id)?
            .ok_or(WalletError::TransactionNotFound(*tx_id))
    }

    fn mark_checked(&self, tx_id: TxId) {
        let now = self.clock.now();
        self.recently_checked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tx_id, now);
    }

    fn try_mark_checked(&self, tx_id: TxId) -> bool {
        let now = self.clock.now();
        self.recently_checked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .check_and_insert(tx_id, now)
    }
}
