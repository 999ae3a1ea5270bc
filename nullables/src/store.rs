//! Nullable store — thread-safe in-memory transaction storage for testing.

use ccwallet_store::{StoreError, TxRecord, TxStore};
use ccwallet_types::{Status, Timestamp, TxId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory transaction store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullTxStore {
    records: Mutex<HashMap<TxId, TxRecord>>,
    order: Mutex<Vec<TxId>>,
    puts: AtomicUsize,
}

impl NullTxStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            order: Mutex::new(Vec::new()),
            puts: AtomicUsize::new(0),
        }
    }

    /// Seed a record directly, bypassing `put`.
    pub fn insert_record(&self, record: TxRecord) {
        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&record.tx_id) {
            self.order.lock().unwrap().push(record.tx_id);
        }
        records.insert(record.tx_id, record);
    }

    /// Number of successful `put` calls.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn update(&self, tx_id: &TxId, f: impl FnOnce(&mut TxRecord)) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(tx_id)
            .ok_or_else(|| StoreError::NotFound(tx_id.to_string()))?;
        f(record);
        Ok(())
    }
}

impl Default for NullTxStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TxStore for NullTxStore {
    fn get(&self, tx_id: &TxId) -> Result<Option<TxRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(tx_id).cloned())
    }

    fn put(
        &self,
        tx_id: &TxId,
        raw_tx: &str,
        status: Status,
        timestamp: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(tx_id) {
            return Err(StoreError::Duplicate(tx_id.to_string()));
        }
        records.insert(
            *tx_id,
            TxRecord::new(*tx_id, raw_tx.to_string(), status, timestamp),
        );
        self.order.lock().unwrap().push(*tx_id);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_status(&self, tx_id: &TxId, status: Status) -> Result<(), StoreError> {
        self.update(tx_id, |r| r.status = status)
    }

    fn set_timestamp(&self, tx_id: &TxId, timestamp: Timestamp) -> Result<(), StoreError> {
        self.update(tx_id, |r| r.timestamp = Some(timestamp))
    }

    fn set_block_height(&self, tx_id: &TxId, height: u64) -> Result<(), StoreError> {
        self.update(tx_id, |r| r.block_height = Some(height))
    }

    fn tx_ids(&self) -> Result<Vec<TxId>, StoreError> {
        Ok(self.order.lock().unwrap().clone())
    }
}
