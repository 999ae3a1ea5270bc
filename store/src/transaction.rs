//! Transaction storage trait.

use crate::StoreError;
use ccwallet_types::{RawTx, Status, Timestamp, TxId};
use serde::{Deserialize, Serialize};

/// A locally known transaction and what is known about its confirmation.
///
/// Records are never deleted during normal operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRecord {
    pub tx_id: TxId,
    /// Hex-encoded raw transaction.
    pub raw_tx: String,
    pub status: Status,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl TxRecord {
    pub fn new(tx_id: TxId, raw_tx: String, status: Status, timestamp: Option<Timestamp>) -> Self {
        Self {
            tx_id,
            raw_tx,
            status,
            block_height: None,
            timestamp,
        }
    }

    /// Confirmed with a known block time: nothing left to learn.
    pub fn is_settled(&self) -> bool {
        self.status == Status::Confirmed && self.timestamp.is_some()
    }

    pub fn decode_tx(&self) -> Result<RawTx, StoreError> {
        RawTx::from_hex(&self.raw_tx).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Trait for the append-only ledger of locally known transactions.
pub trait TxStore: Send + Sync {
    /// Look up a record. `Ok(None)` when the id is unknown.
    fn get(&self, tx_id: &TxId) -> Result<Option<TxRecord>, StoreError>;

    /// Insert a new record. Fails with `Duplicate` if the id is already stored.
    fn put(
        &self,
        tx_id: &TxId,
        raw_tx: &str,
        status: Status,
        timestamp: Option<Timestamp>,
    ) -> Result<(), StoreError>;

    fn set_status(&self, tx_id: &TxId, status: Status) -> Result<(), StoreError>;

    fn set_timestamp(&self, tx_id: &TxId, timestamp: Timestamp) -> Result<(), StoreError>;

    fn set_block_height(&self, tx_id: &TxId, height: u64) -> Result<(), StoreError>;

    /// All stored ids, in insertion order.
    fn tx_ids(&self) -> Result<Vec<TxId>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use ccwallet_types::{OutPoint, TxIn, TxOut};

    fn spend(byte: u8) -> RawTx {
        RawTx {
            inputs: vec![TxIn::new(OutPoint::new(TxId::from_byte_array([byte; 32]), 0))],
            outputs: vec![TxOut::new(600, vec![0x51])],
            ..RawTx::default()
        }
    }

    #[test]
    fn settled_needs_confirmation_and_time() {
        let id = TxId::from_byte_array([3u8; 32]);
        let mut record = TxRecord::new(id, RawTx::default().to_hex(), Status::Confirmed, None);
        assert!(!record.is_settled());
        record.timestamp = Some(Timestamp::new(1_400_000_000));
        assert!(record.is_settled());
        record.status = Status::Unconfirmed;
        assert!(!record.is_settled());
    }

    #[test]
    fn record_json_round_trip() {
        let tx = spend(5);
        let record = TxRecord::new(tx.txid(), tx.to_hex(), Status::Unconfirmed, None);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"unconfirmed\""));
        let back: TxRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.decode_tx().unwrap(), tx);
    }
}
