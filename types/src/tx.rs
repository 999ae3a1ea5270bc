//! Raw transactions as the wallet manipulates them.
//!
//! `RawTx` is a flat, byte-oriented view of a legacy transaction. Encoding,
//! decoding and id computation go through `bitcoin::Transaction`.

use bitcoin::consensus::encode;
use bitcoin::transaction::Version;
use bitcoin::{absolute, Amount, ScriptBuf, Sequence, Transaction, Witness};

use crate::{OutPoint, TxId, TypesError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIn {
    pub prev: OutPoint,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    /// Unsigned spend of `prev` with the final sequence number.
    pub fn new(prev: OutPoint) -> Self {
        Self {
            prev,
            script_sig: Vec::new(),
            sequence: Sequence::MAX.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOut {
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    pub fn new(value: u64, script_pubkey: Vec<u8>) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTx {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Default for RawTx {
    fn default() -> Self {
        Self {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }
}

impl From<&RawTx> for Transaction {
    fn from(tx: &RawTx) -> Self {
        Transaction {
            version: Version(tx.version as i32),
            lock_time: absolute::LockTime::from_consensus(tx.lock_time),
            input: tx
                .inputs
                .iter()
                .map(|input| bitcoin::TxIn {
                    previous_output: input.prev,
                    script_sig: ScriptBuf::from_bytes(input.script_sig.clone()),
                    sequence: Sequence(input.sequence),
                    witness: Witness::new(),
                })
                .collect(),
            output: tx
                .outputs
                .iter()
                .map(|output| bitcoin::TxOut {
                    value: Amount::from_sat(output.value),
                    script_pubkey: ScriptBuf::from_bytes(output.script_pubkey.clone()),
                })
                .collect(),
        }
    }
}

impl TryFrom<Transaction> for RawTx {
    type Error = TypesError;

    /// Fails for segwit transactions: witness data has no place in the view.
    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        if tx.input.iter().any(|input| !input.witness.is_empty()) {
            return Err(TypesError::InvalidTransaction(
                "witness data is not supported".into(),
            ));
        }
        Ok(Self {
            version: tx.version.0 as u32,
            lock_time: tx.lock_time.to_consensus_u32(),
            inputs: tx
                .input
                .into_iter()
                .map(|input| TxIn {
                    prev: input.previous_output,
                    script_sig: input.script_sig.into_bytes(),
                    sequence: input.sequence.0,
                })
                .collect(),
            outputs: tx
                .output
                .into_iter()
                .map(|output| TxOut {
                    value: output.value.to_sat(),
                    script_pubkey: output.script_pubkey.into_bytes(),
                })
                .collect(),
        })
    }
}

impl RawTx {
    pub fn to_bytes(&self) -> Vec<u8> {
        encode::serialize(&Transaction::from(self))
    }

    /// Decode a transaction; truncated input and trailing bytes are errors.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        let tx: Transaction = encode::deserialize(bytes)
            .map_err(|e| TypesError::InvalidTransaction(e.to_string()))?;
        Self::try_from(tx)
    }

    pub fn to_hex(&self) -> String {
        encode::serialize_hex(&Transaction::from(self))
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let tx: Transaction = encode::deserialize_hex(s)
            .map_err(|e| TypesError::InvalidTransaction(e.to_string()))?;
        Self::try_from(tx)
    }

    pub fn txid(&self) -> TxId {
        Transaction::from(self).compute_txid()
    }

    /// Index of the input spending `outpoint`, if any.
    pub fn input_index(&self, outpoint: &OutPoint) -> Option<usize> {
        self.inputs.iter().position(|input| input.prev == *outpoint)
    }
}
