//! Nullable signer and broadcaster — record instead of signing or sending.

use ccwallet_core::{Broadcaster, Signer, WalletError};
use ccwallet_types::{RawTx, Seed, TxId};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::sync::Mutex;

/// Script written into every input the null signer "signs".
pub const SIGNATURE_MARKER: &[u8] = b"null-signature";

/// A signer that writes [`SIGNATURE_MARKER`] into the requested inputs.
pub struct NullSigner {
    /// `(txid before signing, inputs requested)` per call.
    calls: Mutex<Vec<(TxId, Option<Vec<usize>>)>>,
}

impl NullSigner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(TxId, Option<Vec<usize>>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for NullSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl Signer for NullSigner {
    fn sign<'a>(
        &'a self,
        mut tx: RawTx,
        _seed: &'a Seed,
        only_inputs: Option<&'a [usize]>,
    ) -> BoxFuture<'a, Result<RawTx, WalletError>> {
        self.calls
            .lock()
            .unwrap()
            .push((tx.txid(), only_inputs.map(<[usize]>::to_vec)));

        for (index, input) in tx.inputs.iter_mut().enumerate() {
            if only_inputs.map_or(true, |only| only.contains(&index)) {
                input.script_sig = SIGNATURE_MARKER.to_vec();
            }
        }
        future::ready(Ok(tx)).boxed()
    }
}

/// A broadcaster that keeps what it was given.
pub struct NullBroadcaster {
    sent: Mutex<Vec<RawTx>>,
    failure: Mutex<Option<String>>,
}

impl NullBroadcaster {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Make every later broadcast fail with `WalletError::Broadcast`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn sent(&self) -> Vec<RawTx> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for NullBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for NullBroadcaster {
    fn send_tx<'a>(&'a self, tx: &'a RawTx) -> BoxFuture<'a, Result<TxId, WalletError>> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return future::ready(Err(WalletError::Broadcast(message))).boxed();
        }
        self.sent.lock().unwrap().push(tx.clone());
        future::ready(Ok(tx.txid())).boxed()
    }
}
