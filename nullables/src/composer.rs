//! Nullable transaction composer.

use ccwallet_core::{OperationalTx, TxComposer, WalletError};
use ccwallet_types::{address, ColorValue, RawTx, TxIn, TxOut};
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Composes a mono-color transaction: one output per target, coins chosen
/// by [`OperationalTx::select_coins`], and a change output when the
/// selection overshoots. No fee handling.
pub struct NullComposer {
    composed: AtomicUsize,
}

impl NullComposer {
    pub fn new() -> Self {
        Self {
            composed: AtomicUsize::new(0),
        }
    }

    pub fn compose_count(&self) -> usize {
        self.composed.load(Ordering::SeqCst)
    }

    async fn build(&self, op_tx: &OperationalTx) -> Result<RawTx, WalletError> {
        if !op_tx.is_mono_color()? {
            return Err(WalletError::MultiColorUnsupported);
        }
        let targets = op_tx.targets();
        let colordef = targets[0].color_definition().clone();
        let mut needed = ColorValue::zero(colordef.clone());
        for target in targets {
            needed = needed
                .checked_add(target.color_value())
                .ok_or(WalletError::ValueOverflow)?;
        }

        let selection = op_tx.select_coins(&needed, None).await?;
        let mut tx = RawTx {
            inputs: selection.coins.iter().map(|c| TxIn::new(c.outpoint())).collect(),
            ..RawTx::default()
        };
        for target in targets {
            tx.outputs
                .push(TxOut::new(target.value().unsigned_abs(), target.script().to_vec()));
        }
        if let Some(change) = selection.change(&needed) {
            let script = address::output_script(&op_tx.change_address(&colordef)?)?;
            tx.outputs.push(TxOut::new(change.value().unsigned_abs(), script));
        }

        self.composed.fetch_add(1, Ordering::SeqCst);
        Ok(tx)
    }
}

impl Default for NullComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl TxComposer for NullComposer {
    fn compose<'a>(
        &'a self,
        op_tx: &'a OperationalTx,
    ) -> BoxFuture<'a, Result<RawTx, WalletError>> {
        self.build(op_tx).boxed()
    }
}
