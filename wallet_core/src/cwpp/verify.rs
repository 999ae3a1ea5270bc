//! Checks a service-built candidate transaction before we sign any of it.

use std::collections::HashSet;

use ccwallet_types::{Coin, ColorDefinition, ColorTarget, RawTx};

use crate::backend::TxInspector;
use crate::WalletError;

/// Everything the candidate must contain.
pub(crate) struct Expectation<'a> {
    pub coins: &'a [Coin],
    pub targets: &'a [ColorTarget],
    pub colordef: &'a ColorDefinition,
    /// Every address the wallet controls.
    pub wallet_addresses: &'a [String],
}

/// Verify `tx` and return the indexes of the inputs that spend our coins,
/// in coin order.
///
/// Rejected with `CwppWrongTx` when one of our coins is missing, when an
/// input we did not offer spends from one of our addresses, or when a target
/// has no output with the same script and color value. Each output can
/// satisfy one target only; extra outputs are allowed.
pub(crate) async fn verify_candidate(
    tx: &RawTx,
    expected: &Expectation<'_>,
    inspector: &dyn TxInspector,
) -> Result<Vec<usize>, WalletError> {
    let mut ours = Vec::with_capacity(expected.coins.len());
    for coin in expected.coins {
        let index = tx.input_index(&coin.outpoint()).ok_or_else(|| {
            tracing::warn!(coin = %coin.outpoint(), "candidate does not spend one of our coins");
            WalletError::CwppWrongTx("Missing inputs".into())
        })?;
        ours.push(index);
    }

    let own: HashSet<usize> = ours.iter().copied().collect();
    let foreign: Vec<usize> = (0..tx.inputs.len()).filter(|i| !own.contains(i)).collect();
    if !foreign.is_empty() {
        let wallet: HashSet<&str> = expected.wallet_addresses.iter().map(String::as_str).collect();
        let addresses = inspector.input_addresses(tx, &foreign).await?;
        if let Some(address) = addresses.iter().find(|a| wallet.contains(a.as_str())) {
            tracing::warn!(%address, "candidate attributes a wallet address to the counterparty");
            return Err(WalletError::CwppWrongTx("Wrong inputs".into()));
        }
    }

    let values = inspector.output_color_values(tx, expected.colordef).await?;
    if values.len() != tx.outputs.len() {
        return Err(WalletError::CwppWrongTx("Wrong outputs".into()));
    }
    let mut used = vec![false; tx.outputs.len()];
    for target in expected.targets {
        let found = tx.outputs.iter().zip(&values).enumerate().position(|(i, (out, value))| {
            !used[i]
                && out.script_pubkey == target.script()
                && value.as_ref() == Some(target.color_value())
        });
        match found {
            Some(i) => used[i] = true,
            None => {
                tracing::warn!(
                    script = %hex::encode(target.script()),
                    value = target.value(),
                    "candidate is missing an expected output"
                );
                return Err(WalletError::CwppWrongTx("Wrong outputs".into()));
            }
        }
    }

    Ok(ours)
}
