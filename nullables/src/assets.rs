//! Nullable asset catalog and transaction inspector.

use ccwallet_core::{AssetRegistry, TxInspector, WalletError};
use ccwallet_types::{AssetDefinition, ColorDefinition, ColorValue, OutPoint, RawTx};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct NullAssetRegistry {
    assets: Mutex<HashMap<String, AssetDefinition>>,
}

impl NullAssetRegistry {
    pub fn new() -> Self {
        Self {
            assets: Mutex::new(HashMap::new()),
        }
    }

    pub fn add(&self, asset: AssetDefinition) {
        self.assets
            .lock()
            .unwrap()
            .insert(asset.id().to_string(), asset);
    }
}

impl Default for NullAssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry for NullAssetRegistry {
    fn asset_by_id(&self, asset_id: &str) -> Option<AssetDefinition> {
        self.assets.lock().unwrap().get(asset_id).cloned()
    }
}

/// Reads every output as carrying its raw value in the requested color,
/// unless an output has been marked as belonging to another color.
/// Input addresses come from a fixed outpoint map.
pub struct NullTxInspector {
    other_color_scripts: Mutex<Vec<Vec<u8>>>,
    input_addresses: Mutex<HashMap<OutPoint, String>>,
}

impl NullTxInspector {
    pub fn new() -> Self {
        Self {
            other_color_scripts: Mutex::new(Vec::new()),
            input_addresses: Mutex::new(HashMap::new()),
        }
    }

    /// Outputs paying to `script` carry no value in any requested color.
    pub fn mark_other_color(&self, script: Vec<u8>) {
        self.other_color_scripts.lock().unwrap().push(script);
    }

    /// The address the output at `outpoint` paid to.
    pub fn set_input_address(&self, outpoint: OutPoint, address: &str) {
        self.input_addresses
            .lock()
            .unwrap()
            .insert(outpoint, address.to_string());
    }
}

impl Default for NullTxInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl TxInspector for NullTxInspector {
    fn output_color_values<'a>(
        &'a self,
        tx: &'a RawTx,
        colordef: &'a ColorDefinition,
    ) -> BoxFuture<'a, Result<Vec<Option<ColorValue>>, WalletError>> {
        let other = self.other_color_scripts.lock().unwrap();
        let values = tx
            .outputs
            .iter()
            .map(|out| {
                if other.contains(&out.script_pubkey) {
                    return None;
                }
                i64::try_from(out.value)
                    .ok()
                    .map(|v| ColorValue::new(colordef.clone(), v))
            })
            .collect();
        future::ready(Ok(values)).boxed()
    }

    fn input_addresses<'a>(
        &'a self,
        tx: &'a RawTx,
        indexes: &'a [usize],
    ) -> BoxFuture<'a, Result<Vec<String>, WalletError>> {
        let known = self.input_addresses.lock().unwrap();
        let addresses = indexes
            .iter()
            .filter_map(|&i| tx.inputs.get(i))
            .filter_map(|input| known.get(&input.prev).cloned())
            .collect();
        future::ready(Ok(addresses)).boxed()
    }
}
