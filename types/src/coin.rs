//! Unspent outputs as seen by the wallet.

use crate::{ColorDefinition, ColorId, ColorValue, OutPoint, TxId};
use serde::{Deserialize, Serialize};

/// An unspent output owned by the wallet, with its color already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    pub txid: TxId,
    pub out_index: u32,
    /// Raw output value in base units.
    pub value: u64,
    pub script: Vec<u8>,
    pub address: String,
    pub confirmed: bool,
    /// The coin's value under the color definition that governs it.
    pub main_color_value: ColorValue,
}

impl Coin {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.txid, self.out_index)
    }

    pub fn main_color_value(&self) -> &ColorValue {
        &self.main_color_value
    }

    pub fn to_raw_coin(&self) -> RawCoin {
        RawCoin {
            tx_id: self.txid,
            out_index: self.out_index,
            value: self.value,
            script: hex::encode(&self.script),
            address: self.address.clone(),
        }
    }
}

/// Wire form of a coin in payment-protocol messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCoin {
    pub tx_id: TxId,
    pub out_index: u32,
    pub value: u64,
    pub script: String,
    pub address: String,
}

impl RawCoin {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.tx_id, self.out_index)
    }
}

/// Coins in the order a coin query returned them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoinList {
    coins: Vec<Coin>,
}

impl CoinList {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn into_coins(self) -> Vec<Coin> {
        self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// One summed value per color, in first-seen order.
    pub fn total_values(&self) -> Vec<ColorValue> {
        let mut totals: Vec<ColorValue> = Vec::new();
        for coin in &self.coins {
            let cv = coin.main_color_value();
            match totals.iter_mut().find(|t| t.color_id() == cv.color_id()) {
                Some(total) => *total = total.clone() + cv.clone(),
                None => totals.push(cv.clone()),
            }
        }
        totals
    }

    /// Total for a single color; zero when no coin carries it.
    pub fn total_value(&self, colordef: &ColorDefinition) -> ColorValue {
        self.total_values()
            .into_iter()
            .find(|t| t.color_id() == colordef.id())
            .unwrap_or_else(|| ColorValue::zero(colordef.clone()))
    }

    pub fn color_ids(&self) -> Vec<ColorId> {
        self.total_values().iter().map(|t| t.color_id()).collect()
    }
}

impl From<Vec<Coin>> for CoinList {
    fn from(coins: Vec<Coin>) -> Self {
        Self::new(coins)
    }
}

impl IntoIterator for CoinList {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.into_iter()
    }
}
