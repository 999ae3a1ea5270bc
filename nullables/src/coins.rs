//! Nullable coin registry and address book.

use bitcoin::hashes::Hash;
use ccwallet_core::{AddressBook, CoinQuery, CoinSource, WalletError};
use ccwallet_types::{Coin, CoinList, ColorDefinition, ColorId, ColorValue, TxId};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory coin set.
///
/// Queries return matching coins in the order they were added, and every
/// query is recorded.
pub struct NullCoinSource {
    coins: Mutex<Vec<Coin>>,
    queries: Mutex<Vec<CoinQuery>>,
}

impl NullCoinSource {
    pub fn new() -> Self {
        Self {
            coins: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, coin: Coin) {
        self.coins.lock().unwrap().push(coin);
    }

    /// Queries received so far (for assertions).
    pub fn queries(&self) -> Vec<CoinQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl Default for NullCoinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinSource for NullCoinSource {
    fn query<'a>(&'a self, query: &'a CoinQuery) -> BoxFuture<'a, Result<CoinList, WalletError>> {
        self.queries.lock().unwrap().push(query.clone());
        let coins: Vec<Coin> = self
            .coins
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.main_color_value().color_id() == query.color.id())
            .filter(|c| query.addresses.contains(&c.address))
            .filter(|c| query.include_unconfirmed || c.confirmed)
            .cloned()
            .collect();
        future::ready(Ok(CoinList::new(coins))).boxed()
    }
}

/// Build a confirmed coin paying `value` of `colordef` to `address`.
///
/// The raw output value equals the color value, which is how the other
/// nullables read colored outputs back.
pub fn make_coin(
    txid_byte: u8,
    out_index: u32,
    address: &str,
    colordef: &ColorDefinition,
    value: i64,
) -> Coin {
    Coin {
        txid: TxId::from_byte_array([txid_byte; 32]),
        out_index,
        value: value.unsigned_abs(),
        script: ccwallet_types::address::output_script(address).unwrap_or_default(),
        address: address.to_string(),
        confirmed: true,
        main_color_value: ColorValue::new(colordef.clone(), value),
    }
}

/// Fixed per-color addresses.
pub struct NullAddressBook {
    addresses: Mutex<HashMap<ColorId, Vec<String>>>,
    change: Mutex<HashMap<ColorId, String>>,
}

impl NullAddressBook {
    pub fn new() -> Self {
        Self {
            addresses: Mutex::new(HashMap::new()),
            change: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_address(&self, colordef: &ColorDefinition, address: &str) {
        self.addresses
            .lock()
            .unwrap()
            .entry(colordef.id())
            .or_default()
            .push(address.to_string());
    }

    pub fn set_change_address(&self, colordef: &ColorDefinition, address: &str) {
        self.change
            .lock()
            .unwrap()
            .insert(colordef.id(), address.to_string());
    }
}

impl Default for NullAddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBook for NullAddressBook {
    fn addresses_for(&self, colordef: &ColorDefinition) -> Vec<String> {
        self.addresses
            .lock()
            .unwrap()
            .get(&colordef.id())
            .cloned()
            .unwrap_or_default()
    }

    fn all_addresses(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .addresses
            .lock()
            .unwrap()
            .values()
            .flatten()
            .cloned()
            .collect();
        all.extend(self.change.lock().unwrap().values().cloned());
        all.sort();
        all.dedup();
        all
    }

    /// The configured change address, else the first address of the color.
    fn change_address(&self, colordef: &ColorDefinition) -> Result<String, WalletError> {
        if let Some(address) = self.change.lock().unwrap().get(&colordef.id()) {
            return Ok(address.clone());
        }
        self.addresses_for(colordef)
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::AssetNotRecognized(colordef.desc().to_string()))
    }
}
