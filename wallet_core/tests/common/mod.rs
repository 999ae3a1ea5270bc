//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bitcoin::hashes::Hash;
use ccwallet_core::cwpp::{CwppContext, PaymentRequest};
use ccwallet_core::WalletConfig;
use ccwallet_nullables::{
    make_coin, NullAddressBook, NullAssetRegistry, NullBroadcaster, NullCoinSource,
    NullPaymentService, NullSigner, NullTxInspector,
};
use ccwallet_types::{
    address, AssetDefinition, ColorDefinition, ColorId, OutPoint, RawTx, TxId, TxIn, TxOut,
};

pub const MERCHANT: u8 = 9;
pub const OURS: u8 = 1;
pub const CHANGE: u8 = 2;

/// Testnet P2PKH address for a fixed 20-byte hash.
pub fn addr(byte: u8) -> String {
    address::p2pkh_address(&[byte; 20], true)
}

pub fn script(byte: u8) -> Vec<u8> {
    address::output_script(&addr(byte)).expect("valid address")
}

pub fn gold() -> ColorDefinition {
    ColorDefinition::new(ColorId(1), "epobc:gold:0:0")
}

/// Eight decimal places.
pub fn gold_asset() -> AssetDefinition {
    AssetDefinition::new(vec!["gold".into()], vec![gold()], Some(100_000_000))
        .expect("valid asset")
}

pub fn test_config() -> WalletConfig {
    WalletConfig {
        testnet: true,
        ..WalletConfig::default()
    }
}

/// A tx spending one made-up outpoint, distinguishable by `byte`.
pub fn sample_tx(byte: u8) -> RawTx {
    RawTx {
        inputs: vec![TxIn::new(OutPoint::new(TxId::from_byte_array([byte; 32]), 0))],
        outputs: vec![TxOut::new(1_000, script(byte))],
        ..RawTx::default()
    }
}

/// The request the fixture's service hands out: 10000 gold to the merchant.
pub fn merchant_request() -> PaymentRequest {
    PaymentRequest {
        asset_id: gold_asset().id().to_string(),
        address: addr(MERCHANT),
        value: 10_000,
    }
}

/// Nullables wired into a negotiation context, holding 8000 + 7000 units
/// of gold at our address.
pub struct CwppFixture {
    pub service: Arc<NullPaymentService>,
    pub assets: Arc<NullAssetRegistry>,
    pub coins: Arc<NullCoinSource>,
    pub addresses: Arc<NullAddressBook>,
    pub inspector: Arc<NullTxInspector>,
    pub signer: Arc<NullSigner>,
    pub broadcaster: Arc<NullBroadcaster>,
}

impl CwppFixture {
    pub fn new() -> Self {
        let fixture = Self {
            service: Arc::new(NullPaymentService::new()),
            assets: Arc::new(NullAssetRegistry::new()),
            coins: Arc::new(NullCoinSource::new()),
            addresses: Arc::new(NullAddressBook::new()),
            inspector: Arc::new(NullTxInspector::new()),
            signer: Arc::new(NullSigner::new()),
            broadcaster: Arc::new(NullBroadcaster::new()),
        };
        fixture.assets.add(gold_asset());
        fixture.addresses.add_address(&gold(), &addr(OURS));
        fixture.addresses.set_change_address(&gold(), &addr(CHANGE));
        fixture.coins.add(make_coin(0x11, 0, &addr(OURS), &gold(), 8_000));
        fixture.coins.add(make_coin(0x12, 1, &addr(OURS), &gold(), 7_000));
        fixture.service.set_request(merchant_request());
        fixture
    }

    pub fn context(&self) -> CwppContext {
        CwppContext {
            service: self.service.clone(),
            assets: self.assets.clone(),
            coins: self.coins.clone(),
            addresses: self.addresses.clone(),
            inspector: self.inspector.clone(),
            signer: self.signer.clone(),
            broadcaster: self.broadcaster.clone(),
            config: test_config(),
        }
    }
}

/// Outpoints of the fixture's two coins.
pub fn our_outpoints() -> [OutPoint; 2] {
    [
        OutPoint::new(TxId::from_byte_array([0x11; 32]), 0),
        OutPoint::new(TxId::from_byte_array([0x12; 32]), 1),
    ]
}

pub fn foreign_outpoint() -> OutPoint {
    OutPoint::new(TxId::from_byte_array([0x99; 32]), 3)
}

/// What an honest service would build: our two coins plus one of its own,
/// the payment, our change, and its own output.
pub fn honest_candidate() -> RawTx {
    let [a, b] = our_outpoints();
    RawTx {
        inputs: vec![TxIn::new(a), TxIn::new(b), TxIn::new(foreign_outpoint())],
        outputs: vec![
            TxOut::new(10_000, script(MERCHANT)),
            TxOut::new(5_000, script(CHANGE)),
            TxOut::new(20_000, script(0x42)),
        ],
        ..RawTx::default()
    }
}

/// The candidate with every input carrying a signature.
pub fn finalized(candidate: &RawTx) -> RawTx {
    let mut tx = candidate.clone();
    for input in &mut tx.inputs {
        input.script_sig = b"final".to_vec();
    }
    tx
}
