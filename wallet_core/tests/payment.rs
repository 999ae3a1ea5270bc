//! Locally composed payments with nullable collaborators.

mod common;

use std::sync::Arc;

use ccwallet_core::{Payment, PaymentContext, PaymentStatus, WalletConfig, WalletError};
use ccwallet_nullables::{
    make_coin, NullAddressBook, NullBroadcaster, NullCoinSource, NullComposer, NullSigner,
    SIGNATURE_MARKER,
};
use ccwallet_types::{address, Seed, TxOut};

use common::{addr, gold, gold_asset, script, test_config, CHANGE, MERCHANT, OURS};

struct Fixture {
    coins: Arc<NullCoinSource>,
    composer: Arc<NullComposer>,
    signer: Arc<NullSigner>,
    broadcaster: Arc<NullBroadcaster>,
    ctx: PaymentContext,
}

impl Fixture {
    fn new(config: WalletConfig) -> Self {
        let coins = Arc::new(NullCoinSource::new());
        let addresses = Arc::new(NullAddressBook::new());
        let composer = Arc::new(NullComposer::new());
        let signer = Arc::new(NullSigner::new());
        let broadcaster = Arc::new(NullBroadcaster::new());
        addresses.add_address(&gold(), &addr(OURS));
        addresses.set_change_address(&gold(), &addr(CHANGE));
        coins.add(make_coin(0x11, 0, &addr(OURS), &gold(), 8_000));
        coins.add(make_coin(0x12, 1, &addr(OURS), &gold(), 7_000));
        let ctx = PaymentContext {
            coins: coins.clone(),
            addresses,
            composer: composer.clone(),
            signer: signer.clone(),
            broadcaster: broadcaster.clone(),
            config,
        };
        Self {
            coins,
            composer,
            signer,
            broadcaster,
            ctx,
        }
    }

    fn payment(&self) -> Payment {
        Payment::new(self.ctx.clone(), gold_asset())
    }
}

#[tokio::test]
async fn send_composes_signs_everything_and_broadcasts() {
    let f = Fixture::new(test_config());
    let mut payment = f.payment();
    payment.add_recipient(addr(MERCHANT), "0.0001").unwrap();
    payment.set_seed(Seed::new("00ff"));

    let txid = payment.send().await.unwrap();

    assert_eq!(payment.status(), PaymentStatus::Sent);
    assert_eq!(f.composer.compose_count(), 1);
    assert_eq!(f.signer.calls().len(), 1);
    assert_eq!(f.signer.calls()[0].1, None);

    let sent = f.broadcaster.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].txid(), txid);
    assert_eq!(
        sent[0].outputs,
        vec![
            TxOut::new(10_000, script(MERCHANT)),
            TxOut::new(5_000, script(CHANGE)),
        ]
    );
    assert!(sent[0]
        .inputs
        .iter()
        .all(|input| input.script_sig == SIGNATURE_MARKER));
}

#[tokio::test]
async fn multiple_recipients_are_paid_in_order() {
    let f = Fixture::new(test_config());
    let mut payment = f.payment();
    payment
        .add_recipient(addr(MERCHANT), "0.00006")
        .unwrap()
        .add_recipient(addr(0x33), "0.00009")
        .unwrap();
    assert_eq!(payment.total_amount().unwrap(), "0.00015000");
    payment.set_seed(Seed::new("00ff"));

    payment.send().await.unwrap();

    let sent = f.broadcaster.sent();
    assert_eq!(
        sent[0].outputs,
        vec![
            TxOut::new(6_000, script(MERCHANT)),
            TxOut::new(9_000, script(0x33)),
        ]
    );
}

#[tokio::test]
async fn preconditions_are_checked_in_order_without_side_effects() {
    let f = Fixture::new(test_config());
    let mut payment = f.payment();

    assert!(matches!(
        payment.send().await,
        Err(WalletError::EmptyRecipientList)
    ));
    payment.add_recipient(addr(MERCHANT), "0.0001").unwrap();
    assert!(matches!(payment.send().await, Err(WalletError::SeedUndefined)));

    assert_eq!(payment.status(), PaymentStatus::Fresh);
    assert_eq!(f.composer.compose_count(), 0);

    // Still editable after a rejected send.
    payment.add_recipient(addr(0x33), "0.00001").unwrap();
    assert_eq!(payment.recipients().len(), 2);
}

#[tokio::test]
async fn malformed_amount_is_rejected_before_committing() {
    let f = Fixture::new(test_config());
    let mut payment = f.payment();
    payment.add_recipient(addr(MERCHANT), "1.2.3").unwrap();
    payment.set_seed(Seed::new("00ff"));

    assert!(matches!(
        payment.send().await,
        Err(WalletError::InvalidFormat(_))
    ));
    assert_eq!(payment.status(), PaymentStatus::Fresh);
    assert_eq!(f.coins.query_count(), 0);
}

#[tokio::test]
async fn failed_broadcast_leaves_payment_read_only() {
    let f = Fixture::new(test_config());
    f.broadcaster.fail_with("rejected by node");
    let mut payment = f.payment();
    payment.add_recipient(addr(MERCHANT), "0.0001").unwrap();
    payment.set_seed(Seed::new("00ff"));

    assert!(matches!(payment.send().await, Err(WalletError::Broadcast(_))));
    assert_eq!(payment.status(), PaymentStatus::Failed);

    assert!(matches!(
        payment.add_recipient(addr(0x33), "1"),
        Err(WalletError::PaymentAlreadyCommitted)
    ));
    assert!(matches!(
        payment.send().await,
        Err(WalletError::PaymentAlreadyCommitted)
    ));
    assert_eq!(f.composer.compose_count(), 1);
}

#[tokio::test]
async fn insufficient_funds_fails_the_payment() {
    let f = Fixture::new(test_config());
    let mut payment = f.payment();
    payment.add_recipient(addr(MERCHANT), "1").unwrap();
    payment.set_seed(Seed::new("00ff"));

    assert!(matches!(
        payment.send().await,
        Err(WalletError::InsufficientFunds {
            required: 100_000_000,
            found: 15_000
        })
    ));
    assert_eq!(payment.status(), PaymentStatus::Failed);
    assert_eq!(f.signer.call_count(), 0);
}

#[test]
fn check_address_follows_configured_network() {
    let testnet = Fixture::new(test_config()).payment();
    let mainnet = Fixture::new(WalletConfig::default()).payment();
    let main_addr = address::p2pkh_address(&[OURS; 20], false);

    assert!(testnet.check_address(&addr(MERCHANT)));
    assert!(!testnet.check_address(&main_addr));
    assert!(mainnet.check_address(&main_addr));
    assert!(!mainnet.check_address(&addr(MERCHANT)));
    assert!(!testnet.check_address("not-an-address"));
    assert!(!testnet.check_address(""));
}

#[tokio::test]
async fn check_amount_compares_against_spendable_balance() {
    let f = Fixture::new(test_config());
    let payment = f.payment();

    assert!(payment.check_amount("0.00015").await.unwrap());
    assert!(!payment.check_amount("0.00015001").await.unwrap());
    assert!(matches!(
        payment.check_amount("abc").await,
        Err(WalletError::InvalidFormat(_))
    ));
}
