//! Transactional core of a colored-coin wallet.
//!
//! - Coin selection for a colored value ([`OperationalTx`])
//! - Transaction status tracking with a throttled recheck ([`TxDb`])
//! - Locally composed payments ([`Payment`])
//! - CWPP payment negotiation with a remote service ([`cwpp::CwppPayment`])
//!
//! Blockchain access, signing, broadcasting and the asset catalog are
//! injected through the traits in [`backend`].

pub mod backend;
pub mod config;
pub mod cwpp;
pub mod error;
pub mod logging;
pub mod operational_tx;
pub mod payment;
pub mod recently_checked;
pub mod tx_db;

pub use backend::{
    AddressBook, AssetRegistry, BlockSource, Broadcaster, Clock, CoinApplier, CoinQuery,
    CoinSource, FeeEstimator, Signer, StatusClassifier, SystemClock, TxComposer, TxInspector,
};
pub use config::WalletConfig;
pub use error::WalletError;
pub use operational_tx::{CoinSelection, OperationalTx};
pub use payment::{Payment, PaymentContext, PaymentStatus, Recipient};
pub use tx_db::TxDb;
