//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator the wallet core consumes (clock, transaction store,
//! blockchain, coin registry, signer, broadcaster, payment service) has an
//! in-memory implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Records the calls it receives
//! - Never touches the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod assets;
pub mod chain;
pub mod clock;
pub mod coins;
pub mod composer;
pub mod payment_service;
pub mod signing;
pub mod store;

pub use assets::{NullAssetRegistry, NullTxInspector};
pub use chain::{NullChain, NullCoinApplier};
pub use clock::NullClock;
pub use coins::{make_coin, NullAddressBook, NullCoinSource};
pub use composer::NullComposer;
pub use payment_service::NullPaymentService;
pub use signing::{NullBroadcaster, NullSigner, SIGNATURE_MARKER};
pub use store::NullTxStore;
