//! Locally composed single-asset payments.

use std::fmt;
use std::sync::Arc;

use ccwallet_types::{address, AssetDefinition, ColorTarget, ColorValue, Seed, TxId};
use serde::{Deserialize, Serialize};

use crate::backend::{AddressBook, Broadcaster, CoinQuery, CoinSource, Signer, TxComposer};
use crate::operational_tx::OperationalTx;
use crate::{WalletConfig, WalletError};

/// One payment destination as entered by the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    /// Decimal amount in the asset's display unit.
    pub amount: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
        }
    }

    /// Output script and color value this recipient must receive.
    pub fn to_target(&self, asset: &AssetDefinition) -> Result<ColorTarget, WalletError> {
        let script = address::output_script(&self.address)?;
        let value = asset.parse_value(&self.amount)?;
        Ok(ColorTarget::new(
            script,
            ColorValue::new(asset.color_definition().clone(), value),
        ))
    }
}

/// Sum of recipient amounts, formatted in the asset's display unit.
pub(crate) fn total_amount(
    asset: &AssetDefinition,
    recipients: &[Recipient],
) -> Result<String, WalletError> {
    let mut total: i64 = 0;
    for recipient in recipients {
        let value = asset.parse_value(&recipient.amount)?;
        total = total.checked_add(value).ok_or(WalletError::ValueOverflow)?;
    }
    Ok(asset.format_value(total))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Fresh,
    Sending,
    Sent,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fresh => "fresh",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Wallet services a payment needs.
#[derive(Clone)]
pub struct PaymentContext {
    pub coins: Arc<dyn CoinSource>,
    pub addresses: Arc<dyn AddressBook>,
    pub composer: Arc<dyn TxComposer>,
    pub signer: Arc<dyn Signer>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub config: WalletConfig,
}

/// A payment of one asset to one or more recipients.
///
/// Recipients can be added until the first send attempt; after that the
/// payment is read-only whatever the outcome.
pub struct Payment {
    ctx: PaymentContext,
    asset: AssetDefinition,
    recipients: Vec<Recipient>,
    seed: Option<Seed>,
    read_only: bool,
    status: PaymentStatus,
}

impl Payment {
    pub fn new(ctx: PaymentContext, asset: AssetDefinition) -> Self {
        Self {
            ctx,
            asset,
            recipients: Vec::new(),
            seed: None,
            read_only: false,
            status: PaymentStatus::Fresh,
        }
    }

    pub fn set_seed(&mut self, seed: Seed) {
        self.seed = Some(seed);
    }

    pub fn asset(&self) -> &AssetDefinition {
        &self.asset
    }

    pub fn add_recipient(
        &mut self,
        address: impl Into<String>,
        amount: impl Into<String>,
    ) -> Result<&mut Self, WalletError> {
        if self.read_only {
            return Err(WalletError::PaymentAlreadyCommitted);
        }
        self.recipients.push(Recipient::new(address, amount));
        Ok(self)
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn total_amount(&self) -> Result<String, WalletError> {
        total_amount(&self.asset, &self.recipients)
    }

    /// Whether `address` is a well-formed address on the configured network.
    pub fn check_address(&self, address: &str) -> bool {
        address::is_testnet(address).is_ok_and(|testnet| testnet == self.ctx.config.testnet)
    }

    /// Whether the spendable balance of the asset covers `amount`.
    pub async fn check_amount(&self, amount: &str) -> Result<bool, WalletError> {
        let needed = self.asset.parse_value(amount)?;
        let colordef = self.asset.color_definition();
        let query = CoinQuery {
            color: colordef.clone(),
            addresses: self.ctx.addresses.addresses_for(colordef),
            include_unconfirmed: self.ctx.config.spend_unconfirmed_coins,
        };
        let available = self.ctx.coins.query(&query).await?.total_value(colordef);
        Ok(available.value() >= needed)
    }

    pub fn status(&self) -> PaymentStatus {
        if !self.read_only {
            return PaymentStatus::Fresh;
        }
        self.status
    }

    /// Compose, sign and broadcast the payment.
    pub async fn send(&mut self) -> Result<TxId, WalletError> {
        if self.read_only {
            return Err(WalletError::PaymentAlreadyCommitted);
        }
        if self.recipients.is_empty() {
            return Err(WalletError::EmptyRecipientList);
        }
        let Some(seed) = self.seed.clone() else {
            return Err(WalletError::SeedUndefined);
        };
        let targets = self
            .recipients
            .iter()
            .map(|r| r.to_target(&self.asset))
            .collect::<Result<Vec<_>, _>>()?;

        self.read_only = true;
        self.status = PaymentStatus::Sending;

        match self.compose_and_send(targets, &seed).await {
            Ok(txid) => {
                self.status = PaymentStatus::Sent;
                tracing::info!(%txid, asset = %self.asset.id(), "payment sent");
                Ok(txid)
            }
            Err(e) => {
                self.status = PaymentStatus::Failed;
                tracing::warn!(asset = %self.asset.id(), error = %e, "payment failed");
                Err(e)
            }
        }
    }

    async fn compose_and_send(
        &self,
        targets: Vec<ColorTarget>,
        seed: &Seed,
    ) -> Result<TxId, WalletError> {
        let mut op_tx = OperationalTx::new(
            Arc::clone(&self.ctx.coins),
            Arc::clone(&self.ctx.addresses),
            &self.ctx.config,
        );
        op_tx.add_targets(targets);

        let unsigned = self.ctx.composer.compose(&op_tx).await?;
        let signed = self.ctx.signer.sign(unsigned, seed, None).await?;
        self.ctx.broadcaster.send_tx(&signed).await
    }
}
