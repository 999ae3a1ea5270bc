//! Client side of a CWPP negotiation.
//!
//! The session moves strictly forward:
//! `NonInitialized -> Fresh -> Sending -> Sent | Failed`.
//! The service builds the transaction around the coins we offer; we sign our
//! own inputs only after the candidate has been checked against what we
//! offered and what we expect to receive.

use std::fmt;
use std::sync::Arc;

use ccwallet_types::{
    address, AssetDefinition, Coin, ColorDefinition, ColorTarget, ColorValue, RawTx, Seed, TxId,
};

use super::client::PaymentService;
use super::messages::{ChangeOutput, PaymentRequest, ProcessRequest};
use super::uri::PaymentUri;
use super::verify::{verify_candidate, Expectation};
use crate::backend::{AddressBook, AssetRegistry, Broadcaster, CoinSource, Signer, TxInspector};
use crate::operational_tx::OperationalTx;
use crate::payment::{total_amount, Recipient};
use crate::{WalletConfig, WalletError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CwppState {
    NonInitialized,
    Fresh,
    Sending,
    Sent,
    Failed,
}

impl fmt::Display for CwppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NonInitialized => "non-initialized",
            Self::Fresh => "fresh",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Wallet services a negotiated payment needs.
#[derive(Clone)]
pub struct CwppContext {
    pub service: Arc<dyn PaymentService>,
    pub assets: Arc<dyn AssetRegistry>,
    pub coins: Arc<dyn CoinSource>,
    pub addresses: Arc<dyn AddressBook>,
    pub inspector: Arc<dyn TxInspector>,
    pub signer: Arc<dyn Signer>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub config: WalletConfig,
}

/// Coins chosen for the payment and the change expected back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CwppSelection {
    pub coins: Vec<Coin>,
    pub change: Option<ChangeOutput>,
    pub colordef: ColorDefinition,
}

pub struct CwppPayment {
    ctx: CwppContext,
    uri: PaymentUri,
    state: CwppState,
    read_only: bool,
    payment_request: Option<PaymentRequest>,
    asset: Option<AssetDefinition>,
    recipients: Vec<Recipient>,
    seed: Option<Seed>,
}

impl CwppPayment {
    pub fn new(ctx: CwppContext, payment_uri: &str) -> Result<Self, WalletError> {
        Ok(Self {
            ctx,
            uri: PaymentUri::parse(payment_uri)?,
            state: CwppState::NonInitialized,
            read_only: false,
            payment_request: None,
            asset: None,
            recipients: Vec::new(),
            seed: None,
        })
    }

    pub fn state(&self) -> CwppState {
        self.state
    }

    pub fn uri(&self) -> &PaymentUri {
        &self.uri
    }

    pub fn payment_request(&self) -> Option<&PaymentRequest> {
        self.payment_request.as_ref()
    }

    pub fn asset(&self) -> Option<&AssetDefinition> {
        self.asset.as_ref()
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn set_seed(&mut self, seed: Seed) {
        self.seed = Some(seed);
    }

    pub fn total_amount(&self) -> Result<String, WalletError> {
        let asset = self
            .asset
            .as_ref()
            .ok_or(WalletError::PaymentNotProperlyInitialized)?;
        total_amount(asset, &self.recipients)
    }

    /// Fetch the payment request and resolve its asset. May be retried
    /// until a send has started.
    pub async fn initialize(&mut self) -> Result<(), WalletError> {
        if self.read_only {
            return Err(WalletError::PaymentAlreadyCommitted);
        }

        let request = self.ctx.service.fetch_request(&self.uri).await?;
        if request.value <= 0 {
            tracing::warn!(
                uri = %self.uri,
                value = request.value,
                "payment request value not positive"
            );
            return Err(WalletError::RequestError("invalid payment value".into()));
        }
        let asset = self
            .ctx
            .assets
            .asset_by_id(&request.asset_id)
            .ok_or_else(|| WalletError::AssetNotRecognized(request.asset_id.clone()))?;

        self.recipients = vec![Recipient::new(
            request.address.clone(),
            asset.format_value(request.value),
        )];
        tracing::info!(
            uri = %self.uri,
            asset = %request.asset_id,
            value = request.value,
            "payment request received"
        );
        self.payment_request = Some(request);
        self.asset = Some(asset);
        self.state = CwppState::Fresh;
        Ok(())
    }

    /// Recipients come from the payment request and cannot be edited.
    pub fn add_recipient(&mut self, _address: &str, _amount: &str) -> Result<(), WalletError> {
        if self.read_only {
            return Err(WalletError::PaymentAlreadyCommitted);
        }
        Err(WalletError::NotImplemented("recipients of a negotiated payment are fixed"))
    }

    /// Select coins for exactly the requested value. Change, when there is
    /// any, goes to a fresh address of the same color.
    pub async fn select_coins(&self) -> Result<CwppSelection, WalletError> {
        let (request, asset) = match (&self.payment_request, &self.asset) {
            (Some(request), Some(asset)) => (request, asset),
            _ => return Err(WalletError::PaymentNotProperlyInitialized),
        };
        let colordef = asset.color_definition().clone();
        let needed = ColorValue::new(colordef.clone(), request.value);

        let mut op_tx = OperationalTx::new(
            Arc::clone(&self.ctx.coins),
            Arc::clone(&self.ctx.addresses),
            &self.ctx.config,
        );
        op_tx.add_target(ColorTarget::new(
            address::output_script(&request.address)?,
            needed.clone(),
        ));

        let selection = op_tx.select_coins(&needed, None).await?;
        let change = match selection.change(&needed) {
            Some(surplus) => Some(ChangeOutput {
                address: op_tx.change_address(&colordef)?,
                value: surplus.value(),
            }),
            None => None,
        };

        Ok(CwppSelection {
            coins: selection.coins,
            change,
            colordef,
        })
    }

    /// Negotiate, verify, sign and broadcast. Returns the broadcast id.
    ///
    /// Precondition failures leave the session untouched. Once past them
    /// the session is read-only and ends in `Sent` or `Failed`.
    pub async fn send(&mut self) -> Result<TxId, WalletError> {
        if self.read_only {
            return Err(WalletError::PaymentAlreadyCommitted);
        }
        if self.state != CwppState::Fresh {
            return Err(WalletError::PaymentNotProperlyInitialized);
        }
        if self.recipients.is_empty() {
            return Err(WalletError::EmptyRecipientList);
        }
        let Some(seed) = self.seed.clone() else {
            return Err(WalletError::SeedUndefined);
        };

        self.read_only = true;
        self.state = CwppState::Sending;

        match self.negotiate(&seed).await {
            Ok(txid) => {
                self.state = CwppState::Sent;
                tracing::info!(uri = %self.uri, %txid, "negotiated payment sent");
                Ok(txid)
            }
            Err(e) => {
                self.state = CwppState::Failed;
                tracing::warn!(uri = %self.uri, error = %e, "negotiated payment failed");
                Err(e)
            }
        }
    }

    async fn negotiate(&self, seed: &Seed) -> Result<TxId, WalletError> {
        let asset = self
            .asset
            .as_ref()
            .ok_or(WalletError::PaymentNotProperlyInitialized)?;
        let selection = self.select_coins().await?;

        let inputs = selection.coins.iter().map(Coin::to_raw_coin).collect();
        let first = ProcessRequest::inputs(
            selection.colordef.desc(),
            inputs,
            selection.change.clone(),
        );
        let response = self.ctx.service.process(&self.uri, &first).await?;
        let candidate = RawTx::from_hex(&response.tx_data).map_err(|e| {
            WalletError::CwppWrongTx(format!("undecodable transaction: {e}"))
        })?;

        let mut targets = self
            .recipients
            .iter()
            .map(|r| r.to_target(asset))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(change) = &selection.change {
            targets.push(ColorTarget::new(
                address::output_script(&change.address)?,
                ColorValue::new(selection.colordef.clone(), change.value),
            ));
        }

        let wallet_addresses = self.ctx.addresses.all_addresses();
        let expected = Expectation {
            coins: &selection.coins,
            targets: &targets,
            colordef: &selection.colordef,
            wallet_addresses: &wallet_addresses,
        };
        let own_inputs =
            verify_candidate(&candidate, &expected, self.ctx.inspector.as_ref()).await?;
        tracing::debug!(inputs = ?own_inputs, "candidate verified, signing own inputs");

        let signed = self
            .ctx
            .signer
            .sign(candidate, seed, Some(own_inputs.as_slice()))
            .await?;

        let second = ProcessRequest::signed_tx(signed.to_hex());
        let response = self.ctx.service.process(&self.uri, &second).await?;
        let final_tx = RawTx::from_hex(&response.tx_data)?;

        self.ctx.broadcaster.send_tx(&final_tx).await
    }
}
