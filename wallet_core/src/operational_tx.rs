//! Pending transaction under construction, and first-fit coin selection.

use std::sync::Arc;

use ccwallet_types::{Coin, ColorDefinition, ColorTarget, ColorValue};

use crate::backend::{AddressBook, CoinQuery, CoinSource, FeeEstimator};
use crate::{WalletConfig, WalletError};

/// Coins picked for a payment and the color value they add up to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinSelection {
    pub coins: Vec<Coin>,
    /// Accumulated value; may exceed what was required.
    pub value: ColorValue,
}

impl CoinSelection {
    /// Surplus over `required`, or `None` when there is nothing to return.
    pub fn change(&self, required: &ColorValue) -> Option<ColorValue> {
        let surplus = self.value.value().checked_sub(required.value())?;
        (surplus > 0).then(|| ColorValue::new(self.value.color_definition().clone(), surplus))
    }
}

/// Targets of a transaction being built, plus the wallet services needed to
/// fund them.
pub struct OperationalTx {
    coins: Arc<dyn CoinSource>,
    addresses: Arc<dyn AddressBook>,
    targets: Vec<ColorTarget>,
    include_unconfirmed: bool,
    base_fee_per_kb: i64,
    dust_threshold: i64,
}

impl OperationalTx {
    pub fn new(
        coins: Arc<dyn CoinSource>,
        addresses: Arc<dyn AddressBook>,
        config: &WalletConfig,
    ) -> Self {
        Self {
            coins,
            addresses,
            targets: Vec::new(),
            include_unconfirmed: config.spend_unconfirmed_coins,
            base_fee_per_kb: config.base_fee_per_kb,
            dust_threshold: config.dust_threshold,
        }
    }

    pub fn add_target(&mut self, target: ColorTarget) {
        self.targets.push(target);
    }

    pub fn add_targets(&mut self, targets: impl IntoIterator<Item = ColorTarget>) {
        self.targets.extend(targets);
    }

    pub fn targets(&self) -> &[ColorTarget] {
        &self.targets
    }

    /// Whether every target carries the same color.
    pub fn is_mono_color(&self) -> Result<bool, WalletError> {
        let first = self.targets.first().ok_or(WalletError::EmptyRecipientList)?;
        let color = first.color_id();
        Ok(self.targets.iter().all(|t| t.color_id() == color))
    }

    /// Uncolored fee for a transaction of `tx_size` bytes, rounded up.
    pub fn required_fee(&self, tx_size: usize) -> ColorValue {
        let size = i64::try_from(tx_size).unwrap_or(i64::MAX);
        let scaled = size.saturating_mul(self.base_fee_per_kb);
        let fee = scaled / 1000 + i64::from(scaled % 1000 != 0);
        ColorValue::uncolored(fee)
    }

    pub fn dust_threshold(&self) -> ColorValue {
        ColorValue::uncolored(self.dust_threshold)
    }

    pub fn change_address(&self, colordef: &ColorDefinition) -> Result<String, WalletError> {
        if !self.is_mono_color()? {
            return Err(WalletError::MultiColorUnsupported);
        }
        self.addresses.change_address(colordef)
    }

    /// Pick coins, in the order the coin source returns them, until their
    /// value covers `color_value` plus the estimated fee.
    ///
    /// A fee estimator is only accepted for uncolored values.
    pub async fn select_coins(
        &self,
        color_value: &ColorValue,
        fee_estimator: Option<&dyn FeeEstimator>,
    ) -> Result<CoinSelection, WalletError> {
        let colordef = color_value.color_definition().clone();
        if !color_value.is_uncolored() && fee_estimator.is_some() {
            return Err(WalletError::UnsupportedFeeForColoredValue);
        }

        let query = CoinQuery {
            addresses: self.addresses.addresses_for(&colordef),
            color: colordef.clone(),
            include_unconfirmed: self.include_unconfirmed,
        };
        let coins = self.coins.query(&query).await?;

        let mut required = color_value.clone();
        if let Some(estimator) = fee_estimator {
            let fee = estimator.estimate_required_fee(coins.len());
            if fee.color_id() != colordef.id() {
                return Err(WalletError::UnsupportedFeeForColoredValue);
            }
            required = required
                .checked_add(&fee)
                .ok_or(WalletError::ValueOverflow)?;
        }

        let mut selected = Vec::new();
        let mut total = ColorValue::zero(colordef.clone());
        for coin in coins {
            if total.value() >= required.value() {
                break;
            }
            if coin.main_color_value().color_id() != colordef.id() {
                tracing::warn!(
                    coin = %coin.outpoint(),
                    color = %coin.main_color_value().color_id(),
                    "coin source returned a coin of another color, skipping"
                );
                continue;
            }
            total = total
                .checked_add(coin.main_color_value())
                .ok_or(WalletError::ValueOverflow)?;
            selected.push(coin);
        }

        if total.value() < required.value() {
            return Err(WalletError::InsufficientFunds {
                required: required.value(),
                found: total.value(),
            });
        }

        tracing::debug!(
            color = %colordef.id(),
            required = required.value(),
            selected = selected.len(),
            value = total.value(),
            "coins selected"
        );
        Ok(CoinSelection {
            coins: selected,
            value: total,
        })
    }
}
