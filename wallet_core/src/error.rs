use ccwallet_store::StoreError;
use ccwallet_types::{TxId, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid value format: {0:?}")]
    InvalidFormat(String),

    #[error("not enough coins: {required} requested, {found} found")]
    InsufficientFunds { required: i64, found: i64 },

    #[error("fee estimator can only be used with uncolored values")]
    UnsupportedFeeForColoredValue,

    #[error("multi-color payments are not supported")]
    MultiColorUnsupported,

    #[error("transaction not found: {0}")]
    TransactionNotFound(TxId),

    #[error("asset not recognized: {0}")]
    AssetNotRecognized(String),

    #[error("payment already committed")]
    PaymentAlreadyCommitted,

    #[error("payment was not properly initialized")]
    PaymentNotProperlyInitialized,

    #[error("signing seed is undefined")]
    SeedUndefined,

    #[error("recipient list is empty")]
    EmptyRecipientList,

    #[error("request error: {0}")]
    RequestError(String),

    #[error("payment service returned a wrong transaction: {0}")]
    CwppWrongTx(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("invalid payment URI: {0}")]
    InvalidPaymentUri(String),

    #[error("color value overflow")]
    ValueOverflow,

    #[error("blockchain error: {0}")]
    Blockchain(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("broadcast error: {0}")]
    Broadcast(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Types(TypesError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TypesError> for WalletError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidFormat(s) => WalletError::InvalidFormat(s),
            other => WalletError::Types(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_format_errors_surface_as_invalid_format() {
        let err: WalletError = TypesError::InvalidFormat("1.x".into()).into();
        assert!(matches!(err, WalletError::InvalidFormat(ref s) if s == "1.x"));

        let err: WalletError = TypesError::InvalidUnit(3).into();
        assert!(matches!(err, WalletError::Types(TypesError::InvalidUnit(3))));
    }

    #[test]
    fn insufficient_funds_message() {
        let err = WalletError::InsufficientFunds {
            required: 10_000,
            found: 4_000,
        };
        assert_eq!(err.to_string(), "not enough coins: 10000 requested, 4000 found");
    }
}
