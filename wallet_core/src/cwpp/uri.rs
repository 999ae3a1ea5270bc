//! Payment URIs of the form `cwpp://<host[:port]>/<payment-hash>`.

use std::fmt;
use std::str::FromStr;

use crate::WalletError;

const URI_PREFIX: &str = "cwpp://";

/// A parsed payment URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentUri {
    host: String,
    hash: String,
}

impl PaymentUri {
    pub fn parse(uri: &str) -> Result<Self, WalletError> {
        let invalid = || WalletError::InvalidPaymentUri(uri.to_string());

        let rest = uri.strip_prefix(URI_PREFIX).ok_or_else(invalid)?;
        let (host, hash) = rest.split_once('/').ok_or_else(invalid)?;
        if host.is_empty() || hash.is_empty() || hash.contains('/') {
            return Err(invalid());
        }
        if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        Ok(Self {
            host: host.to_string(),
            hash: hash.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Where the payment request document is fetched from.
    pub fn request_url(&self, scheme: &str) -> String {
        format!("{scheme}://{}/cwpp/{}", self.host, self.hash)
    }

    /// Where both process messages are posted.
    pub fn process_url(&self, scheme: &str) -> String {
        format!("{scheme}://{}/cwpp/process/{}", self.host, self.hash)
    }
}

impl fmt::Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_PREFIX}{}/{}", self.host, self.hash)
    }
}

impl FromStr for PaymentUri {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub fn is_cwpp_uri(uri: &str) -> bool {
    PaymentUri::parse(uri).is_ok()
}

pub fn request_url(uri: &str, scheme: &str) -> Result<String, WalletError> {
    Ok(PaymentUri::parse(uri)?.request_url(scheme))
}

pub fn process_url(uri: &str, scheme: &str) -> Result<String, WalletError> {
    Ok(PaymentUri::parse(uri)?.process_url(scheme))
}
