//! Confirmation status of a locally known transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a transaction stands with respect to the blockchain.
///
/// Moves `Unconfirmed -> Confirmed` in the common case. `Invalid` is
/// terminal: nothing in this workspace moves a record out of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unknown,
    Unconfirmed,
    Confirmed,
    /// Conflicting or rejected (double spend, dropped).
    Invalid,
}

impl Status {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Every status except `Invalid` counts as valid.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}
