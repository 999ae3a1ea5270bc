//! Signing seed handed to the external signer.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Hex-encoded wallet seed.
///
/// Deliberately not `Serialize` and redacted in `Debug`. The string is
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed(String);

impl Seed {
    pub fn new(hex_seed: impl Into<String>) -> Self {
        Self(hex_seed.into())
    }

    pub fn expose_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}
