//! Address decoding into output scripts.
//!
//! Only the two legacy forms colored-coin wallets hand out are understood:
//! pay-to-pubkey-hash and pay-to-script-hash, on mainnet or testnet.

use bitcoin::address::{Address, AddressType, NetworkUnchecked};
use bitcoin::hashes::Hash;
use bitcoin::{Network, NetworkKind, PubkeyHash};

use crate::TypesError;

fn parse(address: &str) -> Result<Address<NetworkUnchecked>, TypesError> {
    let parsed: Address<NetworkUnchecked> = address
        .parse()
        .map_err(|e| TypesError::InvalidAddress(format!("{address}: {e}")))?;
    match parsed.assume_checked_ref().address_type() {
        Some(AddressType::P2pkh | AddressType::P2sh) => Ok(parsed),
        _ => Err(TypesError::InvalidAddress(format!(
            "{address}: only P2PKH and P2SH addresses are supported"
        ))),
    }
}

/// Build the output script an address pays to.
pub fn output_script(address: &str) -> Result<Vec<u8>, TypesError> {
    Ok(parse(address)?
        .assume_checked()
        .script_pubkey()
        .into_bytes())
}

/// Whether the address decodes to a supported output script.
pub fn is_valid(address: &str) -> bool {
    parse(address).is_ok()
}

/// Whether the address belongs to the test network.
pub fn is_testnet(address: &str) -> Result<bool, TypesError> {
    Ok(!parse(address)?.is_valid_for_network(Network::Bitcoin))
}

/// Encode a 20-byte hash as a P2PKH address.
pub fn p2pkh_address(pubkey_hash: &[u8; 20], testnet: bool) -> String {
    let network = if testnet {
        NetworkKind::Test
    } else {
        NetworkKind::Main
    };
    Address::p2pkh(PubkeyHash::from_byte_array(*pubkey_hash), network).to_string()
}
