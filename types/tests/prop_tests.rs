use bitcoin::hashes::Hash;
use proptest::prelude::*;

use ccwallet_types::{
    AssetDefinition, ColorDefinition, ColorId, OutPoint, RawTx, TxId, TxIn, TxOut,
};

fn asset_with_exponent(k: u32) -> AssetDefinition {
    AssetDefinition::new(
        vec!["test".into()],
        vec![ColorDefinition::new(ColorId(9), "epobc:00:0:0")],
        Some(10u64.pow(k)),
    )
    .unwrap()
}

fn arb_tx() -> impl Strategy<Value = RawTx> {
    let input = (
        prop::array::uniform32(0u8..),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..80),
        any::<u32>(),
    )
        .prop_map(|(txid, index, script_sig, sequence)| TxIn {
            prev: OutPoint::new(TxId::from_byte_array(txid), index),
            script_sig,
            sequence,
        });
    let output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..40))
        .prop_map(|(value, script)| TxOut::new(value, script));
    (
        any::<u32>(),
        prop::collection::vec(input, 1..5),
        prop::collection::vec(output, 0..5),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| RawTx {
            version,
            inputs,
            outputs,
            lock_time,
        })
}

proptest! {
    /// parse(format(v)) == v for every unit 10^k and every value.
    #[test]
    fn value_codec_round_trip(k in 0u32..=8, v in any::<i64>()) {
        let def = asset_with_exponent(k);
        let formatted = def.format_value(v);
        prop_assert_eq!(def.parse_value(&formatted).unwrap(), v, "formatted as {}", formatted);
    }

    /// Formatted values always carry exactly k fractional digits.
    #[test]
    fn value_codec_fraction_width(k in 1u32..=8, v in any::<i64>()) {
        let def = asset_with_exponent(k);
        let formatted = def.format_value(v);
        let (_, fraction) = formatted.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), k as usize);
    }

    /// Raw transaction hex round trip.
    #[test]
    fn raw_tx_round_trip(tx in arb_tx()) {
        let decoded = RawTx::from_hex(&tx.to_hex()).unwrap();
        prop_assert_eq!(decoded.txid(), tx.txid());
        prop_assert_eq!(decoded, tx);
    }

    /// TxId display form parses back to the same id.
    #[test]
    fn tx_id_hex_round_trip(bytes in prop::array::uniform32(0u8..)) {
        let id = TxId::from_byte_array(bytes);
        prop_assert_eq!(id.to_string().parse::<TxId>().unwrap(), id);
    }
}
