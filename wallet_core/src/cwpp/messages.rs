//! JSON bodies exchanged with a payment service.

use ccwallet_types::RawCoin;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "cwpp/0.0";
pub const PROCESS_REQUEST: &str = "ProcessRequest";

/// The payment request document: what the service wants paid, and where.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub asset_id: String,
    pub address: String,
    /// Amount in the asset's smallest unit.
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOutput {
    pub address: String,
    pub value: i64,
}

/// Body of a POST to the process endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessRequest {
    /// First round: the coins we contribute and the change we expect back.
    #[serde(rename_all = "camelCase")]
    Inputs {
        protocol: String,
        message_type: String,
        color_desc: String,
        inputs: Vec<RawCoin>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        change: Option<ChangeOutput>,
    },
    /// Second round: the candidate transaction with our inputs signed.
    SignedTx {
        protocol: String,
        #[serde(rename = "messageType")]
        message_type: String,
        tx_data: String,
    },
}

impl ProcessRequest {
    pub fn inputs(color_desc: &str, inputs: Vec<RawCoin>, change: Option<ChangeOutput>) -> Self {
        Self::Inputs {
            protocol: PROTOCOL_VERSION.to_string(),
            message_type: PROCESS_REQUEST.to_string(),
            color_desc: color_desc.to_string(),
            inputs,
            change,
        }
    }

    pub fn signed_tx(tx_hex: String) -> Self {
        Self::SignedTx {
            protocol: PROTOCOL_VERSION.to_string(),
            message_type: PROCESS_REQUEST.to_string(),
            tx_data: tx_hex,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Hex raw transaction.
    pub tx_data: String,
}

/// Error body a service may return with a non-success status.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use ccwallet_types::TxId;
    use serde_json::json;

    #[test]
    fn payment_request_uses_camel_case() {
        let req: PaymentRequest = serde_json::from_value(json!({
            "assetId": "JgsTfaa5TGcxJh",
            "address": "n2f687HTAW5R8pg6DRVHn5AS1a2hAK5WgW",
            "value": 10000
        }))
        .unwrap();
        assert_eq!(req.asset_id, "JgsTfaa5TGcxJh");
        assert_eq!(req.value, 10_000);
    }

    #[test]
    fn first_message_shape() {
        let coin = RawCoin {
            tx_id: TxId::from_byte_array([1u8; 32]),
            out_index: 2,
            value: 600,
            script: "76a9".into(),
            address: "addr".into(),
        };
        let msg = ProcessRequest::inputs(
            "epobc:gold:0:0",
            vec![coin],
            Some(ChangeOutput {
                address: "change".into(),
                value: 5_000,
            }),
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["protocol"], "cwpp/0.0");
        assert_eq!(value["messageType"], "ProcessRequest");
        assert_eq!(value["colorDesc"], "epobc:gold:0:0");
        assert_eq!(value["inputs"][0]["outIndex"], 2);
        assert_eq!(value["change"]["value"], 5_000);
    }

    #[test]
    fn first_message_omits_absent_change() {
        let msg = ProcessRequest::inputs("epobc:gold:0:0", Vec::new(), None);
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("change").is_none());
    }

    #[test]
    fn messages_deserialize_to_the_right_variant() {
        let signed: ProcessRequest = serde_json::from_value(json!({
            "protocol": "cwpp/0.0",
            "messageType": "ProcessRequest",
            "tx_data": "0100"
        }))
        .unwrap();
        assert_eq!(signed, ProcessRequest::signed_tx("0100".into()));

        let inputs: ProcessRequest = serde_json::from_value(json!({
            "protocol": "cwpp/0.0",
            "messageType": "ProcessRequest",
            "colorDesc": "epobc:gold:0:0",
            "inputs": []
        }))
        .unwrap();
        assert_eq!(inputs, ProcessRequest::inputs("epobc:gold:0:0", Vec::new(), None));
    }
}
