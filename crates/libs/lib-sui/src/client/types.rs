//! # Sui RPC Types
//!
//! Result shapes of the JSON-RPC methods the adapter calls. Only the fields we
//! read are modelled; everything else is ignored on deserialization.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use shared::CoinBalance;

/// `suix_getCoins` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<CoinObject>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// A single owned coin object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinObject {
    pub coin_type: String,
    pub coin_object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    /// Base58 object digest
    pub digest: String,
    #[serde(deserialize_with = "u128_from_str_or_num")]
    pub balance: u128,
}

/// Shared object reference needed to pass a pool as a transaction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedObject {
    pub initial_shared_version: u64,
}

/// `sui_getObject` response with `showOwner`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub owner: Option<Value>,
}

impl ObjectData {
    /// `owner.Shared.initial_shared_version`, if the object is shared.
    pub fn shared(&self) -> Option<SharedObject> {
        let version = self
            .owner
            .as_ref()?
            .get("Shared")?
            .get("initial_shared_version")?;
        let initial_shared_version = match version {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => s.parse().ok()?,
            _ => return None,
        };
        Some(SharedObject {
            initial_shared_version,
        })
    }
}

/// `sui_getTransactionBlock` / `sui_executeTransactionBlock` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlock {
    pub digest: String,
    pub effects: Option<Value>,
    pub timestamp_ms: Option<String>,
}

impl TransactionBlock {
    /// `effects.status.status`, or `"unknown"` when absent.
    pub fn status(&self) -> String {
        self.effects
            .as_ref()
            .and_then(|effects| effects.get("status"))
            .and_then(|status| status.get("status"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    }

    pub fn gas_used(&self) -> Option<Value> {
        self.effects.as_ref().and_then(|effects| effects.get("gasUsed")).cloned()
    }
}

// region:    --- Number helpers

/// Sui encodes 64-bit and wider integers as JSON strings; accept both forms.
pub(crate) fn u64_from_str_or_num<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    match Value::deserialize(de)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom("expected unsigned integer")),
        Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("expected integer, got {other}"))),
    }
}

pub(crate) fn u128_from_str_or_num<'de, D: Deserializer<'de>>(de: D) -> Result<u128, D::Error> {
    match Value::deserialize(de)? {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| serde::de::Error::custom("expected unsigned integer")),
        Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("expected integer, got {other}"))),
    }
}

// endregion: --- Number helpers

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coin_page_accepts_string_numbers() {
        let page: CoinPage = serde_json::from_value(json!({
            "data": [{
                "coinType": "0x2::sui::SUI",
                "coinObjectId": "0x01",
                "version": "42",
                "digest": "11111111111111111111111111111111",
                "balance": "1000000000",
                "previousTransaction": "ignored"
            }],
            "nextCursor": null,
            "hasNextPage": false
        }))
        .unwrap();

        assert_eq!(page.data[0].version, 42);
        assert_eq!(page.data[0].balance, 1_000_000_000);
    }

    #[test]
    fn test_shared_owner() {
        let data: ObjectData = serde_json::from_value(json!({
            "objectId": "0x48c9",
            "owner": { "Shared": { "initial_shared_version": 389750322 } }
        }))
        .unwrap();
        assert_eq!(data.shared().unwrap().initial_shared_version, 389_750_322);

        let owned: ObjectData = serde_json::from_value(json!({
            "objectId": "0x1",
            "owner": { "AddressOwner": "0x2" }
        }))
        .unwrap();
        assert!(owned.shared().is_none());
    }

    #[test]
    fn test_transaction_status_fallback() {
        let block: TransactionBlock = serde_json::from_value(json!({
            "digest": "abc",
            "effects": { "status": { "status": "success" }, "gasUsed": { "computationCost": "1000" } },
            "timestampMs": "1700000000000"
        }))
        .unwrap();
        assert_eq!(block.status(), "success");
        assert_eq!(block.gas_used().unwrap()["computationCost"], "1000");

        let bare: TransactionBlock = serde_json::from_value(json!({ "digest": "abc" })).unwrap();
        assert_eq!(bare.status(), "unknown");
    }
}
