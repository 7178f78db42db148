//! Serde adapter writing `U256` amounts as decimal strings ("500000000000000000").

use alloy::primitives::U256;
use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = String::deserialize(deserializer)?;
    U256::from_str_radix(raw.trim(), 10).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Amount {
        #[serde(with = "super")]
        wei: U256,
    }

    #[test]
    fn writes_decimal_string() {
        let json = serde_json::to_string(&Amount {
            wei: U256::from(250_000_000_000_000_000u64),
        })
        .unwrap();
        assert_eq!(json, r#"{"wei":"250000000000000000"}"#);
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wei, U256::from(250_000_000_000_000_000u64));
    }
}
