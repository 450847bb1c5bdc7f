use serde::de::DeserializeOwned;

use crate::error::RpcError;

/// Decode a raw `result` payload into the shape `method` is known to return.
pub(super) fn decode_result<T: DeserializeOwned>(
    method: &str,
    raw: serde_json::Value,
) -> Result<T, RpcError> {
    serde_json::from_value(raw)
        .map_err(|e| RpcError::Decode(format!("invalid {method} result: {e}")))
}

/// Parse a BTC amount that the node may encode either as a JSON number or as
/// a numeric string (`"2.50000000"`).
pub(super) fn parse_btc_float(method: &str, raw: &serde_json::Value) -> Result<f64, RpcError> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| {
            RpcError::Decode(format!("invalid {method} result: expected amount, got {raw}"))
        })
}

/// Check that a result we do not keep still has the expected JSON object form.
pub(super) fn expect_object(method: &str, raw: &serde_json::Value) -> Result<(), RpcError> {
    if raw.is_object() {
        Ok(())
    } else {
        Err(RpcError::Decode(format!(
            "invalid {method} result: expected object, got {raw}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_btc_float_string() {
        let amount = parse_btc_float("getbalance", &json!("2.50000000")).expect("should parse");
        assert_eq!(amount, 2.5);
    }

    #[test]
    fn parse_btc_float_number() {
        let amount = parse_btc_float("getbalance", &json!(1.5)).expect("should parse");
        assert_eq!(amount, 1.5);
    }

    #[test]
    fn parse_btc_float_zero_integer() {
        let amount = parse_btc_float("getbalance", &json!(0)).expect("should parse");
        assert_eq!(amount, 0.0);
    }

    #[test]
    fn parse_btc_float_rejects_non_numeric() {
        assert!(parse_btc_float("getbalance", &json!("lots")).is_err());
        assert!(parse_btc_float("getbalance", &json!("NaN")).is_err());
        assert!(parse_btc_float("getbalance", &json!(true)).is_err());
        assert!(parse_btc_float("getbalance", &serde_json::Value::Null).is_err());
    }

    #[test]
    fn decode_result_reports_method_on_mismatch() {
        let err = decode_result::<String>("getnewaddress", json!(42)).expect_err("must fail");
        assert!(matches!(err, RpcError::Decode(ref msg) if msg.contains("getnewaddress")));
    }

    #[test]
    fn expect_object_accepts_only_objects() {
        assert!(expect_object("listdescriptors", &json!({"descriptors": []})).is_ok());
        assert!(expect_object("listdescriptors", &json!([])).is_err());
    }
}
