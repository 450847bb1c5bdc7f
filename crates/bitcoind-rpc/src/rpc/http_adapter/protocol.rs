use crate::error::{RpcError, ServerError};

/// Protocol marker sent with every request. Bitcoin Core answers 1.0
/// requests with both `result` and `error` present.
pub(super) const JSONRPC_VERSION: &str = "1.0";

#[derive(Debug, serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: Option<Vec<serde_json::Value>>,
    pub(super) id: u64,
    pub(super) jsonrpc: &'static str,
}

impl<'a> JsonRpcRequest<'a> {
    pub(super) fn new(method: &'a str, params: Option<Vec<serde_json::Value>>, id: u64) -> Self {
        Self {
            method,
            params,
            id,
            jsonrpc: JSONRPC_VERSION,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) id: Option<serde_json::Value>,
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Decode a raw response body into the envelope. Only a JSON object is
    /// an envelope; arrays and scalars are rejected.
    pub(super) fn from_body(body: &str) -> Result<Self, RpcError> {
        let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            RpcError::Decode(format!("decode JSON-RPC response: {e}; body={body}"))
        })?;
        if !raw.is_object() {
            return Err(RpcError::Decode(format!(
                "JSON-RPC response is not an object; body={body}"
            )));
        }
        serde_json::from_value(raw).map_err(|e| {
            RpcError::Decode(format!("decode JSON-RPC response: {e}; body={body}"))
        })
    }

    /// Unwrap the envelope. A non-null `error` wins regardless of `result`;
    /// an absent `result` is JSON `null`.
    pub(super) fn into_result(self) -> Result<serde_json::Value, RpcError> {
        if let Some(err) = self.error {
            return Err(parse_jsonrpc_error(err));
        }
        Ok(self.result.unwrap_or(serde_json::Value::Null))
    }
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// `{"code": <int>, "message": <string>}` becomes `RpcError::Server`; any
/// other shape is reported as an undecodable response.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcError {
    match serde_json::from_value::<ServerError>(err.clone()) {
        Ok(parsed) => RpcError::Server(parsed),
        Err(_) => RpcError::Decode(format!("non-standard JSON-RPC error: {err}")),
    }
}
