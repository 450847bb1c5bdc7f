use std::fmt;

/// Failure of a single RPC call.
///
/// `Transport`, `Decode` and `Server` are kept apart so callers can tell
/// "the node was unreachable" from "the node answered with garbage" from
/// "the node rejected the call". `InvalidParams` is raised before anything
/// is sent.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("RPC transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid RPC response: {0}")]
    Decode(String),

    #[error("RPC server error {0}")]
    Server(#[from] ServerError),

    #[error("invalid RPC parameters: {0}")]
    InvalidParams(String),
}

impl RpcError {
    /// The node-reported error, if this failure came from the node itself.
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Server(err) => Some(err),
            _ => None,
        }
    }
}

/// Error object carried in the `error` field of a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ServerError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServerError {}

/// Errors raised while setting up a client, before any call is made.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_is_code_then_message() {
        let err = ServerError {
            code: -18,
            message: "Requested wallet does not exist or is not loaded".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "-18: Requested wallet does not exist or is not loaded"
        );
    }

    #[test]
    fn server_error_is_reachable_through_rpc_error() {
        let err = RpcError::from(ServerError {
            code: -5,
            message: "Invalid address".to_owned(),
        });
        let inner = err.server_error().expect("must expose server error");
        assert_eq!(inner.code, -5);
        assert!(RpcError::Decode("bad".into()).server_error().is_none());
    }
}
