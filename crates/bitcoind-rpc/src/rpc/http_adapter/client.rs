use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use bitcoin::Txid;
use reqwest::header;
use serde_json::json;
use tracing::{debug, trace, warn};

use crate::error::{CoreError, RpcError};

use super::super::types::{ChainInfo, PeerInfo, SendRequest, ValidateAddress, WalletInfo};
use super::super::BitcoinRpc;
use super::connection::{Credentials, Endpoint};
use super::parsing::{decode_result, expect_object, parse_btc_float};
use super::protocol::{JsonRpcRequest, JsonRpcResponse};

const CONTENT_TYPE_JSON_UTF8: &str = "application/json;charset=utf-8";
const ACCEPT_JSON: &str = "application/json";

/// Bitcoin Core JSON-RPC client over HTTP.
///
/// One request per call, no retries, no batching. The handle is `Send + Sync`
/// and can be shared between tasks; the only per-call state is the atomic
/// request-id counter.
pub struct HttpRpcClient {
    client: reqwest::Client,
    endpoint: Endpoint,
    auth: Option<Credentials>,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a client for `http://<addr>` with its own HTTP transport.
    ///
    /// Basic auth is sent only when both `user` and `pass` are non-empty.
    /// No connection is made until the first call.
    pub fn new(addr: &str, user: &str, pass: &str) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(RpcError::Transport)?;
        Self::with_http_client(client, addr, Credentials::new(user, pass))
    }

    /// Create a client that sends through a caller-owned `reqwest::Client`,
    /// e.g. one configured with timeouts or a proxy.
    pub fn with_http_client(
        client: reqwest::Client,
        addr: &str,
        auth: Option<Credentials>,
    ) -> Result<Self, CoreError> {
        let endpoint = Endpoint::parse(addr)?;
        Ok(Self {
            client,
            endpoint,
            auth,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Issue one JSON-RPC call and unwrap its envelope.
    ///
    /// `wallet` selects the `/wallet/<name>` route when non-empty. `params`
    /// is sent as JSON `null` when `None`. The HTTP status is not inspected:
    /// Bitcoin Core reports RPC failures in the body, often with a non-2xx
    /// status, so the body is always parsed.
    pub async fn call(
        &self,
        wallet: &str,
        method: &str,
        params: Option<Vec<serde_json::Value>>,
    ) -> Result<serde_json::Value, RpcError> {
        self.send_request(wallet, method, params).await?.into_result()
    }

    async fn send_request(
        &self,
        wallet: &str,
        method: &str,
        params: Option<Vec<serde_json::Value>>,
    ) -> Result<JsonRpcResponse, RpcError> {
        let id = self.next_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.wallet = wallet,
            rpc.params = params.as_ref().map_or(0, Vec::len),
            "rpc call"
        );
        let req = JsonRpcRequest::new(method, params, id);

        let mut builder = self
            .client
            .post(self.endpoint.url_for(wallet))
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON_UTF8)
            .header(header::ACCEPT, ACCEPT_JSON)
            .json(&req);
        if let Some(ref auth) = self.auth {
            builder = builder.basic_auth(auth.user(), Some(auth.pass()));
        }

        let response = builder.send().await.map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        let decoded = JsonRpcResponse::from_body(&body).inspect_err(|err| {
            if !status.is_success() {
                warn!(
                    rpc.id = id,
                    rpc.method = method,
                    %status,
                    error = %err,
                    "undecodable rpc response"
                );
            }
        })?;
        if decoded.id.as_ref().map_or(true, |response_id| *response_id != id) {
            debug!(
                rpc.id = id,
                rpc.method = method,
                response_id = ?decoded.id,
                "rpc response id mismatch"
            );
        }
        Ok(decoded)
    }

    async fn call_unit(
        &self,
        wallet: &str,
        method: &str,
        params: Option<Vec<serde_json::Value>>,
    ) -> Result<(), RpcError> {
        self.call(wallet, method, params).await.map(|_| ())
    }
}

#[async_trait]
impl BitcoinRpc for HttpRpcClient {
    async fn create_wallet(&self, name: &str) -> Result<(), RpcError> {
        // name, disable_private_keys, blank, passphrase, avoid_reuse, descriptors
        let params = vec![
            json!(name),
            json!(false),
            json!(false),
            json!(""),
            json!(false),
            json!(false),
        ];
        self.call_unit("", "createwallet", Some(params)).await
    }

    async fn load_wallet(&self, name: &str) -> Result<(), RpcError> {
        self.call_unit("", "loadwallet", Some(vec![json!(name)])).await
    }

    async fn unload_wallet(&self, name: &str) -> Result<(), RpcError> {
        self.call_unit(name, "unloadwallet", None).await
    }

    async fn list_wallets(&self) -> Result<Vec<String>, RpcError> {
        let raw = self.call("", "listwallets", None).await?;
        decode_result("listwallets", raw)
    }

    async fn get_balance(&self, wallet: &str, minconf: u64) -> Result<f64, RpcError> {
        let raw = self
            .call(wallet, "getbalance", Some(vec![json!("*"), json!(minconf)]))
            .await?;
        parse_btc_float("getbalance", &raw)
    }

    async fn get_new_address(&self, wallet: &str) -> Result<String, RpcError> {
        let raw = self
            .call(wallet, "getnewaddress", Some(vec![json!(wallet)]))
            .await?;
        decode_result("getnewaddress", raw)
    }

    async fn import_priv_key(
        &self,
        priv_key: &str,
        wallet: &str,
        rescan: bool,
    ) -> Result<(), RpcError> {
        let params = vec![json!(priv_key), json!(wallet), json!(rescan)];
        self.call_unit(wallet, "importprivkey", Some(params)).await
    }

    async fn dump_priv_key(&self, wallet: &str, address: &str) -> Result<String, RpcError> {
        let raw = self
            .call(wallet, "dumpprivkey", Some(vec![json!(address)]))
            .await?;
        decode_result("dumpprivkey", raw)
    }

    async fn encrypt_wallet(&self, wallet: &str, passphrase: &str) -> Result<(), RpcError> {
        self.call_unit(wallet, "encryptwallet", Some(vec![json!(passphrase)])).await
    }

    async fn validate_address(&self, address: &str) -> Result<ValidateAddress, RpcError> {
        let raw = self
            .call("", "validateaddress", Some(vec![json!(address)]))
            .await?;
        decode_result("validateaddress", raw)
    }

    async fn get_peer_info(&self) -> Result<Vec<PeerInfo>, RpcError> {
        let raw = self.call("", "getpeerinfo", None).await?;
        decode_result("getpeerinfo", raw)
    }

    async fn get_wallet_info(&self, wallet: &str) -> Result<WalletInfo, RpcError> {
        let raw = self.call(wallet, "getwalletinfo", None).await?;
        decode_result("getwalletinfo", raw)
    }

    async fn send_to_address(
        &self,
        wallet: &str,
        request: &SendRequest,
    ) -> Result<Txid, RpcError> {
        let raw = self
            .call(wallet, "sendtoaddress", Some(request.to_params()?))
            .await?;
        decode_result("sendtoaddress", raw)
    }

    async fn list_descriptors(&self, wallet: &str, private: bool) -> Result<(), RpcError> {
        let raw = self
            .call(wallet, "listdescriptors", Some(vec![json!(private)]))
            .await?;
        expect_object("listdescriptors", &raw)
    }

    async fn get_blockchain_info(&self) -> Result<ChainInfo, RpcError> {
        let raw = self.call("", "getblockchaininfo", None).await?;
        decode_result("getblockchaininfo", raw)
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique_per_client() {
        let client = HttpRpcClient::new("127.0.0.1:8332", "", "").expect("client must build");
        let first = client.next_request_id();
        let second = client.next_request_id();
        assert_ne!(first, second);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn new_suppresses_auth_for_partial_credentials() {
        let client = HttpRpcClient::new("127.0.0.1:8332", "alice", "").expect("client must build");
        assert!(client.auth.is_none());

        let client =
            HttpRpcClient::new("127.0.0.1:8332", "alice", "secret").expect("client must build");
        assert_eq!(client.auth.as_ref().map(Credentials::user), Some("alice"));
    }

    #[test]
    fn new_rejects_invalid_address() {
        let err = HttpRpcClient::new("http://127.0.0.1:8332", "", "").err();
        assert!(matches!(err, Some(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn client_handle_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpRpcClient>();
    }
}
