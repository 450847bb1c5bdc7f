//! Bitcoin Core RPC abstraction layer.
//!
//! Defines the [`BitcoinRpc`] trait covering the wallet and network methods
//! this crate exposes, and provides the HTTP JSON-RPC implementation
//! ([`HttpRpcClient`]).

mod http_adapter;
pub mod types;

pub use http_adapter::{Credentials, Endpoint, HttpRpcClient};
pub use types::{ChainInfo, PeerInfo, SendRequest, ValidateAddress, WalletInfo};

use async_trait::async_trait;
use bitcoin::Txid;

use crate::error::RpcError;

/// Typed Bitcoin Core wallet/network RPC surface.
///
/// Methods taking a `wallet` route the call to `/wallet/<wallet>` when the
/// name is non-empty, and to the node's default wallet otherwise. Every method
/// returns either the decoded result or the first error encountered; a
/// node-reported error is never decoded as a result.
#[async_trait]
pub trait BitcoinRpc: Send + Sync {
    /// Create a legacy (non-descriptor) wallet named `name`.
    async fn create_wallet(&self, name: &str) -> Result<(), RpcError>;

    /// Load a wallet from the node's wallet directory.
    async fn load_wallet(&self, name: &str) -> Result<(), RpcError>;

    async fn unload_wallet(&self, name: &str) -> Result<(), RpcError>;

    /// Names of the currently loaded wallets.
    async fn list_wallets(&self) -> Result<Vec<String>, RpcError>;

    /// Total balance in BTC counting outputs with at least `minconf`
    /// confirmations.
    async fn get_balance(&self, wallet: &str, minconf: u64) -> Result<f64, RpcError>;

    /// New receiving address labelled with the wallet name.
    async fn get_new_address(&self, wallet: &str) -> Result<String, RpcError>;

    /// Add a WIF private key to the wallet, optionally rescanning the chain
    /// for its transactions (which may take a while).
    async fn import_priv_key(
        &self,
        priv_key: &str,
        wallet: &str,
        rescan: bool,
    ) -> Result<(), RpcError>;

    /// WIF private key for `address`.
    async fn dump_priv_key(&self, wallet: &str, address: &str) -> Result<String, RpcError>;

    async fn encrypt_wallet(&self, wallet: &str, passphrase: &str) -> Result<(), RpcError>;

    async fn validate_address(&self, address: &str) -> Result<ValidateAddress, RpcError>;

    /// Data about each connected peer.
    async fn get_peer_info(&self) -> Result<Vec<PeerInfo>, RpcError>;

    async fn get_wallet_info(&self, wallet: &str) -> Result<WalletInfo, RpcError>;

    /// Send funds from `wallet`, returning the id of the new transaction.
    async fn send_to_address(
        &self,
        wallet: &str,
        request: &SendRequest,
    ) -> Result<Txid, RpcError>;

    /// Check that the wallet's descriptors can be listed. The listing itself
    /// is discarded.
    async fn list_descriptors(&self, wallet: &str, private: bool) -> Result<(), RpcError>;

    /// Fetch basic chain info (network, block count, pruning status).
    async fn get_blockchain_info(&self) -> Result<ChainInfo, RpcError>;
}
