//! Result shapes returned by the typed RPC methods.
//!
//! Field names follow Bitcoin Core's JSON keys. Fields that older or newer
//! node versions leave out are `Option` (or defaulted) so one client can talk
//! to a range of node versions.

use bitcoin::BlockHash;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

// ==============================================================================
// Address Validation
// ==============================================================================

/// Response to `validateaddress`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ValidateAddress {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "ismine", default)]
    pub is_mine: bool,
    #[serde(rename = "isscript", default)]
    pub is_script: bool,
    #[serde(rename = "pubkey", default)]
    pub pub_key: String,
    #[serde(rename = "iscompressed", default)]
    pub is_compressed: bool,
    #[serde(default)]
    pub account: String,
}

// ==============================================================================
// Peers
// ==============================================================================

/// One entry of `getpeerinfo`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PeerInfo {
    pub id: u64,
    pub addr: String,
    #[serde(rename = "addrlocal", default)]
    pub addr_local: Option<String>,
    #[serde(default)]
    pub services: String,
    #[serde(rename = "relaytxes", default)]
    pub relay_txes: bool,
    #[serde(rename = "lastsend", default)]
    pub last_send: u64,
    #[serde(rename = "lastrecv", default)]
    pub last_recv: u64,
    #[serde(rename = "bytessent", default)]
    pub bytes_sent: u64,
    #[serde(rename = "bytesrecv", default)]
    pub bytes_recv: u64,
    #[serde(rename = "conntime", default)]
    pub conn_time: u64,
    #[serde(rename = "timeoffset", default)]
    pub time_offset: i64,
    #[serde(rename = "pingtime", default)]
    pub ping_time: Option<f64>,
    #[serde(rename = "minping", default)]
    pub min_ping: Option<f64>,
    #[serde(default)]
    pub version: u32,
    #[serde(rename = "subver", default)]
    pub sub_ver: String,
    #[serde(default)]
    pub inbound: bool,
    #[serde(rename = "startingheight", default)]
    pub starting_height: Option<i64>,
    #[serde(default)]
    pub synced_headers: Option<i64>,
    #[serde(default)]
    pub synced_blocks: Option<i64>,
    #[serde(default)]
    pub connection_type: Option<String>,
}

// ==============================================================================
// Wallet State
// ==============================================================================

/// Response to `getwalletinfo`.
///
/// `unlocked_until` is only present for encrypted wallets; the balance
/// fields were dropped in recent node releases.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WalletInfo {
    #[serde(rename = "walletname")]
    pub wallet_name: String,
    #[serde(rename = "walletversion")]
    pub wallet_version: u64,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub unconfirmed_balance: Option<f64>,
    #[serde(default)]
    pub immature_balance: Option<f64>,
    #[serde(rename = "txcount")]
    pub tx_count: u64,
    #[serde(rename = "keypoololdest", default)]
    pub keypool_oldest: Option<u64>,
    #[serde(rename = "keypoolsize", default)]
    pub keypool_size: Option<u64>,
    #[serde(default)]
    pub keypoolsize_hd_internal: Option<u64>,
    #[serde(default)]
    pub unlocked_until: Option<u64>,
    #[serde(rename = "paytxfee", default)]
    pub pay_tx_fee: Option<f64>,
    #[serde(rename = "hdseedid", default)]
    pub hd_seed_id: Option<String>,
    #[serde(default)]
    pub private_keys_enabled: Option<bool>,
    #[serde(default)]
    pub avoid_reuse: Option<bool>,
    #[serde(default)]
    pub descriptors: Option<bool>,
}

// ==============================================================================
// Chain Info
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    pub pruned: bool,
}

// ==============================================================================
// Sending
// ==============================================================================

/// Arguments for `sendtoaddress`.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub to_address: String,
    /// Amount in BTC.
    pub amount: f64,
    pub comment: String,
    pub comment_to: String,
    pub subtract_fee_from_amount: bool,
}

impl SendRequest {
    pub fn new(to_address: impl Into<String>, amount: f64) -> Self {
        Self {
            to_address: to_address.into(),
            amount,
            comment: String::new(),
            comment_to: String::new(),
            subtract_fee_from_amount: false,
        }
    }

    /// Positional params for `sendtoaddress`. A NaN or infinite amount
    /// would serialize as `null`, so it is rejected here.
    pub(crate) fn to_params(&self) -> Result<Vec<serde_json::Value>, RpcError> {
        if !self.amount.is_finite() {
            return Err(RpcError::InvalidParams(format!(
                "sendtoaddress amount must be finite, got {}",
                self.amount
            )));
        }
        Ok(vec![
            serde_json::json!(self.to_address),
            serde_json::json!(self.amount),
            serde_json::json!(self.comment),
            serde_json::json!(self.comment_to),
            serde_json::json!(self.subtract_fee_from_amount),
        ])
    }
}
