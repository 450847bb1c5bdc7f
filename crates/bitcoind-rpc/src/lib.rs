//! Typed JSON-RPC client for Bitcoin Core wallet and network methods.
//!
//! ```no_run
//! use bitcoind_rpc::rpc::{BitcoinRpc, HttpRpcClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let node = HttpRpcClient::new("127.0.0.1:8332", "user", "pass")?;
//! let balance = node.get_balance("main", 6).await?;
//! println!("{balance} BTC");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rpc;

pub use error::{CoreError, RpcError, ServerError};
pub use rpc::{BitcoinRpc, HttpRpcClient};
