//! Native JSON-RPC client for Bitcoin Core compatible endpoints.
//!
//! Implements [`BitcoinRpc`](super::BitcoinRpc) over JSON-RPC 1.0 using
//! `reqwest`, with optional basic auth and per-wallet URL routing.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::HttpRpcClient;
pub use connection::{Credentials, Endpoint};
