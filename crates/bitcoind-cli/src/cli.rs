use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bitcoind_rpc::rpc::Credentials;
use bitcoind_rpc::CoreError;

/// bitcoind-cli — call Bitcoin Core wallet and network RPCs and print the
/// decoded result as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Node RPC address as host[:port].
    #[arg(long, default_value = "127.0.0.1:8332", env = "BITCOIND_RPC_ADDR")]
    pub rpc_addr: String,

    /// RPC username. Auth is only sent when both user and password are set.
    #[arg(long, env = "BITCOIND_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "BITCOIND_RPC_PASS", hide_env_values = true)]
    pub rpc_pass: Option<String>,

    /// Bitcoin Core `.cookie` file, used when user/password are not both set.
    #[arg(long, env = "BITCOIND_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Wallet to route wallet calls to (`/wallet/<name>`). Empty means the
    /// node's default wallet.
    #[arg(long, default_value = "", env = "BITCOIND_WALLET")]
    pub wallet: String,

    /// Overall HTTP timeout in seconds. No timeout when omitted.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new wallet.
    CreateWallet { name: String },
    /// Load a wallet from the node's wallet directory.
    LoadWallet { name: String },
    /// Unload the wallet selected with --wallet.
    UnloadWallet,
    /// List loaded wallets.
    ListWallets,
    /// Wallet balance in BTC.
    Balance {
        /// Only count outputs with at least this many confirmations.
        #[arg(long, default_value = "1")]
        minconf: u64,
    },
    /// Generate a new receiving address.
    NewAddress,
    /// Import a WIF private key.
    ImportPrivKey {
        priv_key: String,
        /// Rescan the chain for the key's transactions.
        #[arg(long)]
        rescan: bool,
    },
    /// Reveal the private key for an address.
    DumpPrivKey { address: String },
    /// Encrypt the wallet with a passphrase.
    EncryptWallet { passphrase: String },
    /// Validate an address.
    ValidateAddress { address: String },
    /// Connected peers.
    Peers,
    /// Wallet state.
    WalletInfo,
    /// Send BTC to an address.
    Send {
        address: String,
        amount: f64,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = "")]
        comment_to: String,
        /// Deduct the fee from the sent amount.
        #[arg(long)]
        subtract_fee: bool,
    },
    /// Check that the wallet's descriptors can be listed.
    ListDescriptors {
        /// Include private descriptors.
        #[arg(long)]
        private: bool,
    },
    /// Chain name, height and pruning status.
    ChainInfo,
}

impl Cli {
    /// Resolve credentials: explicit user + password first, then the cookie
    /// file, then no auth.
    pub fn credentials(&self) -> Result<Option<Credentials>, CoreError> {
        let user = self.rpc_user.as_deref().unwrap_or_default();
        let pass = self.rpc_pass.as_deref().unwrap_or_default();
        if let Some(creds) = Credentials::new(user, pass) {
            return Ok(Some(creds));
        }

        match &self.rpc_cookie_file {
            Some(path) => Credentials::from_cookie_file(path).map(Some),
            None => Ok(None),
        }
    }
}
