mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::json;

use bitcoind_rpc::rpc::{BitcoinRpc, HttpRpcClient, SendRequest};
use bitcoind_rpc::RpcError;

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let auth = args.credentials().wrap_err("resolve RPC credentials")?;

    let mut http = reqwest::Client::builder().tcp_nodelay(true);
    if let Some(secs) = args.timeout_secs {
        http = http.timeout(Duration::from_secs(secs));
    }
    let http = http.build().wrap_err("build HTTP client")?;

    let rpc = HttpRpcClient::with_http_client(http, &args.rpc_addr, auth)
        .wrap_err("configure Bitcoin Core RPC client")?;
    tracing::debug!(addr = %args.rpc_addr, wallet = %args.wallet, "rpc client ready");

    let output = run(&rpc, &args.wallet, args.command)
        .await
        .map_err(|err| eyre!(format_rpc_error(&args.rpc_addr, &err)))?;

    if let Some(value) = output {
        let rendered = serde_json::to_string_pretty(&value).wrap_err("render result")?;
        println!("{rendered}");
    }
    Ok(())
}

/// Execute one subcommand. `None` means the call has no result to print.
async fn run(
    rpc: &dyn BitcoinRpc,
    wallet: &str,
    command: Command,
) -> Result<Option<serde_json::Value>, RpcError> {
    let value = match command {
        Command::CreateWallet { name } => {
            rpc.create_wallet(&name).await?;
            tracing::info!(wallet = %name, "wallet created");
            return Ok(None);
        }
        Command::LoadWallet { name } => {
            rpc.load_wallet(&name).await?;
            return Ok(None);
        }
        Command::UnloadWallet => {
            rpc.unload_wallet(wallet).await?;
            return Ok(None);
        }
        Command::ListWallets => json!(rpc.list_wallets().await?),
        Command::Balance { minconf } => json!(rpc.get_balance(wallet, minconf).await?),
        Command::NewAddress => json!(rpc.get_new_address(wallet).await?),
        Command::ImportPrivKey { priv_key, rescan } => {
            rpc.import_priv_key(&priv_key, wallet, rescan).await?;
            return Ok(None);
        }
        Command::DumpPrivKey { address } => json!(rpc.dump_priv_key(wallet, &address).await?),
        Command::EncryptWallet { passphrase } => {
            rpc.encrypt_wallet(wallet, &passphrase).await?;
            return Ok(None);
        }
        Command::ValidateAddress { address } => json!(rpc.validate_address(&address).await?),
        Command::Peers => json!(rpc.get_peer_info().await?),
        Command::WalletInfo => json!(rpc.get_wallet_info(wallet).await?),
        Command::Send {
            address,
            amount,
            comment,
            comment_to,
            subtract_fee,
        } => {
            let request = SendRequest {
                to_address: address,
                amount,
                comment,
                comment_to,
                subtract_fee_from_amount: subtract_fee,
            };
            json!(rpc.send_to_address(wallet, &request).await?.to_string())
        }
        Command::ListDescriptors { private } => {
            rpc.list_descriptors(wallet, private).await?;
            return Ok(None);
        }
        Command::ChainInfo => json!(rpc.get_blockchain_info().await?),
    };
    Ok(Some(value))
}

fn format_rpc_error(rpc_addr: &str, err: &RpcError) -> String {
    let mut lines = vec![format!("RPC call to `{rpc_addr}` failed: {err}")];

    match err {
        RpcError::Transport(source) if source.is_connect() => lines.push(
            "hint: could not connect; verify bitcoind is running and --rpc-addr is correct"
                .into(),
        ),
        RpcError::Transport(source) if source.is_timeout() => {
            lines.push("hint: the node did not answer in time; raise --timeout-secs".into())
        }
        RpcError::Decode(message) if message.ends_with("body=") => {
            lines.push(
                "hint: empty response body; verify --rpc-user/--rpc-pass or --rpc-cookie-file"
                    .into(),
            )
        }
        RpcError::Server(server) if server.code == -18 => lines.push(
            "hint: wallet not loaded; load it with `load-wallet` or pick one with --wallet".into(),
        ),
        RpcError::Server(server) if server.code == -28 => {
            lines.push("hint: the node is still starting up; retry shortly".into())
        }
        _ => {}
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use bitcoind_rpc::ServerError;

    use super::*;

    #[test]
    fn wallet_not_loaded_gets_hint() {
        let err = RpcError::Server(ServerError {
            code: -18,
            message: "Requested wallet does not exist or is not loaded".into(),
        });
        let message = format_rpc_error("127.0.0.1:8332", &err);
        assert!(message.contains("-18: Requested wallet"));
        assert!(message.contains("hint: wallet not loaded"));
    }

    #[test]
    fn empty_body_points_at_credentials() {
        let err = RpcError::Decode(
            "decode JSON-RPC response: EOF while parsing a value at line 1 column 0; body=".into(),
        );
        let message = format_rpc_error("127.0.0.1:8332", &err);
        assert!(message.contains("--rpc-cookie-file"));
    }

    #[test]
    fn other_errors_have_no_hint() {
        let err = RpcError::Server(ServerError {
            code: -5,
            message: "Invalid address".into(),
        });
        let message = format_rpc_error("127.0.0.1:8332", &err);
        assert!(!message.contains("hint:"));
    }
}
