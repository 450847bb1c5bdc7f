use std::env;
use std::sync::Once;

use bitcoind_rpc::rpc::{BitcoinRpc, HttpRpcClient, SendRequest};
use bitcoind_rpc::RpcError;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bitcoind_rpc=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires local regtest bitcoind with funds in the default wallet"]
async fn regtest_wallet_round_trip() {
    init_tracing();

    let rpc_addr =
        env::var("BITCOIND_TEST_RPC_ADDR").expect("BITCOIND_TEST_RPC_ADDR must be set");
    let rpc_user =
        env::var("BITCOIND_TEST_RPC_USER").expect("BITCOIND_TEST_RPC_USER must be set");
    let rpc_pass =
        env::var("BITCOIND_TEST_RPC_PASS").expect("BITCOIND_TEST_RPC_PASS must be set");
    let funded_wallet = env::var("BITCOIND_TEST_WALLET").unwrap_or_default();

    let rpc = HttpRpcClient::new(&rpc_addr, &rpc_user, &rpc_pass).expect("rpc client must build");

    eprintln!("[itest] checking get_blockchain_info against {rpc_addr}");
    let info = rpc
        .get_blockchain_info()
        .await
        .expect("regtest get_blockchain_info must succeed");
    assert_eq!(info.chain, "regtest");

    let scratch = format!(
        "itest-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time must be after unix epoch")
            .as_secs()
    );
    eprintln!("[itest] creating wallet {scratch}");
    rpc.create_wallet(&scratch)
        .await
        .expect("createwallet must succeed for a fresh name");

    let wallets = rpc.list_wallets().await.expect("listwallets must succeed");
    assert!(wallets.contains(&scratch), "new wallet must be loaded");

    let wallet_info = rpc
        .get_wallet_info(&scratch)
        .await
        .expect("getwalletinfo must succeed");
    assert_eq!(wallet_info.wallet_name, scratch);

    let address = rpc
        .get_new_address(&scratch)
        .await
        .expect("getnewaddress must succeed");
    let validated = rpc
        .validate_address(&address)
        .await
        .expect("validateaddress must succeed");
    assert!(validated.is_valid);
    assert_eq!(validated.address, address);

    let balance = rpc
        .get_balance(&scratch, 0)
        .await
        .expect("getbalance must succeed");
    assert_eq!(balance, 0.0, "fresh wallet must be empty");

    eprintln!("[itest] sending 0.1 BTC from the funded wallet");
    let txid = rpc
        .send_to_address(&funded_wallet, &SendRequest::new(address.clone(), 0.1))
        .await
        .expect("sendtoaddress must succeed from the funded wallet");
    eprintln!("[itest] sent {txid}");

    let balance = rpc
        .get_balance(&scratch, 0)
        .await
        .expect("getbalance must succeed");
    assert!(
        (balance - 0.1).abs() < 1e-9,
        "unconfirmed receive must count at minconf 0"
    );

    let err = rpc
        .get_balance("no-such-wallet", 0)
        .await
        .expect_err("unknown wallet must be rejected by the node");
    assert!(matches!(err, RpcError::Server(ref e) if e.code == -18), "got {err:?}");

    rpc.unload_wallet(&scratch)
        .await
        .expect("unloadwallet must succeed");
    eprintln!("[itest] integration test completed");
}
