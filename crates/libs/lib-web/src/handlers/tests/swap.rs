//! # Swap Route Tests

use super::*;
use lib_sui::client::TransactionBlock;
use lib_sui::deepbook::testing::{DEEP_SUI_POOL, WALLET};
use serde_json::json;

/// 1 SUI buys 100 DEEP at 0.01.
fn cheap_deep_app() -> Router {
    let venue = FakeVenue::new(sample_pools()).with_book(&[("0.05", "1000")], &[("0.01", "1000")]);
    test_app_with(FakeChain::funded(), venue, RunMode::Production)
}

#[tokio::test]
async fn test_build_swap_with_default_slippage() {
    // Act
    let (status, body) = post_json(
        cheap_deep_app(),
        "/api/swap/build",
        json!({"walletAddress": WALLET, "tokenIn": "SUI", "tokenOut": "DEEP", "amountIn": "1"}),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["poolId"], DEEP_SUI_POOL);
    assert_eq!(body["quote"]["amountIn"], "1");
    assert_eq!(body["quote"]["estimatedAmountOut"], "100");
    assert_eq!(body["quote"]["minAmountOut"], "99");
    assert_eq!(body["transaction"]["estimatedGas"], "50000000");
    let tx_bytes = body["transaction"]["txBytes"].as_str().unwrap();
    assert!(lib_utils::b64_decode(tx_bytes).is_ok());
}

#[tokio::test]
async fn test_build_swap_with_explicit_slippage() {
    let (status, body) = post_json(
        cheap_deep_app(),
        "/api/swap/build",
        json!({
            "walletAddress": WALLET,
            "tokenIn": "sui",
            "tokenOut": "deep",
            "amountIn": "1",
            "slippage": 0.05
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["minAmountOut"], "95");
}

#[tokio::test]
async fn test_build_swap_missing_wallet() {
    let (status, body) = post_json(
        cheap_deep_app(),
        "/api/swap/build",
        json!({"tokenIn": "SUI", "tokenOut": "DEEP", "amountIn": "1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert_eq!(
        body["error"]["message"],
        "Missing required fields: walletAddress, tokenIn, tokenOut, amountIn"
    );
}

#[tokio::test]
async fn test_build_swap_invalid_wallet() {
    let (status, body) = post_json(
        cheap_deep_app(),
        "/api/swap/build",
        json!({"walletAddress": "0xnothex", "tokenIn": "SUI", "tokenOut": "DEEP", "amountIn": "1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_WALLET_ADDRESS");
    assert_eq!(body["error"]["message"], "Invalid wallet address format");
}

#[tokio::test]
async fn test_build_swap_empty_wallet() {
    let venue = FakeVenue::new(sample_pools()).with_book(&[("0.05", "1000")], &[("0.01", "1000")]);
    let app = test_app_with(FakeChain::empty(), venue, RunMode::Production);

    let (status, body) = post_json(
        app,
        "/api/swap/build",
        json!({"walletAddress": WALLET, "tokenIn": "SUI", "tokenOut": "DEEP", "amountIn": "1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");
    assert_eq!(body["error"]["message"], "No SUI coins found in wallet");
}

#[tokio::test]
async fn test_execute_swap() {
    let (status, body) = post_json(
        test_app(),
        "/api/swap/execute",
        json!({"txBytes": "AAAA", "signatures": ["AQID"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["digest"].as_str().unwrap().starts_with("digest-"));
}

#[tokio::test]
async fn test_execute_swap_rejects_non_base64() {
    let (status, body) = post_json(
        test_app(),
        "/api/swap/execute",
        json!({"txBytes": "not base64!", "signatures": ["AQID"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_transaction_status() {
    // Arrange
    let chain = FakeChain::funded().with_transaction(TransactionBlock {
        digest: "5HqDigest".to_string(),
        effects: Some(json!({
            "status": { "status": "failure", "error": "InsufficientGas" },
            "gasUsed": { "computationCost": "1000000" }
        })),
        timestamp_ms: Some("1700000000000".to_string()),
    });
    let app = test_app_with(chain, test_venue(), RunMode::Production);

    // Act
    let (status, body) = get(app, "/api/swap/transaction/5HqDigest").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digest"], "5HqDigest");
    assert_eq!(body["status"], "failure");
    assert_eq!(body["timestamp"], "1700000000000");
    assert_eq!(body["gasUsed"]["computationCost"], "1000000");
}

#[tokio::test]
async fn test_transaction_status_node_down_is_server_error() {
    let chain = FakeChain::funded();
    chain.set_offline(true);
    let app = test_app_with(chain, test_venue(), RunMode::Production);

    let (status, body) = get(app, "/api/swap/transaction/5HqDigest").await;

    assert!(status.is_server_error());
    assert_eq!(body["error"]["code"], "NETWORK_ERROR");
}
