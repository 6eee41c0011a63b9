// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2023-2025 Meridex Systems Pty Ltd. All rights reserved.
//  https://meridex.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! End-to-end session tests against a mock exchange server.

use axum::{Json, Router, http::HeaderMap, routing::get};
use cryptoapi_bitbank::http::query::BitbankPairParams;
use cryptoapi_client::{
    CryptoApiClientError, Exchange, SessionConfig, SessionOptions, create_response_validator,
    create_session,
};
use cryptoapi_gmocoin::http::query::GmoCoinTickerParams;
use serde_json::json;

async fn handle_bitbank_ticker() -> Json<serde_json::Value> {
    Json(json!({
        "success": 1,
        "data": {
            "sell": "3915001",
            "buy": "3915000",
            "high": "3960000",
            "low": "3858000",
            "open": "3880001",
            "last": "3915000",
            "vol": "203.5142",
            "timestamp": 1640000000000i64
        }
    }))
}

async fn handle_bitbank_assets(headers: HeaderMap) -> Json<serde_json::Value> {
    if !headers.contains_key("access-signature") {
        return Json(json!({"success": 0, "data": {"code": 20001}}));
    }
    Json(json!({
        "success": 1,
        "data": {
            "assets": [{
                "asset": "jpy",
                "amount_precision": 4,
                "onhand_amount": "100000.0000",
                "locked_amount": "0.0000",
                "free_amount": "100000.0000",
                "stop_deposit": false,
                "stop_withdrawal": false,
                "withdrawal_fee": null
            }]
        }
    }))
}

async fn handle_gmocoin_ticker() -> Json<serde_json::Value> {
    Json(json!({
        "status": 0,
        "data": [{
            "ask": "5000000",
            "bid": "4999000",
            "high": "5100000",
            "last": "4999500",
            "low": "4900000",
            "symbol": "BTC_JPY",
            "timestamp": "2023-01-01T00:00:00.000Z",
            "volume": "123.456"
        }],
        "responsetime": "2023-01-01T00:00:00.000Z"
    }))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/btc_jpy/ticker", get(handle_bitbank_ticker))
        .route("/v1/user/assets", get(handle_bitbank_assets))
        .route("/v1/ticker", get(handle_gmocoin_ticker));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn fast_retry_config(max_retries: u32) -> SessionConfig {
    SessionConfig {
        request_max_retries: max_retries,
        request_initial_delay_seconds: 0.01,
        request_max_delay: 0.05,
        request_jitter: false,
        connect_timeout: 1.0,
        request_timeout_seconds: 2,
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn test_public_call_through_session() {
    let base_url = spawn_server().await;
    let session = create_session(
        Exchange::Bitbank,
        SessionOptions {
            callbacks: vec![create_response_validator(Exchange::Bitbank)],
            base_url: Some(base_url),
            config: Some(fast_retry_config(1)),
            ..SessionOptions::default()
        },
    )
    .unwrap();

    let ticker = session
        .api()
        .unwrap()
        .as_bitbank()
        .unwrap()
        .ticker(&BitbankPairParams::new("btc_jpy"))
        .await
        .unwrap();

    assert_eq!(ticker.last.to_string(), "3915000");
    assert_eq!(ticker.vol.to_string(), "203.5142");
}

#[tokio::test]
async fn test_signed_call_through_session() {
    let base_url = spawn_server().await;
    let session = create_session(
        Exchange::Bitbank,
        SessionOptions {
            api_key: Some("test-key".into()),
            api_secret: Some("test-secret".into()),
            callbacks: vec![create_response_validator(Exchange::Bitbank)],
            base_url: Some(base_url),
            config: Some(fast_retry_config(1)),
            ..SessionOptions::default()
        },
    )
    .unwrap();

    let assets = session
        .api()
        .unwrap()
        .as_bitbank()
        .unwrap()
        .assets()
        .await
        .unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].asset, "jpy");
}

#[tokio::test]
async fn test_missing_credentials_surface_before_any_traffic() {
    let session = create_session(
        Exchange::Bitbank,
        SessionOptions {
            callbacks: vec![create_response_validator(Exchange::Bitbank)],
            ..SessionOptions::default()
        },
    )
    .unwrap();

    let error = session
        .api()
        .unwrap()
        .as_bitbank()
        .unwrap()
        .assets()
        .await
        .unwrap_err();
    assert!(matches!(error, CryptoApiClientError::MissingCredentials));
}

#[tokio::test]
async fn test_envelope_decomposition_through_session() {
    let base_url = spawn_server().await;
    let session = create_session(
        Exchange::Gmocoin,
        SessionOptions {
            callbacks: vec![create_response_validator(Exchange::Gmocoin)],
            base_url: Some(base_url),
            config: Some(fast_retry_config(1)),
            ..SessionOptions::default()
        },
    )
    .unwrap();

    let tickers = session
        .api()
        .unwrap()
        .as_gmocoin()
        .unwrap()
        .ticker(&GmoCoinTickerParams::for_symbol("BTC_JPY"))
        .await
        .unwrap();

    assert_eq!(tickers.len(), 1);
    assert_eq!(tickers[0].last.to_string(), "4999500");
}

#[tokio::test]
async fn test_transport_failures_exhaust_retry_budget() {
    // Nothing listens on this port: every attempt is a transport error.
    let session = create_session(
        Exchange::Upbit,
        SessionOptions {
            base_url: Some("http://127.0.0.1:9".to_string()),
            config: Some(fast_retry_config(2)),
            ..SessionOptions::default()
        },
    )
    .unwrap();

    let error = session
        .api()
        .unwrap()
        .as_upbit()
        .unwrap()
        .ticker(&cryptoapi_upbit::http::query::UpbitTickerParams::new("KRW-BTC"))
        .await
        .unwrap_err();

    match error {
        CryptoApiClientError::RetryLimitExceeded { max_retries, .. } => {
            assert_eq!(max_retries, 2);
        }
        other => panic!("expected retry exhaustion, got {other}"),
    }
}

#[tokio::test]
async fn test_closed_session_refuses_api_access() {
    let mut session = create_session(Exchange::Upbit, SessionOptions::default()).unwrap();
    session.close().await;

    let error = session.api().unwrap_err();
    assert_eq!(error.to_string(), "Session is already closed");
}
