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

//! Integration tests for the bitFlyer HTTP client using a mock server.

use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use cryptoapi_bitflyer::http::{
    client::BitflyerHttpClient,
    query::{BitflyerChildOrdersParamsBuilder, BitflyerProductParams},
    validator::BitflyerResponseValidator,
};
use cryptoapi_network::{
    callback::RequestCallback,
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::client::HttpClient,
    ratelimit::{UrlPattern, local::UrlPatternRateLimiter},
    retry::RetryConfig,
};
use serde_json::json;

const TICKER_BODY: &str = r#"{
    "product_code": "BTC_JPY",
    "state": "RUNNING",
    "timestamp": "2015-07-08T02:50:59.97",
    "tick_id": 3579,
    "best_bid": 30000,
    "best_ask": 36640,
    "best_bid_size": 0.1,
    "best_ask_size": 5,
    "total_bid_depth": 15.13,
    "total_ask_depth": 20,
    "market_bid_size": 0,
    "market_ask_size": 0,
    "ltp": 31690,
    "volume": 16819.26,
    "volume_by_product": 6819.26
}"#;

async fn handle_ticker(Query(params): Query<std::collections::HashMap<String, String>>) -> Response {
    if params.get("product_code").map(String::as_str) == Some("BTC_JPY") {
        (StatusCode::OK, TICKER_BODY.to_string()).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": -156, "error_message": "Invalid product", "data": null})),
        )
            .into_response()
    }
}

async fn handle_get_balance(headers: HeaderMap) -> Response {
    let authenticated = headers.contains_key("access-key")
        && headers.contains_key("access-sign")
        && headers.contains_key("access-timestamp");
    if !authenticated {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": -500, "error_message": "Key not found", "data": null})),
        )
            .into_response();
    }
    Json(json!([
        {"currency_code": "JPY", "amount": 1024078, "available": 508000},
        {"currency_code": "BTC", "amount": 10.24, "available": 4.12}
    ]))
    .into_response()
}

async fn handle_get_child_orders(headers: HeaderMap) -> Response {
    if !headers.contains_key("access-sign") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": -500, "error_message": "Key not found", "data": null})),
        )
            .into_response();
    }
    Json(json!([])).into_response()
}

async fn handle_send_child_order(headers: HeaderMap, body: String) -> Response {
    if !headers.contains_key("access-sign") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": -500, "error_message": "Key not found", "data": null})),
        )
            .into_response();
    }
    // The signed body must be the compact insertion-ordered JSON.
    assert!(body.starts_with(r#"{"product_code":"#), "body was: {body}");
    Json(json!({"child_order_acceptance_id": "JRF20150707-050237-639234"})).into_response()
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/v1/getticker", get(handle_ticker))
        .route("/v1/me/getbalance", get(handle_get_balance))
        .route("/v1/me/getchildorders", get(handle_get_child_orders))
        .route("/v1/me/sendchildorder", post(handle_send_child_order));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn pipeline(callbacks: Vec<Arc<dyn RequestCallback>>) -> Arc<HttpClient> {
    let retry = RetryConfig {
        max_retries: 1,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(100),
        backoff_factor: 2.0,
        jitter: false,
    };
    Arc::new(HttpClient::new(reqwest::Client::new(), SecretHeaders::new(), callbacks, retry).unwrap())
}

fn client_for(base_url: &str, callbacks: Vec<Arc<dyn RequestCallback>>) -> BitflyerHttpClient {
    BitflyerHttpClient::new(
        pipeline(callbacks),
        Some(base_url.to_string()),
        Some("test-api-key".to_string()),
        Some("test-api-secret".to_string()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_public_ticker_round_trip() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, vec![Arc::new(BitflyerResponseValidator::new())]);

    let ticker = client
        .ticker(&BitflyerProductParams::new("BTC_JPY"))
        .await
        .unwrap();

    assert_eq!(ticker.product_code, "BTC_JPY");
    assert_eq!(ticker.volume.to_string(), "16819.26");
    assert_eq!(ticker.best_bid_size.to_string(), "0.1");
}

#[tokio::test]
async fn test_validator_converts_error_envelope() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, vec![Arc::new(BitflyerResponseValidator::new())]);

    let error = client
        .ticker(&BitflyerProductParams::new("DOGE_JPY"))
        .await
        .unwrap_err();

    let CryptoApiClientError::Exchange(error) = error else {
        panic!("expected exchange error, got {error}");
    };
    assert_eq!(error.http_status_code, Some(400));
    assert_eq!(error.api_status_code_1.as_deref(), Some("-156"));
    assert_eq!(error.api_error_message_1.as_deref(), Some("Invalid product"));
}

#[tokio::test]
async fn test_signed_get_sends_auth_headers() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, vec![Arc::new(BitflyerResponseValidator::new())]);

    let balances = client.get_balance().await.unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[1].currency_code, "BTC");
    assert_eq!(balances[1].available.to_string(), "4.12");
}

#[tokio::test]
async fn test_signed_get_with_params() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, vec![Arc::new(BitflyerResponseValidator::new())]);

    let params = BitflyerChildOrdersParamsBuilder::default()
        .product_code("BTC_JPY")
        .count(3)
        .build();
    let orders = client.get_child_orders(&params).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_signed_post_sends_compact_body() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, vec![Arc::new(BitflyerResponseValidator::new())]);

    let params = cryptoapi_bitflyer::http::query::BitflyerSendChildOrderParams {
        product_code: "BTC_JPY".to_string(),
        child_order_type: cryptoapi_bitflyer::common::enums::BitflyerChildOrderType::Limit,
        side: cryptoapi_bitflyer::common::enums::BitflyerSide::Buy,
        price: Some(serde_json::Number::from(30000u32)),
        size: serde_json::Number::from_f64(0.001).unwrap(),
        minute_to_expire: None,
        time_in_force: None,
    };

    let acceptance = client.send_child_order(&params).await.unwrap();
    assert_eq!(
        acceptance.child_order_acceptance_id,
        "JRF20150707-050237-639234"
    );
}

#[tokio::test]
async fn test_missing_credentials_is_an_error() {
    let base_url = spawn_server().await;
    let client = BitflyerHttpClient::new(
        pipeline(Vec::new()),
        Some(base_url),
        None,
        None,
    )
    .unwrap();

    let error = client.get_balance().await.unwrap_err();
    assert!(matches!(error, CryptoApiClientError::MissingCredentials));
}

#[tokio::test]
async fn test_rate_limiter_trips_after_budget() {
    let base_url = spawn_server().await;
    let limiter = Arc::new(UrlPatternRateLimiter::new(
        vec![UrlPattern::literal("/v1/getticker")],
        5,
        60,
        Some("TICKER".to_string()),
        None,
    ));
    let client = client_for(
        &base_url,
        vec![limiter.clone(), Arc::new(BitflyerResponseValidator::new())],
    );

    let params = BitflyerProductParams::new("BTC_JPY");
    for _ in 0..5 {
        client.ticker(&params).await.unwrap();
    }

    let error = client.ticker(&params).await.unwrap_err();
    assert!(matches!(error, CryptoApiClientError::RateLimitApproaching(_)));
    assert!(error.to_string().contains("5/5"));
    assert!(limiter.is_limit_exceeded());
}
