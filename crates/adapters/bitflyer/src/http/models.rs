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

//! Domain models for bitFlyer REST responses.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use cryptoapi_serialization::{
    datetime::serde_utc,
    decimal::{serde_decimal, serde_decimal_option},
};
use serde::{Deserialize, Serialize};

use crate::common::enums::{
    BitflyerBoardState, BitflyerChildOrderState, BitflyerChildOrderType, BitflyerHealth,
    BitflyerSide, BitflyerTimeInForce,
};

/// A tradable market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerMarket {
    pub product_code: String,
    pub market_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Snapshot ticker for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerTicker {
    pub product_code: String,
    pub state: String,
    #[serde(with = "serde_utc")]
    pub timestamp: DateTime<Utc>,
    pub tick_id: i64,
    #[serde(with = "serde_decimal")]
    pub best_bid: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub best_ask: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub best_bid_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub best_ask_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub total_bid_depth: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub total_ask_depth: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub market_bid_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub market_ask_size: BigDecimal,
    /// Last traded price.
    #[serde(with = "serde_decimal")]
    pub ltp: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub volume: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub volume_by_product: BigDecimal,
}

/// One price level of the order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerBoardLevel {
    #[serde(with = "serde_decimal")]
    pub price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub size: BigDecimal,
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerBoard {
    #[serde(with = "serde_decimal")]
    pub mid_price: BigDecimal,
    pub bids: Vec<BitflyerBoardLevel>,
    pub asks: Vec<BitflyerBoardLevel>,
}

/// Exchange and order book health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerBoardHealth {
    pub health: BitflyerHealth,
    pub state: BitflyerBoardState,
}

/// One currency balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerBalance {
    pub currency_code: String,
    #[serde(with = "serde_decimal")]
    pub amount: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub available: BigDecimal,
}

/// Acknowledgement of a newly accepted child order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerChildOrderAcceptance {
    pub child_order_acceptance_id: String,
}

/// A child order as returned by `/v1/me/getchildorders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitflyerChildOrder {
    pub id: i64,
    pub child_order_id: String,
    pub product_code: String,
    pub side: BitflyerSide,
    pub child_order_type: BitflyerChildOrderType,
    #[serde(default, with = "serde_decimal_option")]
    pub price: Option<BigDecimal>,
    #[serde(with = "serde_decimal")]
    pub average_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub size: BigDecimal,
    pub child_order_state: BitflyerChildOrderState,
    #[serde(with = "serde_utc")]
    pub expire_date: DateTime<Utc>,
    #[serde(with = "serde_utc")]
    pub child_order_date: DateTime<Utc>,
    pub child_order_acceptance_id: String,
    #[serde(with = "serde_decimal")]
    pub outstanding_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub cancel_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub executed_size: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub total_commission: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<BitflyerTimeInForce>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use cryptoapi_serialization::decimal::parse_decimal_json;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_ticker_preserves_decimal_precision() {
        let json = r#"{
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

        let ticker: BitflyerTicker = parse_decimal_json(json).unwrap();
        assert_eq!(ticker.product_code, "BTC_JPY");
        assert_eq!(ticker.best_bid.to_string(), "30000");
        assert_eq!(ticker.best_bid_size.to_string(), "0.1");
        assert_eq!(ticker.volume.to_string(), "16819.26");
        assert_eq!(ticker.timestamp.timestamp_subsec_millis(), 970);
    }

    #[rstest]
    fn test_child_order_parses_enums_and_decimals() {
        let json = r#"[{
            "id": 138398,
            "child_order_id": "JOR20150707-084555-022523",
            "product_code": "BTC_JPY",
            "side": "BUY",
            "child_order_type": "LIMIT",
            "price": 30000,
            "average_price": 30000,
            "size": 0.1,
            "child_order_state": "COMPLETED",
            "expire_date": "2015-07-14T07:25:52",
            "child_order_date": "2015-07-07T08:45:53",
            "child_order_acceptance_id": "JRF20150707-084552-031927",
            "outstanding_size": 0,
            "cancel_size": 0,
            "executed_size": 0.1,
            "total_commission": 0,
            "time_in_force": "GTC"
        }]"#;

        let orders: Vec<BitflyerChildOrder> = parse_decimal_json(json).unwrap();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.side, BitflyerSide::Buy);
        assert_eq!(order.child_order_state, BitflyerChildOrderState::Completed);
        assert_eq!(order.price.as_ref().unwrap().to_string(), "30000");
        assert_eq!(order.executed_size.to_string(), "0.1");
        assert_eq!(order.time_in_force, Some(BitflyerTimeInForce::GTC));
    }

    #[rstest]
    fn test_balance_list() {
        let json = r#"[
            {"currency_code": "JPY", "amount": 1024078, "available": 508000},
            {"currency_code": "BTC", "amount": 10.24, "available": 4.12}
        ]"#;
        let balances: Vec<BitflyerBalance> = parse_decimal_json(json).unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].amount.to_string(), "10.24");
    }

    #[rstest]
    fn test_board_health() {
        let json = r#"{"health": "NORMAL", "state": "RUNNING"}"#;
        let health: BitflyerBoardHealth = parse_decimal_json(json).unwrap();
        assert_eq!(health.health, BitflyerHealth::Normal);
        assert_eq!(health.state, BitflyerBoardState::Running);
    }
}
