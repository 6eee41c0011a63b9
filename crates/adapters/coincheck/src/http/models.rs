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

//! Domain models for Coincheck REST responses.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use cryptoapi_serialization::{
    datetime::serde_utc,
    decimal::{serde_decimal, serde_decimal_option},
};
use serde::{Deserialize, Serialize};

/// Public ticker (numbers come as JSON numeric literals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoincheckTicker {
    #[serde(with = "serde_decimal")]
    pub last: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub bid: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub ask: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub high: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub low: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub volume: BigDecimal,
    /// Unix seconds of the snapshot.
    pub timestamp: i64,
}

/// One `[rate, amount]` order book level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoincheckOrderBookLevel(
    #[serde(with = "serde_decimal")] pub BigDecimal,
    #[serde(with = "serde_decimal")] pub BigDecimal,
);

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoincheckOrderBook {
    pub asks: Vec<CoincheckOrderBookLevel>,
    pub bids: Vec<CoincheckOrderBookLevel>,
}

/// One currency balance assembled from the flat balance payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CoincheckBalance {
    pub currency: String,
    pub available: BigDecimal,
    pub reserved: BigDecimal,
}

/// An open (unsettled) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoincheckUnsettledOrder {
    pub id: i64,
    pub order_type: String,
    #[serde(default, with = "serde_decimal_option")]
    pub rate: Option<BigDecimal>,
    pub pair: String,
    #[serde(default, with = "serde_decimal_option")]
    pub pending_amount: Option<BigDecimal>,
    #[serde(default, with = "serde_decimal_option")]
    pub pending_market_buy_amount: Option<BigDecimal>,
    #[serde(default, with = "serde_decimal_option")]
    pub stop_loss_rate: Option<BigDecimal>,
    #[serde(with = "serde_utc")]
    pub created_at: DateTime<Utc>,
}

/// The payload of `/api/exchange/orders/opens` once the envelope flag is
/// stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoincheckUnsettledOrders {
    pub orders: Vec<CoincheckUnsettledOrder>,
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
    fn test_ticker_numeric_literals() {
        let json = r#"{
            "last": 27390,
            "bid": 26900,
            "ask": 27390,
            "high": 27659,
            "low": 26400,
            "volume": 50.29627103,
            "timestamp": 1423377841
        }"#;

        let ticker: CoincheckTicker = parse_decimal_json(json).unwrap();
        assert_eq!(ticker.last.to_string(), "27390");
        assert_eq!(ticker.volume.to_string(), "50.29627103");
    }

    #[rstest]
    fn test_order_book_levels() {
        let json = r#"{
            "asks": [["27330", "2.25"], ["27340", "0.45"]],
            "bids": [["27240", "1.1543"]]
        }"#;

        let book: CoincheckOrderBook = parse_decimal_json(json).unwrap();
        assert_eq!(book.asks.len(), 2);
        assert_eq!(book.asks[0].0.to_string(), "27330");
        assert_eq!(book.bids[0].1.to_string(), "1.1543");
    }

    #[rstest]
    fn test_unsettled_orders() {
        let json = r#"{
            "orders": [
                {
                    "id": 202835,
                    "order_type": "buy",
                    "rate": 26890,
                    "pair": "btc_jpy",
                    "pending_amount": "0.5527",
                    "pending_market_buy_amount": null,
                    "stop_loss_rate": null,
                    "created_at": "2015-01-10T05:55:38.000Z"
                }
            ]
        }"#;

        let orders: CoincheckUnsettledOrders = parse_decimal_json(json).unwrap();
        assert_eq!(orders.orders.len(), 1);
        let order = &orders.orders[0];
        assert_eq!(order.rate.as_ref().unwrap().to_string(), "26890");
        assert_eq!(order.pending_amount.as_ref().unwrap().to_string(), "0.5527");
        assert!(order.stop_loss_rate.is_none());
    }
}
