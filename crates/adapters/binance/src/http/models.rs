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

//! Domain models for Binance REST responses.
//!
//! Binance transmits decimals as strings but depth levels as
//! `[price, quantity]` string pairs; both decode through the decimal codec
//! without a float intermediate.

use bigdecimal::BigDecimal;
use cryptoapi_serialization::decimal::serde_decimal;
use serde::{Deserialize, Serialize};

/// 24-hour rolling ticker statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTicker24hr {
    pub symbol: String,
    #[serde(with = "serde_decimal")]
    pub price_change: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub price_change_percent: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub weighted_avg_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub prev_close_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub last_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub last_qty: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub bid_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub bid_qty: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub ask_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub ask_qty: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub open_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub high_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub low_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub volume: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub quote_volume: BigDecimal,
    pub open_time: i64,
    pub close_time: i64,
    pub first_id: i64,
    pub last_id: i64,
    pub count: i64,
}

/// One `[price, quantity]` depth level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinanceDepthLevel(
    #[serde(with = "serde_decimal")] pub BigDecimal,
    #[serde(with = "serde_decimal")] pub BigDecimal,
);

impl BinanceDepthLevel {
    /// The price of this level.
    #[must_use]
    pub fn price(&self) -> &BigDecimal {
        &self.0
    }

    /// The quantity at this level.
    #[must_use]
    pub fn quantity(&self) -> &BigDecimal {
        &self.1
    }
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceDepth {
    pub last_update_id: i64,
    pub bids: Vec<BinanceDepthLevel>,
    pub asks: Vec<BinanceDepthLevel>,
}

/// One asset balance inside the account snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinanceBalance {
    pub asset: String,
    #[serde(with = "serde_decimal")]
    pub free: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub locked: BigDecimal,
}

/// Account information returned by the signed `/api/v3/account` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceAccount {
    pub maker_commission: i64,
    pub taker_commission: i64,
    pub buyer_commission: i64,
    pub seller_commission: i64,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub update_time: i64,
    pub account_type: String,
    pub balances: Vec<BinanceBalance>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
