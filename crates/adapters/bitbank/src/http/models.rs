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

//! Domain models for bitbank REST responses.

use bigdecimal::BigDecimal;
use cryptoapi_serialization::decimal::{serde_decimal, serde_decimal_option};
use serde::{Deserialize, Serialize};

use crate::common::enums::{BitbankOrderStatus, BitbankOrderType, BitbankPairStatus, BitbankSide};

/// Snapshot ticker for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankTicker {
    #[serde(with = "serde_decimal")]
    pub sell: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub buy: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub high: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub low: BigDecimal,
    #[serde(default, with = "serde_decimal_option")]
    pub open: Option<BigDecimal>,
    #[serde(with = "serde_decimal")]
    pub last: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub vol: BigDecimal,
    /// Millisecond Unix time of the snapshot.
    pub timestamp: i64,
}

/// Tiered JPY withdrawal fee, or a flat fee for crypto assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitbankWithdrawalFee {
    Tiered {
        #[serde(with = "serde_decimal")]
        threshold: BigDecimal,
        #[serde(with = "serde_decimal")]
        under: BigDecimal,
        #[serde(with = "serde_decimal")]
        over: BigDecimal,
    },
    Flat(BigDecimal),
}

/// One asset balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankAsset {
    pub asset: String,
    pub amount_precision: u32,
    #[serde(with = "serde_decimal")]
    pub onhand_amount: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub locked_amount: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub free_amount: BigDecimal,
    pub stop_deposit: bool,
    pub stop_withdrawal: bool,
    #[serde(default)]
    pub withdrawal_fee: Option<BitbankWithdrawalFee>,
}

/// The `data` payload of `/v1/user/assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankAssets {
    pub assets: Vec<BitbankAsset>,
}

/// Trading availability of one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankSpotStatus {
    pub pair: String,
    pub status: BitbankPairStatus,
    #[serde(with = "serde_decimal")]
    pub min_amount: BigDecimal,
}

/// The `data` payload of `/spot/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankSpotStatuses {
    pub statuses: Vec<BitbankSpotStatus>,
}

/// An order as returned by `/v1/user/spot/order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbankOrder {
    pub order_id: i64,
    pub pair: String,
    pub side: BitbankSide,
    #[serde(rename = "type")]
    pub order_type: BitbankOrderType,
    #[serde(default, with = "serde_decimal_option")]
    pub start_amount: Option<BigDecimal>,
    #[serde(default, with = "serde_decimal_option")]
    pub remaining_amount: Option<BigDecimal>,
    #[serde(with = "serde_decimal")]
    pub executed_amount: BigDecimal,
    #[serde(default, with = "serde_decimal_option")]
    pub price: Option<BigDecimal>,
    #[serde(default, with = "serde_decimal_option")]
    pub average_price: Option<BigDecimal>,
    /// Millisecond Unix time the order was accepted.
    pub ordered_at: i64,
    pub status: BitbankOrderStatus,
    #[serde(default)]
    pub post_only: Option<bool>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
