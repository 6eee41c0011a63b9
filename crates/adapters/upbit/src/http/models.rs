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

//! Domain models for Upbit quotation responses.

use bigdecimal::BigDecimal;
use cryptoapi_serialization::decimal::serde_decimal;
use serde::{Deserialize, Serialize};

/// Snapshot ticker for one market (Upbit transmits numeric literals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpbitTicker {
    pub market: String,
    #[serde(with = "serde_decimal")]
    pub trade_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub opening_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub high_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub low_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub prev_closing_price: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub signed_change_rate: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub acc_trade_volume_24h: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub acc_trade_price_24h: BigDecimal,
    /// Millisecond Unix time of the snapshot.
    pub timestamp: i64,
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
    fn test_ticker_numeric_literals_preserved() {
        let json = r#"[{
            "market": "KRW-BTC",
            "trade_price": 137002000.0,
            "opening_price": 136001000.0,
            "high_price": 137500000.0,
            "low_price": 135800000.0,
            "prev_closing_price": 136001000.0,
            "signed_change_rate": 0.0073602399,
            "acc_trade_volume_24h": 2509.33663082,
            "acc_trade_price_24h": 342882286638.25177,
            "timestamp": 1672531200000
        }]"#;

        let tickers: Vec<UpbitTicker> = parse_decimal_json(json).unwrap();
        assert_eq!(tickers[0].market, "KRW-BTC");
        assert_eq!(tickers[0].signed_change_rate.to_string(), "0.0073602399");
        assert_eq!(
            tickers[0].acc_trade_price_24h.to_string(),
            "342882286638.25177"
        );
    }
}
