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

//! Domain models for GMO Coin public REST responses.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use cryptoapi_serialization::{datetime::serde_utc, decimal::serde_decimal};
use serde::{Deserialize, Serialize};

use crate::common::enums::GmoCoinExchangeStatus;

/// The `data` payload of `/v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmoCoinStatus {
    pub status: GmoCoinExchangeStatus,
}

/// Snapshot ticker for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmoCoinTicker {
    pub symbol: String,
    #[serde(with = "serde_decimal")]
    pub ask: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub bid: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub high: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub last: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub low: BigDecimal,
    #[serde(with = "serde_decimal")]
    pub volume: BigDecimal,
    #[serde(with = "serde_utc")]
    pub timestamp: DateTime<Utc>,
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
    fn test_ticker_list() {
        let json = r#"[{
            "ask": "5000000",
            "bid": "4999000",
            "high": "5100000",
            "last": "4999500",
            "low": "4900000",
            "symbol": "BTC_JPY",
            "timestamp": "2023-01-01T00:00:00.000Z",
            "volume": "123.456"
        }]"#;

        let tickers: Vec<GmoCoinTicker> = parse_decimal_json(json).unwrap();
        assert_eq!(tickers.len(), 1);
        assert_eq!(tickers[0].symbol, "BTC_JPY");
        assert_eq!(tickers[0].last.to_string(), "4999500");
        assert_eq!(tickers[0].volume.to_string(), "123.456");
    }

    #[rstest]
    fn test_status() {
        let status: GmoCoinStatus = parse_decimal_json(r#"{"status": "OPEN"}"#).unwrap();
        assert_eq!(status.status, GmoCoinExchangeStatus::Open);
    }
}
