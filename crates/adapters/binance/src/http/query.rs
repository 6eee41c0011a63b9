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

//! Typed request parameters for Binance endpoints.

/// Parameters for `/api/v3/ticker/24hr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceTickerParams {
    pub symbol: String,
}

impl BinanceTickerParams {
    /// Creates parameters for the given symbol, e.g. `BTCUSDT`.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        vec![("symbol".to_string(), self.symbol.clone())]
    }
}

/// Parameters for `/api/v3/depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceDepthParams {
    pub symbol: String,
    /// Number of levels per side; the exchange default is 100.
    pub limit: Option<u32>,
}

impl BinanceDepthParams {
    /// Creates parameters for the given symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
        }
    }

    /// Limits the number of levels per side.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("symbol".to_string(), self.symbol.clone())];
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
