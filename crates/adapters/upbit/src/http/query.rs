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

//! Typed request parameters for Upbit endpoints.

/// Parameters for `/v1/ticker`; `markets` is a comma-separated market list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpbitTickerParams {
    pub markets: String,
}

impl UpbitTickerParams {
    /// Creates parameters for the given markets, e.g. `KRW-BTC,KRW-ETH`.
    #[must_use]
    pub fn new(markets: impl Into<String>) -> Self {
        Self {
            markets: markets.into(),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        vec![("markets".to_string(), self.markets.clone())]
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
