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

//! Typed request parameters for GMO Coin endpoints.

/// Parameters for `/v1/ticker`; without a symbol the exchange returns every
/// listed symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GmoCoinTickerParams {
    pub symbol: Option<String>,
}

impl GmoCoinTickerParams {
    /// Creates parameters restricted to one symbol, e.g. `BTC_JPY`.
    #[must_use]
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        match &self.symbol {
            Some(symbol) => vec![("symbol".to_string(), symbol.clone())],
            None => Vec::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
