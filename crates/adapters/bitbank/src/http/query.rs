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

//! Typed request parameters for bitbank endpoints.

use cryptoapi_network::http::request::RequestBody;
use serde_json::json;

use crate::common::enums::{BitbankOrderType, BitbankSide};

/// Parameters for the public ticker endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbankPairParams {
    pub pair: String,
}

impl BitbankPairParams {
    /// Creates parameters for the given currency pair, e.g. `btc_jpy`.
    #[must_use]
    pub fn new(pair: impl Into<String>) -> Self {
        Self { pair: pair.into() }
    }
}

/// Body of `/v1/user/spot/order`.
///
/// Amounts and prices are pre-formatted strings: the signed body must match
/// the wire bytes exactly, so numeric formatting is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbankCreateOrderParams {
    pub pair: String,
    pub amount: String,
    pub price: Option<String>,
    pub side: BitbankSide,
    pub order_type: BitbankOrderType,
    pub post_only: Option<bool>,
}

impl BitbankCreateOrderParams {
    pub(crate) fn to_body(&self) -> RequestBody {
        let mut body = RequestBody::new();
        body.insert("pair".to_string(), json!(self.pair));
        body.insert("amount".to_string(), json!(self.amount));
        if let Some(price) = &self.price {
            body.insert("price".to_string(), json!(price));
        }
        body.insert("side".to_string(), json!(self.side.as_ref()));
        body.insert("type".to_string(), json!(self.order_type.as_ref()));
        if let Some(post_only) = self.post_only {
            body.insert("post_only".to_string(), json!(post_only));
        }
        body
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
