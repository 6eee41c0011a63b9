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

//! Typed request parameters for bitFlyer endpoints.
//!
//! Parameter and body key order is load-bearing: the signing message
//! serializes them in the order produced here.

use cryptoapi_network::http::request::RequestBody;
use serde_json::json;

use crate::common::enums::{
    BitflyerChildOrderState, BitflyerChildOrderType, BitflyerSide, BitflyerTimeInForce,
};

/// Parameters for `/v1/getticker` and `/v1/getboard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitflyerProductParams {
    pub product_code: String,
}

impl BitflyerProductParams {
    /// Creates parameters for the given product code.
    #[must_use]
    pub fn new(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        vec![("product_code".to_string(), self.product_code.clone())]
    }
}

/// Parameters for `/v1/me/getchildorders`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitflyerGetChildOrdersParams {
    pub product_code: String,
    pub child_order_state: Option<BitflyerChildOrderState>,
    pub count: Option<u32>,
}

impl BitflyerGetChildOrdersParams {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("product_code".to_string(), self.product_code.clone())];
        if let Some(state) = self.child_order_state {
            params.push(("child_order_state".to_string(), state.to_string()));
        }
        if let Some(count) = self.count {
            params.push(("count".to_string(), count.to_string()));
        }
        params
    }
}

/// Builder for [`BitflyerGetChildOrdersParams`].
#[derive(Debug, Clone)]
pub struct BitflyerChildOrdersParamsBuilder {
    params: BitflyerGetChildOrdersParams,
}

impl Default for BitflyerChildOrdersParamsBuilder {
    fn default() -> Self {
        Self {
            params: BitflyerGetChildOrdersParams::default(),
        }
    }
}

impl BitflyerChildOrdersParamsBuilder {
    /// Sets the product code (required).
    #[must_use]
    pub fn product_code(mut self, product_code: impl Into<String>) -> Self {
        self.params.product_code = product_code.into();
        self
    }

    /// Filters by order state.
    #[must_use]
    pub fn child_order_state(mut self, state: BitflyerChildOrderState) -> Self {
        self.params.child_order_state = Some(state);
        self
    }

    /// Limits the number of returned orders.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.params.count = Some(count);
        self
    }

    /// Finalizes the parameters.
    #[must_use]
    pub fn build(self) -> BitflyerGetChildOrdersParams {
        self.params
    }
}

/// Body of `/v1/me/sendchildorder`.
#[derive(Debug, Clone, PartialEq)]
pub struct BitflyerSendChildOrderParams {
    pub product_code: String,
    pub child_order_type: BitflyerChildOrderType,
    pub side: BitflyerSide,
    /// Required for LIMIT orders; pre-formatted so the signed body matches
    /// the wire bytes exactly.
    pub price: Option<serde_json::Number>,
    pub size: serde_json::Number,
    pub minute_to_expire: Option<u32>,
    pub time_in_force: Option<BitflyerTimeInForce>,
}

impl BitflyerSendChildOrderParams {
    pub(crate) fn to_body(&self) -> RequestBody {
        let mut body = RequestBody::new();
        body.insert("product_code".to_string(), json!(self.product_code));
        body.insert(
            "child_order_type".to_string(),
            json!(self.child_order_type.as_ref()),
        );
        body.insert("side".to_string(), json!(self.side.as_ref()));
        if let Some(price) = &self.price {
            body.insert("price".to_string(), serde_json::Value::Number(price.clone()));
        }
        body.insert(
            "size".to_string(),
            serde_json::Value::Number(self.size.clone()),
        );
        if let Some(minutes) = self.minute_to_expire {
            body.insert("minute_to_expire".to_string(), json!(minutes));
        }
        if let Some(time_in_force) = self.time_in_force {
            body.insert("time_in_force".to_string(), json!(time_in_force.as_ref()));
        }
        body
    }
}

/// Body of `/v1/me/cancelchildorder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitflyerCancelChildOrderParams {
    pub product_code: String,
    pub child_order_acceptance_id: String,
}

impl BitflyerCancelChildOrderParams {
    pub(crate) fn to_body(&self) -> RequestBody {
        let mut body = RequestBody::new();
        body.insert("product_code".to_string(), json!(self.product_code));
        body.insert(
            "child_order_acceptance_id".to_string(),
            json!(self.child_order_acceptance_id),
        );
        body
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_child_orders_params_order() {
        let params = BitflyerChildOrdersParamsBuilder::default()
            .product_code("BTC_JPY")
            .child_order_state(BitflyerChildOrderState::Active)
            .build()
            .to_params();

        assert_eq!(
            params,
            vec![
                ("product_code".to_string(), "BTC_JPY".to_string()),
                ("child_order_state".to_string(), "ACTIVE".to_string()),
            ]
        );
    }

    #[rstest]
    fn test_send_child_order_body_is_insertion_ordered() {
        let params = BitflyerSendChildOrderParams {
            product_code: "BTC_JPY".to_string(),
            child_order_type: BitflyerChildOrderType::Limit,
            side: BitflyerSide::Buy,
            price: Some(serde_json::Number::from(30000u32)),
            size: serde_json::Number::from_f64(0.001).unwrap(),
            minute_to_expire: None,
            time_in_force: None,
        };

        let body = serde_json::to_string(&params.to_body()).unwrap();
        assert_eq!(
            body,
            r#"{"product_code":"BTC_JPY","child_order_type":"LIMIT","side":"BUY","price":30000,"size":0.001}"#
        );
    }
}
