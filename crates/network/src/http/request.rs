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

//! The immutable endpoint request value and its builder.

use indexmap::IndexMap;
use reqwest::Method;
use url::Url;

use crate::headers::SecretHeaders;

/// Insertion-ordered request body mapping.
///
/// Insertion order matters because signing inputs serialize the body in the
/// order the caller supplied the keys. For numeric fields that participate in
/// a signed body, callers should supply pre-formatted strings or
/// [`serde_json::Value`] numbers whose rendering matches the wire form.
pub type RequestBody = IndexMap<String, serde_json::Value>;

/// An immutable, fully-specified request to one exchange endpoint.
///
/// Built via [`EndpointRequestBuilder`]; all derived values (`endpoint_path`,
/// `api_endpoint`, `body_json`) are pure functions of the stored fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRequest {
    method: Method,
    base_url: Url,
    stub_path: Option<String>,
    relative_resource_path: String,
    params: Vec<(String, String)>,
    headers: SecretHeaders,
    body: Option<RequestBody>,
}

impl EndpointRequest {
    /// The HTTP method (GET or POST).
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The exchange's base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &SecretHeaders {
        &self.headers
    }

    /// The request body mapping, if any.
    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Returns a copy of this request carrying `headers` instead.
    ///
    /// Signing needs the derived path and body of the finished request, so
    /// authentication headers are attached in a second step rather than by
    /// mutation.
    #[must_use]
    pub fn with_headers(mut self, headers: SecretHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// The path used by signers: `stub_path ⊕ relative_resource_path`.
    ///
    /// When a stub path is present the result is guaranteed to begin with
    /// `/`. Stripping that slash breaks every signed endpoint.
    #[must_use]
    pub fn endpoint_path(&self) -> String {
        match &self.stub_path {
            Some(stub) => format!("{stub}/{}", self.relative_resource_path),
            None => self.relative_resource_path.clone(),
        }
    }

    /// The full request URL including percent-encoded query parameters in
    /// insertion order.
    #[must_use]
    pub fn api_endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        let endpoint_path = self.endpoint_path();
        let base_path = self.base_url.path().trim_end_matches('/');
        let full_path = if endpoint_path.starts_with('/') {
            format!("{base_path}{endpoint_path}")
        } else {
            format!("{base_path}/{endpoint_path}")
        };
        url.set_path(&full_path);
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.params {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    /// Compact JSON of the body in key insertion order, `None` without a body.
    #[must_use]
    pub fn body_json(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|body| serde_json::to_string(body).expect("request body is serializable JSON"))
    }
}

/// Constructors for [`EndpointRequest`] values.
///
/// No `Content-Type` is ever inserted here: signing input must be determined
/// before any framework-added header pollutes the header set, so signers that
/// require one include it themselves.
#[derive(Debug)]
pub struct EndpointRequestBuilder;

impl EndpointRequestBuilder {
    /// Builds a GET request.
    #[must_use]
    pub fn get(
        base_url: Url,
        relative_stub_path: Option<&str>,
        relative_resource_path: &str,
        params: Vec<(String, String)>,
        headers: SecretHeaders,
    ) -> EndpointRequest {
        EndpointRequest {
            method: Method::GET,
            base_url,
            stub_path: relative_stub_path.map(normalize_stub_path),
            relative_resource_path: relative_resource_path.trim_start_matches('/').to_string(),
            params,
            headers,
            body: None,
        }
    }

    /// Builds a POST request.
    #[must_use]
    pub fn post(
        base_url: Url,
        relative_stub_path: Option<&str>,
        relative_resource_path: &str,
        body: Option<RequestBody>,
        headers: SecretHeaders,
    ) -> EndpointRequest {
        EndpointRequest {
            method: Method::POST,
            base_url,
            stub_path: relative_stub_path.map(normalize_stub_path),
            relative_resource_path: relative_resource_path.trim_start_matches('/').to_string(),
            params: Vec::new(),
            headers,
            body,
        }
    }
}

fn normalize_stub_path(stub: &str) -> String {
    let trimmed = stub.trim_start_matches('/').trim_end_matches('/');
    format!("/{trimmed}")
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn base() -> Url {
        Url::parse("https://api.bitflyer.com").unwrap()
    }

    #[rstest]
    #[case(Some("v1"), "me/getbalance", "/v1/me/getbalance")]
    #[case(Some("/v1"), "me/getbalance", "/v1/me/getbalance")]
    #[case(Some("/v1/"), "/me/getbalance", "/v1/me/getbalance")]
    #[case(None, "btc_jpy/ticker", "btc_jpy/ticker")]
    fn test_endpoint_path_preserves_leading_slash(
        #[case] stub: Option<&str>,
        #[case] resource: &str,
        #[case] expected: &str,
    ) {
        let request =
            EndpointRequestBuilder::get(base(), stub, resource, Vec::new(), SecretHeaders::new());
        assert_eq!(request.endpoint_path(), expected);
    }

    #[rstest]
    fn test_api_endpoint_without_params() {
        let request = EndpointRequestBuilder::get(
            base(),
            Some("v1"),
            "ticker",
            Vec::new(),
            SecretHeaders::new(),
        );
        assert_eq!(
            request.api_endpoint().as_str(),
            "https://api.bitflyer.com/v1/ticker"
        );
    }

    #[rstest]
    fn test_api_endpoint_with_params_in_insertion_order() {
        let request = EndpointRequestBuilder::get(
            base(),
            Some("v1"),
            "me/getchildorders",
            vec![
                ("product_code".to_string(), "BTC_JPY".to_string()),
                ("child_order_state".to_string(), "ACTIVE".to_string()),
            ],
            SecretHeaders::new(),
        );
        assert_eq!(
            request.api_endpoint().as_str(),
            "https://api.bitflyer.com/v1/me/getchildorders?product_code=BTC_JPY&child_order_state=ACTIVE"
        );
    }

    #[rstest]
    fn test_api_endpoint_without_stub_path() {
        let request = EndpointRequestBuilder::get(
            Url::parse("https://public.bitbank.cc").unwrap(),
            None,
            "btc_jpy/ticker",
            Vec::new(),
            SecretHeaders::new(),
        );
        assert_eq!(
            request.api_endpoint().as_str(),
            "https://public.bitbank.cc/btc_jpy/ticker"
        );
    }

    #[rstest]
    fn test_api_endpoint_preserves_base_path_segment() {
        let request = EndpointRequestBuilder::get(
            Url::parse("https://api.coin.z.com/public").unwrap(),
            Some("v1"),
            "ticker",
            Vec::new(),
            SecretHeaders::new(),
        );
        assert_eq!(
            request.api_endpoint().as_str(),
            "https://api.coin.z.com/public/v1/ticker"
        );
    }

    #[rstest]
    fn test_post_body_not_in_url_and_no_content_type() {
        let mut body = RequestBody::new();
        body.insert("product_code".to_string(), json!("BTC_JPY"));
        body.insert("side".to_string(), json!("BUY"));

        let request = EndpointRequestBuilder::post(
            base(),
            Some("v1"),
            "me/sendchildorder",
            Some(body),
            SecretHeaders::new(),
        );

        assert_eq!(
            request.api_endpoint().as_str(),
            "https://api.bitflyer.com/v1/me/sendchildorder"
        );
        assert!(!request.headers().contains("Content-Type"));
    }

    #[rstest]
    fn test_body_json_is_compact_and_insertion_ordered() {
        let mut body = RequestBody::new();
        body.insert("product_code".to_string(), json!("BTC_JPY"));
        body.insert("side".to_string(), json!("BUY"));
        body.insert("size".to_string(), json!(0.001));

        let request = EndpointRequestBuilder::post(
            base(),
            Some("v1"),
            "me/sendchildorder",
            Some(body),
            SecretHeaders::new(),
        );

        assert_eq!(
            request.body_json().unwrap(),
            r#"{"product_code":"BTC_JPY","side":"BUY","size":0.001}"#
        );
    }

    #[rstest]
    fn test_body_json_none_without_body() {
        let request = EndpointRequestBuilder::post(
            base(),
            Some("v1"),
            "me/cancelchildorder",
            None,
            SecretHeaders::new(),
        );
        assert!(request.body().is_none());
        assert!(request.body_json().is_none());
    }

    #[rstest]
    fn test_custom_headers_preserved() {
        let headers = SecretHeaders::from_pairs([
            ("Content-Type", "application/json"),
            ("Authorization", "Bearer token123"),
        ]);
        let request = EndpointRequestBuilder::post(
            base(),
            Some("v1"),
            "me/sendchildorder",
            None,
            headers,
        );
        assert_eq!(request.headers().get("Content-Type"), Some("application/json"));
        assert_eq!(request.headers().get("Authorization"), Some("Bearer token123"));
    }

    #[rstest]
    fn test_with_headers_returns_updated_copy() {
        let request = EndpointRequestBuilder::get(
            base(),
            Some("v1"),
            "ticker",
            Vec::new(),
            SecretHeaders::new(),
        );
        let signed = request
            .clone()
            .with_headers(SecretHeaders::from_pairs([("ACCESS-KEY", "key")]));

        assert!(request.headers().is_empty());
        assert_eq!(signed.headers().get("ACCESS-KEY"), Some("key"));
        assert_eq!(signed.endpoint_path(), request.endpoint_path());
    }

    #[rstest]
    fn test_equality() {
        let make = || {
            EndpointRequestBuilder::get(
                base(),
                Some("v1"),
                "ticker",
                vec![("product_code".to_string(), "BTC_JPY".to_string())],
                SecretHeaders::new(),
            )
        };
        assert_eq!(make(), make());
        assert_eq!(make().api_endpoint(), make().api_endpoint());
    }
}
