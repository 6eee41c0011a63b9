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

//! API credential utilities for signing bitbank requests.

use std::fmt::Debug;

use cryptoapi_cryptography::signing::hmac_sha256_hex;
use indexmap::IndexMap;
use reqwest::Method;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// Builds the byte string fed to HMAC-SHA256 for a bitbank request.
///
/// The message is window-bounded: `request_time + time_window_ms` followed
/// by, for GET, the endpoint path plus (when present) the compact JSON of the
/// query mapping; for POST, the compact body JSON when present, otherwise the
/// endpoint path. `endpoint_path` must carry its leading `/`.
#[must_use]
pub fn build_signing_message(
    method: &Method,
    endpoint_path: &str,
    query_params: &[(String, String)],
    body_json: Option<&str>,
    request_time: &str,
    time_window_ms: &str,
) -> String {
    let mut message = format!("{request_time}{time_window_ms}");
    if method == Method::GET {
        message.push_str(endpoint_path);
        if !query_params.is_empty() {
            let query: IndexMap<&str, &str> = query_params
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            message.push_str(
                &serde_json::to_string(&query).expect("query mapping is serializable JSON"),
            );
        }
    } else {
        match body_json {
            Some(body) => message.push_str(body),
            None => message.push_str(endpoint_path),
        }
    }
    message
}

/// bitbank API credentials for signing requests.
///
/// Uses HMAC-SHA256 over the window-bounded message per the bitbank API
/// specification. Secrets are zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    #[zeroize(skip)]
    api_key: Ustr,
    api_secret: Box<[u8]>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credential {
    /// Creates a new [`Credential`] instance.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Ustr::from(&api_key.into()),
            api_secret: api_secret.into().into_bytes().into_boxed_slice(),
        }
    }

    /// Returns the API key associated with this credential.
    #[must_use]
    pub fn api_key(&self) -> &Ustr {
        &self.api_key
    }

    /// Signs a request according to the bitbank authentication scheme.
    #[must_use]
    pub fn sign(
        &self,
        method: &Method,
        endpoint_path: &str,
        query_params: &[(String, String)],
        body_json: Option<&str>,
        request_time: &str,
        time_window_ms: &str,
    ) -> String {
        let message = build_signing_message(
            method,
            endpoint_path,
            query_params,
            body_json,
            request_time,
            time_window_ms,
        );
        hmac_sha256_hex(&self.api_secret, message.as_bytes())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const REQUEST_TIME: &str = "1640000000000";
    const TIME_WINDOW: &str = "5000";

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[rstest]
    fn test_get_without_query_params() {
        let message = build_signing_message(
            &Method::GET,
            "/v1/user/assets",
            &[],
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(message, "16400000000005000/v1/user/assets");
    }

    #[rstest]
    fn test_get_with_query_params() {
        let message = build_signing_message(
            &Method::GET,
            "/v1/user/spot/trade_history",
            &pairs(&[("pair", "btc_jpy"), ("count", "1")]),
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(
            message,
            "16400000000005000/v1/user/spot/trade_history{\"pair\":\"btc_jpy\",\"count\":\"1\"}"
        );
    }

    #[rstest]
    fn test_post_with_request_body_signs_body_only() {
        let body = r#"{"pair":"btc_jpy","amount":"0.0001","price":"17000000","side":"sell","type":"limit"}"#;
        let message = build_signing_message(
            &Method::POST,
            "/v1/user/spot/order",
            &[],
            Some(body),
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(message, format!("16400000000005000{body}"));
    }

    #[rstest]
    fn test_post_without_request_body_signs_path() {
        let message = build_signing_message(
            &Method::POST,
            "/v1/user/spot/cancel_order",
            &[],
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(message, "16400000000005000/v1/user/spot/cancel_order");
    }

    #[rstest]
    fn test_query_json_preserves_insertion_order() {
        let message = build_signing_message(
            &Method::GET,
            "/v1/user/spot/orders",
            &pairs(&[("z_last", "value"), ("a_first", "value")]),
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(
            message,
            "16400000000005000/v1/user/spot/orders{\"z_last\":\"value\",\"a_first\":\"value\"}"
        );
    }

    #[rstest]
    fn test_endpoint_path_keeps_leading_slash() {
        let message = build_signing_message(
            &Method::GET,
            "/v1/user/assets",
            &[],
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert!(message.starts_with("16400000000005000/v1/"));
    }

    #[rstest]
    fn test_sign_known_vector() {
        let credential = Credential::new("test-api-key", "test-secret-key");
        let signature = credential.sign(
            &Method::GET,
            "/v1/user/spot/trade_history",
            &pairs(&[("pair", "btc_jpy"), ("count", "1")]),
            None,
            REQUEST_TIME,
            TIME_WINDOW,
        );
        assert_eq!(
            signature,
            "4a6f8e2c7b99bfbe7234d16310742599dc33e0c9d98c1695ba5fcbb5c9bfd8ed"
        );
    }

    #[rstest]
    fn test_sign_is_deterministic_and_time_sensitive() {
        let credential = Credential::new("key", "secret");
        let first = credential.sign(&Method::GET, "/v1/user/assets", &[], None, REQUEST_TIME, TIME_WINDOW);
        let second = credential.sign(&Method::GET, "/v1/user/assets", &[], None, REQUEST_TIME, TIME_WINDOW);
        let different = credential.sign(&Method::GET, "/v1/user/assets", &[], None, "1640000000001", TIME_WINDOW);

        assert_eq!(first, second);
        assert_ne!(first, different);
    }

    #[rstest]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("key", "very-secret-value");
        let output = format!("{credential:?}");
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("very-secret-value"));
    }
}
