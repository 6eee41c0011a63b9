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

//! Response validator for Coincheck.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::COINCHECK;

/// Converts non-success Coincheck responses into [`ExchangeApiError`].
///
/// Error envelope: `{"success": false, "error": <str>}`. Fields that are
/// absent or of the wrong type become `None`.
#[derive(Debug, Default)]
pub struct CoincheckResponseValidator;

impl CoincheckResponseValidator {
    /// Creates a new [`CoincheckResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<bool>, Option<String>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let success = value.get("success").and_then(serde_json::Value::as_bool);
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        (success, message)
    }
}

#[async_trait]
impl RequestCallback for CoincheckResponseValidator {
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if response.is_success() {
            return Ok(());
        }

        let (success, message) = Self::extract_error_info(&response.response_body_text);
        let error = ExchangeApiError {
            error_description: format!(
                "{COINCHECK} API error: HTTP {}, success {}, message: {}",
                response.http_status_code,
                success.map_or("None".to_string(), |s| s.to_string()),
                message.as_deref().unwrap_or("None"),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: success.map(|s| s.to_string()),
            api_status_code_2: None,
            api_error_message_1: message,
            api_error_message_2: None,
            response_body: Some(response.response_body_text.clone()),
        };
        Err(error.into())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use cryptoapi_network::headers::SecretHeaders;
    use reqwest::Method;
    use rstest::rstest;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponseData {
        HttpResponseData {
            http_status_code: status,
            headers: SecretHeaders::new(),
            response_body_text: body.to_string(),
            response_body_bytes: Bytes::copy_from_slice(body.as_bytes()),
            url: "https://coincheck.com/api/accounts/balance".to_string(),
            reason: None,
            elapsed: None,
            cookies: Vec::new(),
            encoding: None,
            request_method: Method::GET,
            request_url: "https://coincheck.com/api/accounts/balance".to_string(),
            request_path: "/api/accounts/balance".to_string(),
        }
    }

    #[rstest]
    #[case(r#"{"success": false, "error": "invalid authentication"}"#, Some(false), Some("invalid authentication"))]
    #[case(r#"{"success": true, "data": {"jpy": "100000"}}"#, Some(true), None)]
    #[case(r#"{"error": "some error"}"#, None, Some("some error"))]
    #[case(r#"{"success": false}"#, Some(false), None)]
    #[case(r#"{"success": "false", "error": "some error"}"#, None, Some("some error"))]
    #[case(r#"{"success": false, "error": 123}"#, Some(false), None)]
    #[case("not a json", None, None)]
    #[case("{}", None, None)]
    fn test_extract_error_info(
        #[case] body: &str,
        #[case] expected_success: Option<bool>,
        #[case] expected_message: Option<&str>,
    ) {
        let (success, message) = CoincheckResponseValidator::extract_error_info(body);
        assert_eq!(success, expected_success);
        assert_eq!(message.as_deref(), expected_message);
    }

    #[tokio::test]
    async fn test_401_with_envelope() {
        let validator = CoincheckResponseValidator::new();
        let body = r#"{"success": false, "error": "invalid authentication"}"#;

        let error = validator
            .after_request(&response(401, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(401));
        assert_eq!(error.api_status_code_1.as_deref(), Some("false"));
        assert_eq!(
            error.api_error_message_1.as_deref(),
            Some("invalid authentication")
        );
        assert_eq!(error.response_body.as_deref(), Some(body));
        assert!(error.error_description.contains("Coincheck"));
    }

    #[tokio::test]
    async fn test_success_passes() {
        let validator = CoincheckResponseValidator::new();
        assert!(
            validator
                .after_request(&response(200, r#"{"success": true}"#))
                .await
                .is_ok()
        );
    }
}
