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

//! Response validator for Binance.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::BINANCE;

/// Converts non-success Binance responses into [`ExchangeApiError`].
///
/// Error envelope: `{"code": <int>, "msg": <str>}`. Fields that are absent or
/// of the wrong type become `None`; an unparseable body is kept only as raw
/// text.
#[derive(Debug, Default)]
pub struct BinanceResponseValidator;

impl BinanceResponseValidator {
    /// Creates a new [`BinanceResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<i64>, Option<String>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let code = value.get("code").and_then(serde_json::Value::as_i64);
        let message = value
            .get("msg")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        (code, message)
    }
}

#[async_trait]
impl RequestCallback for BinanceResponseValidator {
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if response.is_success() {
            return Ok(());
        }

        let (code, message) = Self::extract_error_info(&response.response_body_text);
        let error = ExchangeApiError {
            error_description: format!(
                "{BINANCE} API error: HTTP {}, API code {}, message: {}",
                response.http_status_code,
                code.map_or("None".to_string(), |c| c.to_string()),
                message.as_deref().unwrap_or("None"),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: code.map(|c| c.to_string()),
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
            url: "https://api.binance.com/api/v3/ticker/24hr".to_string(),
            reason: None,
            elapsed: None,
            cookies: Vec::new(),
            encoding: None,
            request_method: Method::GET,
            request_url: "https://api.binance.com/api/v3/ticker/24hr".to_string(),
            request_path: "/api/v3/ticker/24hr".to_string(),
        }
    }

    #[rstest]
    #[case(r#"{"code": -1121, "msg": "Invalid symbol."}"#, Some(-1121), Some("Invalid symbol."))]
    #[case(r#"{"code": -1100}"#, Some(-1100), None)]
    #[case(r#"{"msg": "Some error"}"#, None, Some("Some error"))]
    #[case(r#"{"code": "-1121", "msg": "Invalid symbol."}"#, None, Some("Invalid symbol."))]
    #[case(r#"{"code": -1121, "msg": 123}"#, Some(-1121), None)]
    #[case("not a json", None, None)]
    #[case("{}", None, None)]
    #[case(r#"{"code": 1000, "msg": "Success"}"#, Some(1000), Some("Success"))]
    fn test_extract_error_info(
        #[case] body: &str,
        #[case] expected_code: Option<i64>,
        #[case] expected_message: Option<&str>,
    ) {
        let (code, message) = BinanceResponseValidator::extract_error_info(body);
        assert_eq!(code, expected_code);
        assert_eq!(message.as_deref(), expected_message);
    }

    #[tokio::test]
    async fn test_success_passes() {
        let validator = BinanceResponseValidator::new();
        assert!(validator.after_request(&response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn test_400_with_envelope() {
        let validator = BinanceResponseValidator::new();
        let body = r#"{"code": -1121, "msg": "Invalid symbol."}"#;

        let error = validator
            .after_request(&response(400, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(400));
        assert_eq!(error.api_status_code_1.as_deref(), Some("-1121"));
        assert_eq!(error.api_error_message_1.as_deref(), Some("Invalid symbol."));
        assert_eq!(error.response_body.as_deref(), Some(body));
        assert!(error.error_description.contains("Binance API error"));
        assert!(error.error_description.contains("400"));
        assert!(error.error_description.contains("-1121"));
        assert!(error.error_description.contains("Invalid symbol."));
    }

    #[tokio::test]
    async fn test_401_with_envelope() {
        let validator = BinanceResponseValidator::new();
        let body = r#"{"code": -2014, "msg": "API-key format invalid."}"#;

        let error = validator
            .after_request(&response(401, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(401));
        assert_eq!(error.api_status_code_1.as_deref(), Some("-2014"));
        assert_eq!(
            error.api_error_message_1.as_deref(),
            Some("API-key format invalid.")
        );
    }
}
