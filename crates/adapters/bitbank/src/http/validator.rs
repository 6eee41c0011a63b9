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

//! Response validator for bitbank.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::BITBANK;

/// Converts non-success bitbank responses into [`ExchangeApiError`].
///
/// Error envelope: `{"success": 0, "data": {"code": <int>}}`. bitbank
/// transmits a numeric error code only; the code table lives in the exchange
/// documentation.
#[derive(Debug, Default)]
pub struct BitbankResponseValidator;

impl BitbankResponseValidator {
    /// Creates a new [`BitbankResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<i64>, Option<i64>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let success = value.get("success").and_then(serde_json::Value::as_i64);
        let code = value
            .get("data")
            .and_then(|data| data.get("code"))
            .and_then(serde_json::Value::as_i64);
        (success, code)
    }
}

#[async_trait]
impl RequestCallback for BitbankResponseValidator {
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if response.is_success() {
            // bitbank signals failures inside a 200 body as success=0.
            let (success, code) = Self::extract_error_info(&response.response_body_text);
            if success != Some(0) {
                return Ok(());
            }
            let error = ExchangeApiError {
                error_description: format!(
                    "{BITBANK} API error: HTTP {}, API code {}",
                    response.http_status_code,
                    code.map_or("None".to_string(), |c| c.to_string()),
                ),
                http_status_code: Some(response.http_status_code),
                api_status_code_1: code.map(|c| c.to_string()),
                api_status_code_2: None,
                api_error_message_1: None,
                api_error_message_2: None,
                response_body: Some(response.response_body_text.clone()),
            };
            return Err(error.into());
        }

        let (_, code) = Self::extract_error_info(&response.response_body_text);
        let error = ExchangeApiError {
            error_description: format!(
                "{BITBANK} API error: HTTP {}, API code {}",
                response.http_status_code,
                code.map_or("None".to_string(), |c| c.to_string()),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: code.map(|c| c.to_string()),
            api_status_code_2: None,
            api_error_message_1: None,
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

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponseData {
        HttpResponseData {
            http_status_code: status,
            headers: SecretHeaders::new(),
            response_body_text: body.to_string(),
            response_body_bytes: Bytes::copy_from_slice(body.as_bytes()),
            url: "https://api.bitbank.cc/v1/user/assets".to_string(),
            reason: None,
            elapsed: None,
            cookies: Vec::new(),
            encoding: None,
            request_method: Method::GET,
            request_url: "https://api.bitbank.cc/v1/user/assets".to_string(),
            request_path: "/v1/user/assets".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_envelope_passes() {
        let validator = BitbankResponseValidator::new();
        let result = validator
            .after_request(&response(200, r#"{"success": 1, "data": {"assets": []}}"#))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_error_code_inside_200_body() {
        let validator = BitbankResponseValidator::new();
        let body = r#"{"success": 0, "data": {"code": 20003}}"#;

        let error = validator
            .after_request(&response(200, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(200));
        assert_eq!(error.api_status_code_1.as_deref(), Some("20003"));
        assert!(error.api_error_message_1.is_none());
        assert_eq!(error.response_body.as_deref(), Some(body));
        assert!(error.error_description.contains("bitbank"));
        assert!(error.error_description.contains("20003"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let validator = BitbankResponseValidator::new();
        let error = validator
            .after_request(&response(503, "service unavailable"))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(503));
        assert!(error.api_status_code_1.is_none());
    }
}
