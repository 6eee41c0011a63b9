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

//! Response validator for bitFlyer.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::BITFLYER;

/// Converts non-success bitFlyer responses into [`ExchangeApiError`].
///
/// Error envelope: `{"status": <int>, "error_message": <str>, "data": null}`.
/// Fields that are absent or of the wrong type become `None`; a body that is
/// not JSON at all is kept only as raw text.
#[derive(Debug, Default)]
pub struct BitflyerResponseValidator;

impl BitflyerResponseValidator {
    /// Creates a new [`BitflyerResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<i64>, Option<String>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let status = value.get("status").and_then(serde_json::Value::as_i64);
        let message = value
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        (status, message)
    }
}

#[async_trait]
impl RequestCallback for BitflyerResponseValidator {
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if response.is_success() {
            return Ok(());
        }

        let (status, message) = Self::extract_error_info(&response.response_body_text);
        let error = ExchangeApiError {
            error_description: format!(
                "{BITFLYER} API error: HTTP {}, API status {}, message: {}",
                response.http_status_code,
                status.map_or("None".to_string(), |s| s.to_string()),
                message.as_deref().unwrap_or("None"),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: status.map(|s| s.to_string()),
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
            url: "https://api.bitflyer.com/v1/me/getbalance".to_string(),
            reason: None,
            elapsed: None,
            cookies: Vec::new(),
            encoding: None,
            request_method: Method::GET,
            request_url: "https://api.bitflyer.com/v1/me/getbalance".to_string(),
            request_path: "/v1/me/getbalance".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_passes() {
        let validator = BitflyerResponseValidator::new();
        let result = validator.after_request(&response(200, "[]")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_error_envelope_is_extracted() {
        let validator = BitflyerResponseValidator::new();
        let body = r#"{"status": -208, "error_message": "Order is not accepted", "data": null}"#;

        let error = validator
            .after_request(&response(400, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(400));
        assert_eq!(error.api_status_code_1.as_deref(), Some("-208"));
        assert_eq!(
            error.api_error_message_1.as_deref(),
            Some("Order is not accepted")
        );
        assert_eq!(error.response_body.as_deref(), Some(body));
        assert!(error.error_description.contains("bitFlyer"));
        assert!(error.error_description.contains("400"));
        assert!(error.error_description.contains("-208"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_not_fatal() {
        let validator = BitflyerResponseValidator::new();
        let error = validator
            .after_request(&response(502, "<html>Bad Gateway</html>"))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.http_status_code, Some(502));
        assert!(error.api_status_code_1.is_none());
        assert!(error.api_error_message_1.is_none());
        assert_eq!(
            error.response_body.as_deref(),
            Some("<html>Bad Gateway</html>")
        );
    }

    #[rstest]
    fn test_type_mismatched_fields_become_none() {
        let (status, message) =
            BitflyerResponseValidator::extract_error_info(r#"{"status": "-208", "error_message": 5}"#);
        assert!(status.is_none());
        assert!(message.is_none());
    }
}
