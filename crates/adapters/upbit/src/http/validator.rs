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

//! Response validator for Upbit.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::UPBIT;

/// Converts non-success Upbit responses into [`ExchangeApiError`].
///
/// Error envelope: `{"error": {"name": <str|int>, "message": <str>}}`;
/// `name` is numeric for quota errors and symbolic otherwise, so it is
/// normalized to its textual form.
#[derive(Debug, Default)]
pub struct UpbitResponseValidator;

impl UpbitResponseValidator {
    /// Creates a new [`UpbitResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<String>, Option<String>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let error = value.get("error");
        let name = error
            .and_then(|error| error.get("name"))
            .and_then(|name| match name {
                serde_json::Value::String(name) => Some(name.clone()),
                serde_json::Value::Number(name) => Some(name.to_string()),
                _ => None,
            });
        let message = error
            .and_then(|error| error.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        (name, message)
    }
}

#[async_trait]
impl RequestCallback for UpbitResponseValidator {
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if response.is_success() {
            return Ok(());
        }

        let (name, message) = Self::extract_error_info(&response.response_body_text);
        let error = ExchangeApiError {
            error_description: format!(
                "{UPBIT} API error: HTTP {}, API code {}, message: {}",
                response.http_status_code,
                name.as_deref().unwrap_or("None"),
                message.as_deref().unwrap_or("None"),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: name,
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
            url: "https://api.upbit.com/v1/ticker".to_string(),
            reason: None,
            elapsed: None,
            cookies: Vec::new(),
            encoding: None,
            request_method: Method::GET,
            request_url: "https://api.upbit.com/v1/ticker".to_string(),
            request_path: "/v1/ticker".to_string(),
        }
    }

    #[rstest]
    #[case(
        r#"{"error": {"name": 404, "message": "Code not found"}}"#,
        Some("404"),
        Some("Code not found")
    )]
    #[case(
        r#"{"error": {"name": "invalid_query_payload", "message": "..."}}"#,
        Some("invalid_query_payload"),
        Some("...")
    )]
    #[case("not a json", None, None)]
    fn test_extract_error_info(
        #[case] body: &str,
        #[case] expected_name: Option<&str>,
        #[case] expected_message: Option<&str>,
    ) {
        let (name, message) = UpbitResponseValidator::extract_error_info(body);
        assert_eq!(name.as_deref(), expected_name);
        assert_eq!(message.as_deref(), expected_message);
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let validator = UpbitResponseValidator::new();
        let body = r#"{"error": {"name": 404, "message": "Code not found"}}"#;

        let error = validator
            .after_request(&response(404, body))
            .await
            .unwrap_err();

        let CryptoApiClientError::Exchange(error) = error else {
            panic!("expected exchange error");
        };
        assert_eq!(error.api_status_code_1.as_deref(), Some("404"));
        assert_eq!(error.api_error_message_1.as_deref(), Some("Code not found"));
        assert!(error.error_description.contains("Upbit"));
    }
}
