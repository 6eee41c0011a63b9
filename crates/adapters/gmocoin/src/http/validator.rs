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

//! Response validator for GMO Coin.

use async_trait::async_trait;
use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    http::response::HttpResponseData,
};

use crate::common::consts::GMOCOIN;

/// Converts non-success GMO Coin responses into [`ExchangeApiError`].
///
/// Error envelope:
/// `{"status": <int>, "messages": [{"message_code": …, "message_string": …}]}`.
/// The first entry of `messages` supplies the API code and message.
#[derive(Debug, Default)]
pub struct GmoCoinResponseValidator;

impl GmoCoinResponseValidator {
    /// Creates a new [`GmoCoinResponseValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_error_info(body: &str) -> (Option<String>, Option<String>) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None);
        };
        let first_message = value
            .get("messages")
            .and_then(serde_json::Value::as_array)
            .and_then(|messages| messages.first());
        let code = first_message
            .and_then(|message| message.get("message_code"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        let message = first_message
            .and_then(|message| message.get("message_string"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        (code, message)
    }
}

#[async_trait]
impl RequestCallback for GmoCoinResponseValidator {
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
                "{GMOCOIN} API error: HTTP {}, API code {}, message: {}",
                response.http_status_code,
                code.as_deref().unwrap_or("None"),
                message.as_deref().unwrap_or("None"),
            ),
            http_status_code: Some(response.http_status_code),
            api_status_code_1: code,
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
