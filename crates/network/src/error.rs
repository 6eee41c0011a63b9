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

//! The error surface shared by every exchange adapter.

use thiserror::Error;

/// Raised when the remote API endpoint decided the request failed.
///
/// This carries the exchange's own error envelope alongside the HTTP status,
/// so postmortems have the raw response body to work from. It is produced by
/// the per-exchange response validators, never by the transport layer itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error_description}")]
pub struct ExchangeApiError {
    /// Human-readable description: exchange name, HTTP code, API code, message.
    pub error_description: String,
    /// HTTP status code, including non-standard codes (CloudFlare 520-527 etc).
    pub http_status_code: Option<u16>,
    /// Primary exchange-specific status code.
    pub api_status_code_1: Option<String>,
    /// Secondary exchange-specific status code.
    pub api_status_code_2: Option<String>,
    /// Primary error message returned by the endpoint.
    pub api_error_message_1: Option<String>,
    /// Secondary error message returned by the endpoint.
    pub api_error_message_2: Option<String>,
    /// Raw response body text.
    pub response_body: Option<String>,
}

/// Top-level error type for the crypto API client.
#[derive(Debug, Error)]
pub enum CryptoApiClientError {
    /// The exchange reported a failure (non-2xx with an error envelope).
    #[error(transparent)]
    Exchange(#[from] ExchangeApiError),
    /// The retry budget was exhausted by retryable failures.
    #[error("Retry limit exceeded: max retries {max_retries} reached: {last_error}")]
    RetryLimitExceeded { max_retries: u32, last_error: String },
    /// A local rate-limit guard tripped before the request was issued.
    #[error("{0}")]
    RateLimitApproaching(String),
    /// Connection, TLS, or timeout failure below the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body did not decode into the expected shape.
    #[error("JSON error: {0}")]
    Json(String),
    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Invalid client or retry configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A private endpoint was called on a client without credentials.
    #[error("Missing credentials for authenticated request")]
    MissingCredentials,
    /// The session was used after `close()`.
    #[error("Session is already closed")]
    SessionClosed,
}

impl CryptoApiClientError {
    /// Returns `true` for failures below the HTTP layer, the default
    /// retryable set.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for CryptoApiClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Transport(format!("request timed out: {error}"))
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for CryptoApiClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<cryptoapi_serialization::decimal::DecimalParseError> for CryptoApiClientError {
    fn from(error: cryptoapi_serialization::decimal::DecimalParseError) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<cryptoapi_serialization::extract::ExtractError> for CryptoApiClientError {
    fn from(error: cryptoapi_serialization::extract::ExtractError) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<url::ParseError> for CryptoApiClientError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidRequest(error.to_string())
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
    fn test_exchange_api_error_display_is_description() {
        let error = ExchangeApiError {
            error_description: "Binance API error: HTTP 400, API code -1121".to_string(),
            http_status_code: Some(400),
            api_status_code_1: Some("-1121".to_string()),
            api_status_code_2: None,
            api_error_message_1: Some("Invalid symbol.".to_string()),
            api_error_message_2: None,
            response_body: Some(r#"{"code":-1121,"msg":"Invalid symbol."}"#.to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Binance API error: HTTP 400, API code -1121"
        );
    }

    #[rstest]
    fn test_retry_limit_exceeded_display_includes_count() {
        let error = CryptoApiClientError::RetryLimitExceeded {
            max_retries: 2,
            last_error: "connection reset".to_string(),
        };
        assert!(error.to_string().contains("max retries 2"));
        assert!(error.to_string().contains("connection reset"));
    }

    #[rstest]
    fn test_is_transport_classification() {
        assert!(CryptoApiClientError::Transport("reset".to_string()).is_transport());
        assert!(!CryptoApiClientError::SessionClosed.is_transport());
        assert!(
            !CryptoApiClientError::RateLimitApproaching("limit".to_string()).is_transport()
        );
    }
}
