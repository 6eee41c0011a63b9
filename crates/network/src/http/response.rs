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

//! The immutable snapshot of one completed HTTP exchange.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;

use crate::headers::SecretHeaders;

/// Everything the post-response hooks and message wrappers need to know about
/// one completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponseData {
    /// HTTP status code, including non-standard codes (CloudFlare 520-527 etc).
    pub http_status_code: u16,
    /// Response headers.
    pub headers: SecretHeaders,
    /// Response body decoded as text.
    pub response_body_text: String,
    /// Raw response body bytes.
    pub response_body_bytes: Bytes,
    /// The final response URL (after redirects).
    pub url: String,
    /// Canonical reason phrase for the status code, when one exists.
    pub reason: Option<String>,
    /// Wall-clock duration of the exchange.
    pub elapsed: Option<Duration>,
    /// Cookies set by the response, as name/value pairs.
    pub cookies: Vec<(String, String)>,
    /// Character encoding advertised in `Content-Type`, when present.
    pub encoding: Option<String>,
    /// The request method.
    pub request_method: Method,
    /// The request URL as issued.
    pub request_url: String,
    /// The request path component.
    pub request_path: String,
}

impl HttpResponseData {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_status_code)
    }
}

/// Extracts `name=value` pairs from `Set-Cookie` headers.
pub(crate) fn parse_cookies(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| {
            let first_part = cookie.split(';').next()?;
            let (name, value) = first_part.split_once('=')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Extracts the `charset` parameter from a `Content-Type` header value.
pub(crate) fn parse_charset(headers: &reqwest::header::HeaderMap) -> Option<String> {
    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)?
        .to_str()
        .ok()?;
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|charset| charset.trim_matches('"').to_string())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
