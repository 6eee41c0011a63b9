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

//! API credential utilities for signing bitFlyer requests.

use std::fmt::Debug;

use cryptoapi_cryptography::signing::hmac_sha256_hex;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// Builds the byte string fed to HMAC-SHA256 for a bitFlyer request:
/// `timestamp + METHOD + endpoint_path [+ "?" query] [+ body_json]`.
///
/// `endpoint_path` must carry its leading `/`; the exchange rejects
/// signatures computed over a path without it. Query parameters join in
/// insertion order and the body is the compact JSON that goes on the wire.
#[must_use]
pub fn build_signing_message(
    timestamp: &str,
    method: &str,
    endpoint_path: &str,
    query_params: &[(String, String)],
    body_json: Option<&str>,
) -> String {
    let mut message = format!("{timestamp}{method}{endpoint_path}");
    if !query_params.is_empty() {
        let query = serde_urlencoded::to_string(query_params).expect("Invalid parameters");
        message.push('?');
        message.push_str(&query);
    }
    if let Some(body) = body_json {
        message.push_str(body);
    }
    message
}

/// bitFlyer API credentials for signing requests.
///
/// Uses HMAC-SHA256 for request signing as per the Lightning API
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

    /// Signs a request according to the bitFlyer authentication scheme.
    #[must_use]
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        endpoint_path: &str,
        query_params: &[(String, String)],
        body_json: Option<&str>,
    ) -> String {
        let message =
            build_signing_message(timestamp, method, endpoint_path, query_params, body_json);
        hmac_sha256_hex(&self.api_secret, message.as_bytes())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
