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

//! API credential utilities for signing Coincheck requests.

use std::fmt::Debug;

use cryptoapi_cryptography::signing::hmac_sha256_hex;
use url::Url;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// Builds the byte string fed to HMAC-SHA256 for a Coincheck request:
/// `nonce + full_url + body`.
///
/// The *complete URL* (scheme, host, path, and query) participates in the
/// signature, not just the path.
#[must_use]
pub fn build_signing_message(nonce: &str, api_endpoint: &Url, body: &str) -> String {
    format!("{nonce}{api_endpoint}{body}")
}

/// Coincheck API credentials for signing requests.
///
/// Uses HMAC-SHA256 over the nonce-and-URL message per the Coincheck API
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

    /// Signs a request according to the Coincheck authentication scheme.
    #[must_use]
    pub fn sign(&self, nonce: &str, api_endpoint: &Url, body: &str) -> String {
        let message = build_signing_message(nonce, api_endpoint, body);
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

    const NONCE: &str = "1640000000000";

    fn endpoint(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[rstest]
    fn test_message_without_body() {
        let message = build_signing_message(
            NONCE,
            &endpoint("https://coincheck.com/api/accounts/balance"),
            "",
        );
        assert_eq!(message, "1640000000000https://coincheck.com/api/accounts/balance");
    }

    #[rstest]
    fn test_message_with_body() {
        let body = r#"{"pair":"btc_jpy","order_type":"buy","rate":"1000000","amount":"0.001"}"#;
        let message = build_signing_message(
            NONCE,
            &endpoint("https://coincheck.com/api/exchange/orders"),
            body,
        );
        assert_eq!(
            message,
            format!("1640000000000https://coincheck.com/api/exchange/orders{body}")
        );
    }

    #[rstest]
    fn test_full_url_participates_in_signature() {
        let message_a = build_signing_message(
            NONCE,
            &endpoint("https://coincheck.com/api/accounts/balance"),
            "",
        );
        let message_b = build_signing_message(
            NONCE,
            &endpoint("https://example.com/api/accounts/balance"),
            "",
        );
        assert_ne!(message_a, message_b);
    }

    #[rstest]
    fn test_sign_known_vector() {
        let credential = Credential::new("test-api-key", "test-secret-key");
        let signature = credential.sign(
            NONCE,
            &endpoint("https://coincheck.com/api/accounts/balance"),
            "",
        );
        assert_eq!(
            signature,
            "401094c502e41332299edd520ab75f0aec126564ac1f502ea400df14a1fea062"
        );
    }

    #[rstest]
    fn test_sign_is_deterministic_and_nonce_sensitive() {
        let credential = Credential::new("key", "secret");
        let url = endpoint("https://coincheck.com/api/accounts/balance");

        assert_eq!(
            credential.sign(NONCE, &url, ""),
            credential.sign(NONCE, &url, "")
        );
        assert_ne!(
            credential.sign(NONCE, &url, ""),
            credential.sign("1640000000001", &url, "")
        );
    }

    #[rstest]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("key", "coincheck-secret");
        let output = format!("{credential:?}");
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("coincheck-secret"));
    }
}
