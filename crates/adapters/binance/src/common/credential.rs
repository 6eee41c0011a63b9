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

//! API credential utilities for signing Binance requests.

use std::fmt::Debug;

use cryptoapi_cryptography::signing::hmac_sha256_hex;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// Builds the byte string fed to HMAC-SHA256 for a Binance request: the
/// urlencoded query string in parameter insertion order (Binance verifies the
/// signature over the parameters exactly as transmitted, `timestamp`
/// included).
#[must_use]
pub fn build_signing_message(params: &[(String, String)]) -> String {
    serde_urlencoded::to_string(params).expect("Invalid parameters")
}

/// Binance API credentials for signing requests.
///
/// Uses HMAC-SHA256 over the query string per the Binance signed-endpoint
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

    /// Signs the parameter set according to the Binance authentication
    /// scheme.
    #[must_use]
    pub fn sign(&self, params: &[(String, String)]) -> String {
        let message = build_signing_message(params);
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

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[rstest]
    fn test_query_string_in_insertion_order() {
        let message = build_signing_message(&pairs(&[
            ("symbol", "BTCUSDT"),
            ("timestamp", "1640000000000"),
        ]));
        assert_eq!(message, "symbol=BTCUSDT&timestamp=1640000000000");
    }

    #[rstest]
    fn test_empty_params_empty_message() {
        assert_eq!(build_signing_message(&[]), "");
    }

    #[rstest]
    fn test_sign_known_vector() {
        let credential = Credential::new("test-api-key", "test-secret-key");
        let signature = credential.sign(&pairs(&[
            ("symbol", "BTCUSDT"),
            ("timestamp", "1640000000000"),
        ]));
        assert_eq!(
            signature,
            "cdbea41448a1b0eff992067e313cd16540dd1761a6f3d8dd6eef78142a3b7288"
        );
    }

    #[rstest]
    fn test_sign_is_deterministic_and_timestamp_sensitive() {
        let credential = Credential::new("key", "secret");
        let params_a = pairs(&[("symbol", "BTCUSDT"), ("timestamp", "1640000000000")]);
        let params_b = pairs(&[("symbol", "BTCUSDT"), ("timestamp", "1640000000001")]);

        assert_eq!(credential.sign(&params_a), credential.sign(&params_a));
        assert_ne!(credential.sign(&params_a), credential.sign(&params_b));
    }

    #[rstest]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("key", "binance-secret");
        let output = format!("{credential:?}");
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("binance-secret"));
    }
}
