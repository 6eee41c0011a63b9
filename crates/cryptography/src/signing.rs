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

use aws_lc_rs::{digest, hmac};

/// Generates an HMAC-SHA256 signature over `data` using `secret`.
///
/// Every exchange supported by this workspace signs its REST requests with
/// HMAC-SHA256; the result is always transmitted as a lowercase hexadecimal
/// string, which is what this function returns.
#[must_use]
pub fn hmac_sha256_hex(secret: &[u8], data: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    let tag = hmac::sign(&key, data);
    hex::encode(tag.as_ref())
}

/// Returns the SHA-256 digest of `data` as a lowercase hexadecimal string.
///
/// Used to derive stable rate-limit labels from URL pattern sets.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = digest::digest(&digest::SHA256, data);
    hex::encode(digest.as_ref())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "signing-key",
        "payload-to-sign",
        "0273991b1a92ea94eae49fc61ba50ce12136aef0f1a9a5150f753112abd360a3"
    )]
    #[case(
        "",
        "orphan-data",
        "9232f128e158a37f82a10af6b0b278509363e78f8f5535fc7c13b1d4a4def790"
    )]
    #[case(
        "signing-key",
        "",
        "0167ed933d70619efa232337594b17c1782d116b047cfea26b456324e7095c97"
    )]
    #[case(
        "",
        "",
        "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
    )]
    fn test_hmac_sha256_hex(#[case] secret: &str, #[case] data: &str, #[case] expected: &str) {
        let signature = hmac_sha256_hex(secret.as_bytes(), data.as_bytes());
        assert_eq!(signature, expected);
    }

    #[rstest]
    fn test_hmac_is_deterministic() {
        let first = hmac_sha256_hex(b"secret", b"message");
        let second = hmac_sha256_hex(b"secret", b"message");
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_sha256_hex_known_value() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
