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

//! Case-insensitive header map that masks credential values in any rendering.

use std::fmt::{Debug, Display};

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::CryptoApiClientError;

/// Any header whose uppercased name contains one of these carries a secret.
const SENSITIVE_TOKENS: [&str; 5] = ["KEY", "SIGN", "SECRET", "TOKEN", "AUTH"];

const FULL_MASK: &str = "**********";

/// Case-insensitive mapping from header name to value.
///
/// The same name under any casing refers to one entry; the last-assigned
/// casing is the one stored. `Display` and `Debug` replace the value of every
/// sensitive header with a masked form, so instances can be logged freely.
/// Only [`SecretHeaders::to_header_map`] exposes actual values, at the
/// header-emission boundary.
#[derive(Clone, Default)]
pub struct SecretHeaders {
    // Lowercased name -> (stored casing, value).
    entries: IndexMap<String, (String, String)>,
}

impl SecretHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header map from name/value pairs.
    #[must_use]
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name, value);
        }
        headers
    }

    /// Converts a reqwest [`HeaderMap`] into a [`SecretHeaders`].
    ///
    /// Non-UTF-8 header values are dropped.
    #[must_use]
    pub fn from_header_map(header_map: &HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in header_map {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }
        headers
    }

    /// Inserts a header, replacing any entry under the same name in any casing.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries
            .insert(name.to_lowercase(), (name, value.into()));
    }

    /// Returns the actual value stored under `name`, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_lowercase())
            .map(|(_, value)| value.as_str())
    }

    /// Removes the entry stored under `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries
            .shift_remove(&name.to_lowercase())
            .map(|(_, value)| value)
    }

    /// Returns `true` when an entry exists under `name` in any casing.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Number of headers stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no headers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(stored_name, actual_value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Merges `other` into `self`, later assignments winning.
    pub fn extend(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Returns the masked rendering of every header, keyed by stored casing.
    #[must_use]
    pub fn masked(&self) -> IndexMap<String, String> {
        self.entries
            .values()
            .map(|(name, value)| {
                let rendered = if is_sensitive(name) {
                    mask_value(value)
                } else {
                    value.clone()
                };
                (name.clone(), rendered)
            })
            .collect()
    }

    /// Converts to a reqwest [`HeaderMap`] carrying the actual values.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::InvalidRequest`] if a name or value is
    /// not a valid HTTP header token.
    pub fn to_header_map(&self) -> Result<HeaderMap, CryptoApiClientError> {
        let mut header_map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CryptoApiClientError::InvalidRequest(format!("header '{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                CryptoApiClientError::InvalidRequest(format!("header '{name}' value: {e}"))
            })?;
            header_map.insert(header_name, header_value);
        }
        Ok(header_map)
    }
}

fn is_sensitive(name: &str) -> bool {
    let upper = name.to_uppercase();
    SENSITIVE_TOKENS.iter().any(|token| upper.contains(token))
}

fn mask_value(value: &str) -> String {
    if value.chars().count() > 3 {
        let prefix: String = value.chars().take(3).collect();
        format!("{prefix}********")
    } else {
        FULL_MASK.to_string()
    }
}

impl Display for SecretHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (name, value)) in self.masked().iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{name}\": \"{value}\"")?;
        }
        write!(f, "}}")
    }
}

impl Debug for SecretHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretHeaders({self})")
    }
}

impl PartialEq for SecretHeaders {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(lower, (_, value))| other.entries.get(lower).is_some_and(|(_, v)| v == value))
    }
}

impl Eq for SecretHeaders {}

impl PartialEq<HeaderMap> for SecretHeaders {
    fn eq(&self, other: &HeaderMap) -> bool {
        if self.entries.len() != other.len() {
            return false;
        }
        self.entries.iter().all(|(lower, (_, value))| {
            other
                .get(lower.as_str())
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == value)
        })
    }
}

impl<'a> IntoIterator for &'a SecretHeaders {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
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
    fn test_sensitive_headers_are_masked_in_display() {
        let headers = SecretHeaders::from_pairs([
            ("ACCESS-KEY", "sk-1234567890abcdef"),
            ("ACCESS-SIGN", "signature_value_123456"),
            ("API-KEY", "apikey123456789"),
            ("Content-Type", "application/json"),
        ]);

        let rendered = headers.to_string();
        assert!(rendered.contains("sk-********"));
        assert!(rendered.contains("sig********"));
        assert!(rendered.contains("api********"));
        assert!(rendered.contains("application/json"));
        assert!(!rendered.contains("1234567890abcdef"));

        let masked = headers.masked();
        assert_eq!(masked["ACCESS-KEY"], "sk-********");
        assert_eq!(masked["Content-Type"], "application/json");
    }

    #[rstest]
    fn test_non_sensitive_headers_preserved() {
        let headers = SecretHeaders::from_pairs([
            ("User-Agent", "cryptoapi/1.0"),
            ("X-Request-ID", "abc123"),
        ]);
        let rendered = headers.to_string();
        assert!(rendered.contains("cryptoapi/1.0"));
        assert!(rendered.contains("abc123"));
        assert_eq!(headers.get("User-Agent"), Some("cryptoapi/1.0"));
    }

    #[rstest]
    #[case("Authorization", "Bearer token123456789", "Bea********")]
    #[case("X-MBX-APIKEY", "binance_api_key_123456", "bin********")]
    #[case("ACCESS-TOKEN", "tok", "**********")]
    #[case("API-KEY", "ab", "**********")]
    #[case("X-API-KEY", "abcd", "abc********")]
    fn test_masking_rules(#[case] name: &str, #[case] value: &str, #[case] expected: &str) {
        let headers = SecretHeaders::from_pairs([(name, value)]);
        assert_eq!(headers.masked()[name], expected);
    }

    #[rstest]
    fn test_case_insensitive_lookup_keeps_last_casing() {
        let mut headers = SecretHeaders::new();
        headers.insert("access-key", "first");
        headers.insert("Access-Key", "second");
        headers.insert("ACCESS-KEY", "third");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("access-key"), Some("third"));
        assert_eq!(headers.get("Access-Key"), Some("third"));
        // Last-assigned casing is the one rendered.
        assert_eq!(headers.masked().keys().next().unwrap(), "ACCESS-KEY");
    }

    #[rstest]
    fn test_mutable_operations() {
        let mut headers = SecretHeaders::new();
        headers.insert("Content-Type", "application/json");
        headers.insert("API-KEY", "test_key_123");
        assert_eq!(headers.len(), 2);
        assert!(headers.contains("content-type"));

        assert_eq!(headers.remove("Content-Type"), Some("application/json".to_string()));
        assert_eq!(headers.len(), 1);
        assert!(!headers.contains("Content-Type"));
    }

    #[rstest]
    fn test_extend_overrides() {
        let mut headers = SecretHeaders::from_pairs([("Content-Type", "text/plain")]);
        let overrides =
            SecretHeaders::from_pairs([("content-type", "application/json"), ("Accept", "*/*")]);
        headers.extend(&overrides);

        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.get("Accept"), Some("*/*"));
    }

    #[rstest]
    fn test_header_map_round_trip() {
        let headers = SecretHeaders::from_pairs([
            ("ACCESS-KEY", "secret_key_123"),
            ("Content-Type", "application/json"),
        ]);

        let header_map = headers.to_header_map().unwrap();
        assert_eq!(header_map["access-key"], "secret_key_123");

        let restored = SecretHeaders::from_header_map(&header_map);
        assert_eq!(restored, headers);
    }

    #[rstest]
    fn test_equality() {
        let a = SecretHeaders::from_pairs([("API-KEY", "key1"), ("Content-Type", "json")]);
        let b = SecretHeaders::from_pairs([("api-key", "key1"), ("content-type", "json")]);
        let c = SecretHeaders::from_pairs([("API-KEY", "key2"), ("Content-Type", "json")]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let header_map = a.to_header_map().unwrap();
        assert_eq!(a, header_map);
        assert_eq!(b, header_map);
    }

    #[rstest]
    fn test_invalid_header_name_is_an_error() {
        let headers = SecretHeaders::from_pairs([("bad header\n", "value")]);
        assert!(headers.to_header_map().is_err());
    }

    #[rstest]
    fn test_debug_is_masked() {
        let headers = SecretHeaders::from_pairs([("X-API-KEY", "xapikey987654321")]);
        let debug = format!("{headers:?}");
        assert!(debug.starts_with("SecretHeaders("));
        assert!(debug.contains("xap********"));
        assert!(!debug.contains("987654321"));
    }
}
