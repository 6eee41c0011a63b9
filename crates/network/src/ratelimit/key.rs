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

//! Rate-limit counter key construction and parsing.
//!
//! Key format: `{PREFIX}:{LABEL}:WINDOW:{window_number}` with
//! `window_number = ⌊unix_seconds / window_seconds⌋`, always uppercased.
//! The value stored under a key is the decimal request count for that window,
//! with a TTL of `window_seconds`.

use cryptoapi_cryptography::signing::sha256_hex;

use crate::ratelimit::UrlPattern;

/// The canonical key prefix used when none is supplied.
pub const DEFAULT_KEY_PREFIX: &str = "RATE_LIMIT:URL_PATTERN";

const WINDOW_MARKER: &str = ":WINDOW:";

/// A parsed rate-limit key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRateLimitKey {
    pub prefix: String,
    pub label: String,
    pub window: u64,
}

/// Builds, parses, and globs rate-limit counter keys.
#[derive(Debug)]
pub struct RateLimitKeyBuilder;

impl RateLimitKeyBuilder {
    /// Builds the counter key for the window containing `timestamp`.
    #[must_use]
    pub fn build_key(key_prefix: &str, label: &str, window_seconds: u64, timestamp: u64) -> String {
        let window = Self::window_for_timestamp(timestamp, window_seconds);
        format!("{key_prefix}:{label}{WINDOW_MARKER}{window}").to_uppercase()
    }

    /// Returns `⌊timestamp / window_seconds⌋`.
    #[must_use]
    pub fn window_for_timestamp(timestamp: u64, window_seconds: u64) -> u64 {
        timestamp / window_seconds.max(1)
    }

    /// Parses a key back into its prefix, label, and window number.
    ///
    /// The canonical [`DEFAULT_KEY_PREFIX`] spans two `:`-separated segments
    /// and is recognized as a unit; for any other key the first segment is the
    /// prefix and the remainder (which may itself contain colons) the label.
    /// Returns `None` for keys not produced by [`Self::build_key`].
    #[must_use]
    pub fn parse_key(key: &str) -> Option<ParsedRateLimitKey> {
        let key = key.to_uppercase();
        let marker = key.rfind(WINDOW_MARKER)?;
        let window: u64 = key[marker + WINDOW_MARKER.len()..].parse().ok()?;
        let head = &key[..marker];

        let (prefix, label) = if let Some(label) = head
            .strip_prefix(DEFAULT_KEY_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            (DEFAULT_KEY_PREFIX.to_string(), label.to_string())
        } else {
            let (prefix, label) = head.split_once(':')?;
            (prefix.to_string(), label.to_string())
        };

        if prefix.is_empty() || label.is_empty() {
            return None;
        }
        Some(ParsedRateLimitKey {
            prefix,
            label,
            window,
        })
    }

    /// Derives a stable label from a pattern set: `PATTERN_` plus the first
    /// 8 hex characters of SHA-256 over the sorted pattern sources.
    #[must_use]
    pub fn label_from_patterns(patterns: &[UrlPattern]) -> String {
        let mut sources: Vec<&str> = patterns.iter().map(UrlPattern::source).collect();
        sources.sort_unstable();
        let digest = sha256_hex(sources.join(",").as_bytes());
        format!("PATTERN_{}", digest[..8].to_uppercase())
    }

    /// Builds a glob for discovering live counter keys, e.g.
    /// `PREFIX:*:WINDOW:*`.
    #[must_use]
    pub fn build_search_pattern(
        key_prefix: &str,
        label: Option<&str>,
        window: Option<u64>,
    ) -> String {
        let label = label.unwrap_or("*");
        let window = window.map_or_else(|| "*".to_string(), |w| w.to_string());
        format!("{key_prefix}:{label}{WINDOW_MARKER}{window}").to_uppercase()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
