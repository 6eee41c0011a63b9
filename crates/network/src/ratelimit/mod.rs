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

//! Per-URL-pattern sliding-window rate limiting.
//!
//! Both the in-process limiter here and the Redis-backed shared variant in
//! `cryptoapi-infrastructure` implement the same callback contract: the
//! pre-request hook enforces admission against the current window's counter,
//! the post-response hook increments it. Admission is conservative; the
//! accounting is weakly consistent across window boundaries.

pub mod key;
pub mod local;

use url::Url;

/// A pattern selecting the requests a limiter applies to.
///
/// A request matches a limiter iff any of its patterns match: literal
/// patterns match as substrings of the URL path, regex patterns match
/// against the full URL.
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Substring match against the URL path.
    Literal(String),
    /// Regex match against the full URL.
    Regex(regex::Regex),
}

impl UrlPattern {
    /// Creates a literal (substring) pattern.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::Literal(pattern.into())
    }

    /// Compiles a regex pattern.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] for an invalid expression.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Regex(regex::Regex::new(pattern)?))
    }

    /// Returns `true` when this pattern matches `url`.
    #[must_use]
    pub fn matches(&self, url: &Url) -> bool {
        match self {
            Self::Literal(pattern) => url.path().contains(pattern.as_str()),
            Self::Regex(pattern) => pattern.is_match(url.as_str()),
        }
    }

    /// The pattern's source text, used for label derivation.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Literal(pattern) => pattern,
            Self::Regex(pattern) => pattern.as_str(),
        }
    }
}

/// Returns `true` when any pattern matches `url`.
#[must_use]
pub fn matches_any(patterns: &[UrlPattern], url: &Url) -> bool {
    patterns.iter().any(|pattern| pattern.matches(url))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/v1/ticker", "https://example.com/v1/ticker", true)]
    #[case("v1/ticker", "https://example.com/v1/ticker", true)]
    #[case("/v1/board", "https://example.com/v1/ticker", false)]
    fn test_literal_matches_path_substring(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
    ) {
        let pattern = UrlPattern::literal(pattern);
        assert_eq!(pattern.matches(&Url::parse(url).unwrap()), expected);
    }

    #[rstest]
    fn test_regex_matches_full_url() {
        let pattern = UrlPattern::regex(r"example\.com/v\d+/.*").unwrap();
        assert!(pattern.matches(&Url::parse("https://example.com/v1/ticker").unwrap()));
        assert!(!pattern.matches(&Url::parse("https://example.org/ticker").unwrap()));
    }

    #[rstest]
    fn test_match_all_regex() {
        let pattern = UrlPattern::regex(".*").unwrap();
        assert!(pattern.matches(&Url::parse("https://anything.test/path").unwrap()));
    }

    #[rstest]
    fn test_matches_any() {
        let patterns = vec![
            UrlPattern::literal("/v1/ticker"),
            UrlPattern::literal("/v1/board"),
        ];
        let url = Url::parse("https://example.com/v1/board").unwrap();
        assert!(matches_any(&patterns, &url));

        let other = Url::parse("https://example.com/v1/executions").unwrap();
        assert!(!matches_any(&patterns, &other));
    }
}
