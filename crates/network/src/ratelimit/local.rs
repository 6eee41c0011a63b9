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

//! In-process per-URL-pattern rate limiter.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use dashmap::DashMap;
use url::Url;

use crate::{
    callback::RequestCallback,
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::response::HttpResponseData,
    ratelimit::{
        UrlPattern,
        key::{DEFAULT_KEY_PREFIX, RateLimitKeyBuilder},
        matches_any,
    },
};

/// Default window length for URL-pattern limiters.
pub const DEFAULT_WINDOW_SECONDS: u64 = 60;

/// A fixed-window request counter scoped to a set of URL patterns.
///
/// The pre-request hook refuses admission once the current window's count
/// reaches `max_safe_count`; the post-response hook increments it. Counters
/// for expired windows are pruned as new windows open. This guards a single
/// process; cross-process coordination needs the Redis-backed variant in
/// `cryptoapi-infrastructure`.
#[derive(Debug)]
pub struct UrlPatternRateLimiter {
    patterns: Vec<UrlPattern>,
    window_seconds: u64,
    max_safe_count: u32,
    label: String,
    key_prefix: String,
    counters: DashMap<u64, u32>,
    limit_exceeded: AtomicBool,
}

impl UrlPatternRateLimiter {
    /// Creates a new limiter over `patterns`.
    ///
    /// `label` defaults to a hash-derived `PATTERN_…` label and `key_prefix`
    /// to [`DEFAULT_KEY_PREFIX`].
    #[must_use]
    pub fn new(
        patterns: Vec<UrlPattern>,
        max_safe_count: u32,
        window_seconds: u64,
        label: Option<String>,
        key_prefix: Option<String>,
    ) -> Self {
        let label =
            label.unwrap_or_else(|| RateLimitKeyBuilder::label_from_patterns(&patterns));
        Self {
            patterns,
            window_seconds,
            max_safe_count,
            label,
            key_prefix: key_prefix.unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            counters: DashMap::new(),
            limit_exceeded: AtomicBool::new(false),
        }
    }

    /// The label this limiter's counter keys carry.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` when the most recent admission check tripped the limit.
    #[must_use]
    pub fn is_limit_exceeded(&self) -> bool {
        self.limit_exceeded.load(Ordering::Relaxed)
    }

    /// The request count recorded in the current window.
    #[must_use]
    pub fn get_count(&self) -> u32 {
        self.counters
            .get(&self.current_window())
            .map_or(0, |entry| *entry)
    }

    fn current_window(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        RateLimitKeyBuilder::window_for_timestamp(now, self.window_seconds)
    }

    fn current_key(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        RateLimitKeyBuilder::build_key(&self.key_prefix, &self.label, self.window_seconds, now)
    }

    fn matches_response(&self, response: &HttpResponseData) -> bool {
        match Url::parse(&response.url) {
            Ok(url) => matches_any(&self.patterns, &url),
            Err(_) => self
                .patterns
                .iter()
                .any(|pattern| response.request_path.contains(pattern.source())),
        }
    }
}

#[async_trait]
impl RequestCallback for UrlPatternRateLimiter {
    async fn before_request(
        &self,
        url: &Url,
        _headers: &SecretHeaders,
        _body_json: Option<&str>,
    ) -> Result<(), CryptoApiClientError> {
        if !matches_any(&self.patterns, url) {
            return Ok(());
        }

        let count = self.get_count();
        if count >= self.max_safe_count {
            self.limit_exceeded.store(true, Ordering::Relaxed);
            return Err(CryptoApiClientError::RateLimitApproaching(format!(
                "URL pattern limit exceeded: {count}/{}",
                self.max_safe_count
            )));
        }

        self.limit_exceeded.store(false, Ordering::Relaxed);
        tracing::debug!(
            "Rate limit check passed {count}/{} for key {}",
            self.max_safe_count,
            self.current_key()
        );
        Ok(())
    }

    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        if !self.matches_response(response) {
            return Ok(());
        }

        let window = self.current_window();
        let count = {
            let mut entry = self.counters.entry(window).or_insert(0);
            *entry += 1;
            *entry
        };
        // Expired windows hold no admission information.
        self.counters
            .retain(|stored_window, _| *stored_window + 1 >= window);

        tracing::debug!("Rate limit increment to {count} for key {}", self.current_key());
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
