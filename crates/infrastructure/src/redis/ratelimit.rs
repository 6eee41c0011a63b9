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

//! Redis-backed shared URL-pattern rate limiter.
//!
//! Same callback contract as the in-process
//! [`UrlPatternRateLimiter`](cryptoapi_network::ratelimit::local::UrlPatternRateLimiter),
//! but the window counters live in Redis so every process sharing the server
//! shares the budget. Counter keys follow
//! `{PREFIX}:{LABEL}:WINDOW:{window_number}` with a TTL of `window_seconds`
//! set on the first write of each window and never extended.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use cryptoapi_network::{
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
use redis::aio::ConnectionManager;
use url::Url;

/// Default window length for the shared limiter.
pub const DEFAULT_WINDOW_SECONDS: u64 = 60;

/// A fixed-window request counter shared across processes through Redis.
///
/// Admission (`before_request`) reads the current window's counter and
/// refuses once it reaches `max_safe_count`; accounting (`after_request`)
/// bumps the counter with a pipelined `SET NX EX` + `INCR`, one atomic
/// round trip. A request cancelled mid-flight never increments the counter.
pub struct RedisSharedUrlPatternRateLimiter {
    con: ConnectionManager,
    patterns: Vec<UrlPattern>,
    window_seconds: u64,
    max_safe_count: u32,
    label: String,
    key_prefix: String,
    limit_exceeded: AtomicBool,
}

impl Debug for RedisSharedUrlPatternRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(RedisSharedUrlPatternRateLimiter))
            .field("patterns", &self.patterns)
            .field("window_seconds", &self.window_seconds)
            .field("max_safe_count", &self.max_safe_count)
            .field("label", &self.label)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisSharedUrlPatternRateLimiter {
    /// Creates a new shared limiter and verifies the Redis connection with a
    /// `PING`.
    ///
    /// The supplied client is externally owned: connection failures propagate
    /// and no retry is added beyond the client's own reconnection policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the `PING` health check fails.
    pub async fn create(
        con: ConnectionManager,
        patterns: Vec<UrlPattern>,
        max_safe_count: u32,
        window_seconds: u64,
        label: Option<String>,
        key_prefix: Option<String>,
    ) -> anyhow::Result<Self> {
        let mut ping_con = con.clone();
        let pong: String = redis::cmd("PING").query_async(&mut ping_con).await?;
        tracing::debug!("Redis rate limiter health check: {pong}");

        let label = label.unwrap_or_else(|| RateLimitKeyBuilder::label_from_patterns(&patterns));
        Ok(Self {
            con,
            patterns,
            window_seconds,
            max_safe_count,
            label,
            key_prefix: key_prefix.unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            limit_exceeded: AtomicBool::new(false),
        })
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

    /// Reads the request count recorded in the current window.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Transport`] if the Redis read fails.
    pub async fn get_count(&self) -> Result<u32, CryptoApiClientError> {
        self.read_count(&self.current_key()).await
    }

    fn current_key(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        RateLimitKeyBuilder::build_key(&self.key_prefix, &self.label, self.window_seconds, now)
    }

    async fn read_count(&self, key: &str) -> Result<u32, CryptoApiClientError> {
        let mut con = self.con.clone();
        let count: Option<u32> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut con)
            .await
            .map_err(|e| CryptoApiClientError::Transport(format!("redis GET failed: {e}")))?;
        Ok(count.unwrap_or(0))
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
impl RequestCallback for RedisSharedUrlPatternRateLimiter {
    async fn before_request(
        &self,
        url: &Url,
        _headers: &SecretHeaders,
        _body_json: Option<&str>,
    ) -> Result<(), CryptoApiClientError> {
        if !matches_any(&self.patterns, url) {
            return Ok(());
        }

        let key = self.current_key();
        let count = self.read_count(&key).await?;
        if count >= self.max_safe_count {
            self.limit_exceeded.store(true, Ordering::Relaxed);
            return Err(CryptoApiClientError::RateLimitApproaching(format!(
                "URL pattern limit exceeded: {count}/{}",
                self.max_safe_count
            )));
        }

        self.limit_exceeded.store(false, Ordering::Relaxed);
        tracing::debug!(
            "Rate limit check passed {count}/{} for key {key}",
            self.max_safe_count
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

        let key = self.current_key();
        tracing::debug!("Rate limit increment for key {key}");

        // SET NX seeds the TTL on the window's first write; INCR rides in the
        // same transaction so the pair is one network round trip.
        let mut con = self.con.clone();
        let (count,): (i64,) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("EX")
            .arg(self.window_seconds)
            .arg("NX")
            .ignore()
            .cmd("INCR")
            .arg(&key)
            .query_async(&mut con)
            .await
            .map_err(|e| CryptoApiClientError::Transport(format!("redis INCR failed: {e}")))?;

        tracing::debug!("Redis INCR result: {count} for key {key}");
        Ok(())
    }
}
