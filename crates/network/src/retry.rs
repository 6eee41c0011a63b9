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

//! Retry strategy wrapping each HTTP send.

use std::{future::Future, time::Duration};

use crate::{backoff::ExponentialBackoff, error::CryptoApiClientError};

/// Retry parameters for the request pipeline.
///
/// `max_retries` counts *attempts*: a value of 3 means "attempt up to 3
/// times", so at most 2 backoff sleeps occur before failing.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

/// Executes an async operation under exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    /// Creates a new [`RetryExecutor`], validating the backoff parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Configuration`] for an invalid backoff
    /// factor or delay bounds.
    pub fn new(config: RetryConfig) -> Result<Self, CryptoApiClientError> {
        // Validate eagerly so a bad config fails at construction, not mid-call.
        ExponentialBackoff::new(
            config.initial_delay,
            config.max_delay,
            config.backoff_factor,
            config.jitter,
        )?;
        Ok(Self { config })
    }

    /// The configured retry parameters.
    #[must_use]
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Calls `op` until it succeeds, a non-retryable error occurs, or the
    /// attempt budget is exhausted.
    ///
    /// Whether an error is retried is decided solely by `should_retry`.
    ///
    /// # Errors
    ///
    /// - Non-retryable errors propagate unchanged on first occurrence.
    /// - After the final attempt fails with a retryable error, returns
    ///   [`CryptoApiClientError::RetryLimitExceeded`] with the attempt count.
    pub async fn execute<T, F, Fut>(
        &self,
        mut op: F,
        should_retry: impl Fn(&CryptoApiClientError) -> bool,
    ) -> Result<T, CryptoApiClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CryptoApiClientError>>,
    {
        let max_retries = self.config.max_retries.max(1);
        let mut backoff = ExponentialBackoff::new(
            self.config.initial_delay,
            self.config.max_delay,
            self.config.backoff_factor,
            self.config.jitter,
        )?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if !should_retry(&error) => return Err(error),
                Err(error) if attempt >= max_retries => {
                    return Err(CryptoApiClientError::RetryLimitExceeded {
                        max_retries,
                        last_error: error.to_string(),
                    });
                }
                Err(error) => {
                    let delay = backoff.next_duration();
                    tracing::debug!(
                        "Attempt {attempt}/{max_retries} failed ({error}), retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
