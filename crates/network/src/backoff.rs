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

//! Exponential backoff schedule for request retries.

use std::time::Duration;

use rand::Rng;

use crate::error::CryptoApiClientError;

/// Exponential backoff: `delay_n = min(initial × factor^(n−1), max)`.
///
/// With jitter enabled, each emitted delay is drawn uniformly from
/// `[0, delay_n]` using the thread RNG (cryptographically seeded), which
/// prevents lockstep retries across processes hammering the same endpoint.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial: Duration,
    max: Duration,
    factor: f64,
    jitter: bool,
    current: Duration,
}

impl ExponentialBackoff {
    /// Creates a new [`ExponentialBackoff`] schedule.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Configuration`] if `factor < 1.0` or
    /// `max < initial`.
    pub fn new(
        initial: Duration,
        max: Duration,
        factor: f64,
        jitter: bool,
    ) -> Result<Self, CryptoApiClientError> {
        if factor < 1.0 || !factor.is_finite() {
            return Err(CryptoApiClientError::Configuration(format!(
                "backoff factor must be >= 1.0, was {factor}"
            )));
        }
        if max < initial {
            return Err(CryptoApiClientError::Configuration(format!(
                "max delay {max:?} must be >= initial delay {initial:?}"
            )));
        }
        Ok(Self {
            initial,
            max,
            factor,
            jitter,
            current: initial,
        })
    }

    /// Returns the next delay to sleep and advances the schedule.
    pub fn next_duration(&mut self) -> Duration {
        let base = self.current;
        self.current = self.current.mul_f64(self.factor).min(self.max);
        if self.jitter {
            let upper = base.as_secs_f64();
            Duration::from_secs_f64(rand::rng().random_range(0.0..=upper))
        } else {
            base
        }
    }

    /// The current base delay (the one the next call will use).
    #[must_use]
    pub fn current_delay(&self) -> Duration {
        self.current
    }

    /// Restores the schedule to its initial state.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
