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

//! The shared send pipeline every adapter delegates to.

use std::{fmt::Debug, sync::Arc, time::Instant};

use crate::{
    callback::RequestCallback,
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{
        request::EndpointRequest,
        response::{HttpResponseData, parse_charset, parse_cookies},
    },
    retry::{RetryConfig, RetryExecutor},
};

/// Predicate deciding which errors the retry strategy treats as retryable.
pub type RetryPredicate = fn(&CryptoApiClientError) -> bool;

/// Wraps a [`reqwest::Client`] with the callback chain and retry strategy.
///
/// `send_endpoint_request` is the single entry point of the request execution
/// pipeline: per attempt it runs the pre-request hooks, performs the HTTP
/// send, assembles an [`HttpResponseData`], and runs the post-response hooks.
/// The retry strategy wraps the whole attempt, so hooks re-run on every retry.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: SecretHeaders,
    callbacks: Vec<Arc<dyn RequestCallback>>,
    retry: RetryExecutor,
    should_retry: RetryPredicate,
}

impl Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(HttpClient))
            .field("default_headers", &self.default_headers)
            .field("callbacks", &self.callbacks)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new [`HttpClient`] pipeline.
    ///
    /// The default retry predicate retries transport-level failures only;
    /// rate-limit trips and exchange errors surface to the caller unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Configuration`] for invalid retry
    /// parameters.
    pub fn new(
        client: reqwest::Client,
        default_headers: SecretHeaders,
        callbacks: Vec<Arc<dyn RequestCallback>>,
        retry_config: RetryConfig,
    ) -> Result<Self, CryptoApiClientError> {
        Ok(Self {
            client,
            default_headers,
            callbacks,
            retry: RetryExecutor::new(retry_config)?,
            should_retry: CryptoApiClientError::is_transport,
        })
    }

    /// Replaces the retryable-error predicate.
    #[must_use]
    pub fn with_retry_predicate(mut self, should_retry: RetryPredicate) -> Self {
        self.should_retry = should_retry;
        self
    }

    /// The registered callbacks, in invocation order.
    #[must_use]
    pub fn callbacks(&self) -> &[Arc<dyn RequestCallback>] {
        &self.callbacks
    }

    /// Sends `request` through the full pipeline under the retry strategy.
    ///
    /// # Errors
    ///
    /// - Errors raised by pre-request hooks (e.g.
    ///   [`CryptoApiClientError::RateLimitApproaching`]) abort the attempt.
    /// - Transport failures are retried per the retry configuration and
    ///   surface as [`CryptoApiClientError::RetryLimitExceeded`] once the
    ///   attempt budget is exhausted.
    /// - Errors raised by post-response hooks (e.g.
    ///   [`CryptoApiClientError::Exchange`]) surface unchanged.
    pub async fn send_endpoint_request(
        &self,
        request: &EndpointRequest,
    ) -> Result<HttpResponseData, CryptoApiClientError> {
        self.retry
            .execute(|| self.send_once(request), self.should_retry)
            .await
    }

    async fn send_once(
        &self,
        request: &EndpointRequest,
    ) -> Result<HttpResponseData, CryptoApiClientError> {
        let url = request.api_endpoint();
        let body_json = request.body_json();

        for callback in &self.callbacks {
            callback
                .before_request(&url, request.headers(), body_json.as_deref())
                .await?;
        }

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers());

        let mut builder = self
            .client
            .request(request.method().clone(), url.clone())
            .headers(headers.to_header_map()?);
        if let Some(body) = &body_json {
            builder = builder.body(body.clone());
        }

        tracing::debug!("{} {url}", request.method());
        let started = Instant::now();
        let response = builder.send().await?;
        let elapsed = started.elapsed();

        let status = response.status();
        let response_headers = response.headers().clone();
        let final_url = response.url().to_string();
        let body_bytes = response.bytes().await?;

        let data = HttpResponseData {
            http_status_code: status.as_u16(),
            headers: SecretHeaders::from_header_map(&response_headers),
            response_body_text: String::from_utf8_lossy(&body_bytes).into_owned(),
            response_body_bytes: body_bytes,
            url: final_url,
            reason: status.canonical_reason().map(ToString::to_string),
            elapsed: Some(elapsed),
            cookies: parse_cookies(&response_headers),
            encoding: parse_charset(&response_headers),
            request_method: request.method().clone(),
            request_url: url.to_string(),
            request_path: url.path().to_string(),
        };

        for callback in &self.callbacks {
            callback.after_request(&data).await?;
        }

        Ok(data)
    }
}
