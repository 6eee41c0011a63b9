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

//! Pre-request / post-response hooks around each HTTP attempt.

use std::fmt::Debug;

use async_trait::async_trait;
use url::Url;

use crate::{error::CryptoApiClientError, headers::SecretHeaders, http::response::HttpResponseData};

/// A hook pair invoked around every HTTP attempt.
///
/// Callbacks run in registration order. An error from `before_request`
/// short-circuits the remaining pre-request hooks and prevents the HTTP send;
/// an error from `after_request` short-circuits the remaining post-response
/// hooks and converts the attempt into a failure. Whether a failed attempt is
/// retried is decided by the retry strategy's predicate, not by the callback.
///
/// Hooks are observers, not transformers: headers are passed by shared
/// reference and there is no protocol for rewriting the outgoing request.
/// Because the retry strategy re-invokes the chain on every attempt,
/// implementations must be idempotent with respect to retries.
#[async_trait]
pub trait RequestCallback: Send + Sync + Debug {
    /// Invoked once per attempt, before the HTTP send.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the attempt (e.g. a local rate-limit guard
    /// raising [`CryptoApiClientError::RateLimitApproaching`]).
    async fn before_request(
        &self,
        url: &Url,
        headers: &SecretHeaders,
        body_json: Option<&str>,
    ) -> Result<(), CryptoApiClientError> {
        let _ = (url, headers, body_json);
        Ok(())
    }

    /// Invoked once per attempt, after the HTTP call completes.
    ///
    /// # Errors
    ///
    /// Returning an error converts an apparent success into a typed failure
    /// (e.g. a response validator raising
    /// [`CryptoApiClientError::Exchange`]).
    async fn after_request(
        &self,
        response: &HttpResponseData,
    ) -> Result<(), CryptoApiClientError> {
        let _ = response;
        Ok(())
    }
}
