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

//! The request execution pipeline shared by every exchange adapter.
//!
//! One API call flows through this crate as:
//!
//! 1. The adapter builds an [`EndpointRequest`](http::request::EndpointRequest)
//!    with signed [`SecretHeaders`](headers::SecretHeaders).
//! 2. [`HttpClient::send_endpoint_request`](http::client::HttpClient::send_endpoint_request)
//!    wraps a single attempt in the [`retry`] strategy.
//! 3. Each attempt runs the registered [`callback`] chain's pre-request hooks
//!    (rate limiters may refuse admission here), performs the HTTP send, then
//!    runs the post-response hooks (response validators may convert an
//!    apparent success into a typed failure here).
//! 4. The raw [`HttpResponseData`](http::response::HttpResponseData) is
//!    returned for the adapter to decompose into metadata and payload.

pub mod backoff;
pub mod callback;
pub mod error;
pub mod headers;
pub mod http;
pub mod ratelimit;
pub mod retry;
