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

//! Provides the HTTP client integration for the [Upbit](https://upbit.com)
//! quotation REST API.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_network::{
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{client::HttpClient, request::EndpointRequestBuilder},
};
use cryptoapi_serialization::message::Message;
use url::Url;

use super::{messages::TickerMessage, models::UpbitTicker, query::UpbitTickerParams};
use crate::common::consts::{UPBIT_HTTP_URL, UPBIT_STUB_PATH};

/// HTTP client for the Upbit quotation REST API.
#[derive(Clone)]
pub struct UpbitHttpClient {
    base_url: Url,
    client: Arc<HttpClient>,
}

impl Debug for UpbitHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(UpbitHttpClient))
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UpbitHttpClient {
    /// Creates a new [`UpbitHttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::InvalidRequest`] if `base_url` does
    /// not parse.
    pub fn new(
        client: Arc<HttpClient>,
        base_url: Option<String>,
    ) -> Result<Self, CryptoApiClientError> {
        let base_url = Url::parse(&base_url.unwrap_or(UPBIT_HTTP_URL.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// Requests tickers for the given markets.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn ticker(
        &self,
        params: &UpbitTickerParams,
    ) -> Result<Vec<UpbitTicker>, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(UPBIT_STUB_PATH),
            "ticker",
            params.to_params(),
            SecretHeaders::new(),
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(TickerMessage::new(response.response_body_text).to_domain_model()?)
    }
}
