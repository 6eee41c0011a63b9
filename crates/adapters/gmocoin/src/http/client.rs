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

//! Provides the HTTP client integration for the
//! [GMO Coin](https://coin.z.com) public REST API.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_network::{
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{client::HttpClient, request::EndpointRequestBuilder},
};
use cryptoapi_serialization::message::Message;
use url::Url;

use super::{
    messages::{StatusMessage, TickerMessage},
    models::{GmoCoinStatus, GmoCoinTicker},
    query::GmoCoinTickerParams,
};
use crate::common::consts::{GMOCOIN_PUBLIC_HTTP_URL, GMOCOIN_STUB_PATH};

/// HTTP client for the GMO Coin public REST API.
#[derive(Clone)]
pub struct GmoCoinHttpClient {
    base_url: Url,
    client: Arc<HttpClient>,
}

impl Debug for GmoCoinHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(GmoCoinHttpClient))
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GmoCoinHttpClient {
    /// Creates a new [`GmoCoinHttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::InvalidRequest`] if `base_url` does
    /// not parse.
    pub fn new(
        client: Arc<HttpClient>,
        base_url: Option<String>,
    ) -> Result<Self, CryptoApiClientError> {
        let base_url = Url::parse(&base_url.unwrap_or(GMOCOIN_PUBLIC_HTTP_URL.to_string()))?;
        Ok(Self { base_url, client })
    }

    async fn get_public(
        &self,
        resource: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(GMOCOIN_STUB_PATH),
            resource,
            params,
            SecretHeaders::new(),
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Requests exchange availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn exchange_status(&self) -> Result<GmoCoinStatus, CryptoApiClientError> {
        let body = self.get_public("status", Vec::new()).await?;
        Ok(StatusMessage::from_json(body)?.to_domain_model()?)
    }

    /// Requests tickers; one symbol when `params.symbol` is set, otherwise
    /// every listed symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn ticker(
        &self,
        params: &GmoCoinTickerParams,
    ) -> Result<Vec<GmoCoinTicker>, CryptoApiClientError> {
        let body = self.get_public("ticker", params.to_params()).await?;
        Ok(TickerMessage::from_json(body)?.to_domain_model()?)
    }
}
