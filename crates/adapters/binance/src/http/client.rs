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

//! Provides the HTTP client integration for the [Binance](https://binance.com)
//! REST API.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_core::time::millis_timestamp;
use cryptoapi_network::{
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{client::HttpClient, request::EndpointRequestBuilder},
};
use cryptoapi_serialization::message::Message;
use url::Url;

use super::{
    messages::{AccountMessage, DepthMessage, Ticker24hrMessage},
    models::{BinanceAccount, BinanceDepth, BinanceTicker24hr},
    query::{BinanceDepthParams, BinanceTickerParams},
};
use crate::common::{
    consts::{BINANCE_API_KEY_HEADER, BINANCE_HTTP_URL, BINANCE_STUB_PATH},
    credential::Credential,
};

/// HTTP client for the Binance REST API.
#[derive(Clone)]
pub struct BinanceHttpClient {
    base_url: Url,
    client: Arc<HttpClient>,
    credential: Option<Credential>,
}

impl Debug for BinanceHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.credential.as_ref().map(|_| "<redacted>");
        f.debug_struct(stringify!(BinanceHttpClient))
            .field("base_url", &self.base_url)
            .field("credential", &credential)
            .finish_non_exhaustive()
    }
}

impl BinanceHttpClient {
    /// Creates a new [`BinanceHttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::InvalidRequest`] if `base_url` does
    /// not parse.
    pub fn new(
        client: Arc<HttpClient>,
        base_url: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Self, CryptoApiClientError> {
        let base_url = Url::parse(&base_url.unwrap_or(BINANCE_HTTP_URL.to_string()))?;
        let credential = match (api_key, api_secret) {
            (Some(key), Some(secret)) => Some(Credential::new(key, secret)),
            _ => None,
        };
        Ok(Self {
            base_url,
            client,
            credential,
        })
    }

    async fn get_public(
        &self,
        resource: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(BINANCE_STUB_PATH),
            resource,
            params,
            SecretHeaders::new(),
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Signed GET: timestamp and signature ride in the query string, the API
    /// key in the `X-MBX-APIKEY` header.
    async fn get_signed(
        &self,
        resource: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<String, CryptoApiClientError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(CryptoApiClientError::MissingCredentials)?;

        params.push(("timestamp".to_string(), millis_timestamp()));
        let signature = credential.sign(&params);
        params.push(("signature".to_string(), signature));

        let mut headers = SecretHeaders::new();
        headers.insert(BINANCE_API_KEY_HEADER, credential.api_key().as_str());

        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(BINANCE_STUB_PATH),
            resource,
            params,
            headers,
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Requests 24-hour rolling ticker statistics for one symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn ticker_24hr(
        &self,
        params: &BinanceTickerParams,
    ) -> Result<BinanceTicker24hr, CryptoApiClientError> {
        let body = self.get_public("ticker/24hr", params.to_params()).await?;
        Ok(Ticker24hrMessage::new(body).to_domain_model()?)
    }

    /// Requests the order book for one symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn depth(
        &self,
        params: &BinanceDepthParams,
    ) -> Result<BinanceDepth, CryptoApiClientError> {
        let body = self.get_public("depth", params.to_params()).await?;
        Ok(DepthMessage::new(body).to_domain_model()?)
    }

    /// Requests account information. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn account(&self) -> Result<BinanceAccount, CryptoApiClientError> {
        let body = self.get_signed("account", Vec::new()).await?;
        Ok(AccountMessage::new(body).to_domain_model()?)
    }
}
