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

//! Provides the HTTP client integration for the [bitbank](https://bitbank.cc)
//! REST API.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_core::time::millis_timestamp;
use cryptoapi_network::{
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{
        client::HttpClient,
        request::{EndpointRequest, EndpointRequestBuilder, RequestBody},
    },
};
use cryptoapi_serialization::message::Message;
use url::Url;

use super::{
    messages::{AssetsMessage, CreateOrderMessage, SpotStatusMessage, TickerMessage},
    models::{BitbankAsset, BitbankOrder, BitbankSpotStatus, BitbankTicker},
    query::{BitbankCreateOrderParams, BitbankPairParams},
};
use crate::common::{
    consts::{
        BITBANK_DEFAULT_TIME_WINDOW_MS, BITBANK_PRIVATE_HTTP_URL, BITBANK_PUBLIC_HTTP_URL,
        BITBANK_STUB_PATH,
    },
    credential::Credential,
};

/// HTTP client for the bitbank REST API.
#[derive(Clone)]
pub struct BitbankHttpClient {
    public_base_url: Url,
    private_base_url: Url,
    time_window_ms: u64,
    client: Arc<HttpClient>,
    credential: Option<Credential>,
}

impl Debug for BitbankHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.credential.as_ref().map(|_| "<redacted>");
        f.debug_struct(stringify!(BitbankHttpClient))
            .field("public_base_url", &self.public_base_url)
            .field("private_base_url", &self.private_base_url)
            .field("time_window_ms", &self.time_window_ms)
            .field("credential", &credential)
            .finish_non_exhaustive()
    }
}

impl BitbankHttpClient {
    /// Creates a new [`BitbankHttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::InvalidRequest`] if a base URL does
    /// not parse.
    pub fn new(
        client: Arc<HttpClient>,
        public_base_url: Option<String>,
        private_base_url: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Self, CryptoApiClientError> {
        let public_base_url =
            Url::parse(&public_base_url.unwrap_or(BITBANK_PUBLIC_HTTP_URL.to_string()))?;
        let private_base_url =
            Url::parse(&private_base_url.unwrap_or(BITBANK_PRIVATE_HTTP_URL.to_string()))?;
        let credential = match (api_key, api_secret) {
            (Some(key), Some(secret)) => Some(Credential::new(key, secret)),
            _ => None,
        };
        Ok(Self {
            public_base_url,
            private_base_url,
            time_window_ms: BITBANK_DEFAULT_TIME_WINDOW_MS,
            client,
            credential,
        })
    }

    fn credential(&self) -> Result<&Credential, CryptoApiClientError> {
        self.credential
            .as_ref()
            .ok_or(CryptoApiClientError::MissingCredentials)
    }

    fn sign_headers(
        &self,
        request: &EndpointRequest,
    ) -> Result<SecretHeaders, CryptoApiClientError> {
        let credential = self.credential()?;
        let request_time = millis_timestamp();
        let time_window = self.time_window_ms.to_string();
        let body_json = request
            .body()
            .filter(|body| !body.is_empty())
            .and_then(|_| request.body_json());

        let signature = credential.sign(
            request.method(),
            &request.endpoint_path(),
            request.params(),
            body_json.as_deref(),
            &request_time,
            &time_window,
        );

        let mut headers = SecretHeaders::new();
        headers.insert("ACCESS-KEY", credential.api_key().as_str());
        headers.insert("ACCESS-REQUEST-TIME", request_time);
        headers.insert("ACCESS-TIME-WINDOW", time_window);
        headers.insert("ACCESS-SIGNATURE", signature);
        headers.insert("Content-Type", "application/json");
        Ok(headers)
    }

    async fn get_public(&self, resource: &str) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.public_base_url.clone(),
            None,
            resource,
            Vec::new(),
            SecretHeaders::new(),
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    async fn get_signed(
        &self,
        resource: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.private_base_url.clone(),
            Some(BITBANK_STUB_PATH),
            resource,
            params,
            SecretHeaders::new(),
        );
        let headers = self.sign_headers(&request)?;
        let request = request.with_headers(headers);
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    async fn post_signed(
        &self,
        resource: &str,
        body: RequestBody,
    ) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::post(
            self.private_base_url.clone(),
            Some(BITBANK_STUB_PATH),
            resource,
            Some(body),
            SecretHeaders::new(),
        );
        let headers = self.sign_headers(&request)?;
        let request = request.with_headers(headers);
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Requests the ticker for one pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn ticker(
        &self,
        params: &BitbankPairParams,
    ) -> Result<BitbankTicker, CryptoApiClientError> {
        let body = self.get_public(&format!("{}/ticker", params.pair)).await?;
        Ok(TickerMessage::from_json(body)?.to_domain_model()?)
    }

    /// Requests trading availability of every pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn spot_status(&self) -> Result<Vec<BitbankSpotStatus>, CryptoApiClientError> {
        let body = self.get_public("spot/status").await?;
        Ok(SpotStatusMessage::from_json(body)?.to_domain_model()?.statuses)
    }

    /// Requests account asset balances. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn assets(&self) -> Result<Vec<BitbankAsset>, CryptoApiClientError> {
        let body = self.get_signed("user/assets", Vec::new()).await?;
        Ok(AssetsMessage::from_json(body)?.to_domain_model()?.assets)
    }

    /// Places a spot order. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the envelope cannot be
    /// decomposed.
    pub async fn create_order(
        &self,
        params: &BitbankCreateOrderParams,
    ) -> Result<BitbankOrder, CryptoApiClientError> {
        let body = self.post_signed("user/spot/order", params.to_body()).await?;
        Ok(CreateOrderMessage::from_json(body)?.to_domain_model()?)
    }
}
