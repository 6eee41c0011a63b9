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
//! [Coincheck](https://coincheck.com) REST API.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_core::time::millis_timestamp;
use cryptoapi_network::{
    error::CryptoApiClientError,
    headers::SecretHeaders,
    http::{client::HttpClient, request::{EndpointRequest, EndpointRequestBuilder}},
};
use cryptoapi_serialization::message::Message;
use url::Url;

use super::{
    messages::{BalanceMessage, OrderBookMessage, TickerMessage, UnsettledOrdersMessage},
    models::{CoincheckBalance, CoincheckOrderBook, CoincheckTicker, CoincheckUnsettledOrder},
};
use crate::common::{
    consts::{COINCHECK_HTTP_URL, COINCHECK_STUB_PATH},
    credential::Credential,
};

/// HTTP client for the Coincheck REST API.
#[derive(Clone)]
pub struct CoincheckHttpClient {
    base_url: Url,
    client: Arc<HttpClient>,
    credential: Option<Credential>,
}

impl Debug for CoincheckHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.credential.as_ref().map(|_| "<redacted>");
        f.debug_struct(stringify!(CoincheckHttpClient))
            .field("base_url", &self.base_url)
            .field("credential", &credential)
            .finish_non_exhaustive()
    }
}

impl CoincheckHttpClient {
    /// Creates a new [`CoincheckHttpClient`].
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
        let base_url = Url::parse(&base_url.unwrap_or(COINCHECK_HTTP_URL.to_string()))?;
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

    /// Builds the authentication headers for `request`.
    ///
    /// The full request URL participates in the signature, so the headers are
    /// derived from the finished request value.
    fn sign_headers(
        &self,
        request: &EndpointRequest,
    ) -> Result<SecretHeaders, CryptoApiClientError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(CryptoApiClientError::MissingCredentials)?;

        let nonce = millis_timestamp();
        let body = request.body_json().unwrap_or_default();
        let signature = credential.sign(&nonce, &request.api_endpoint(), &body);

        let mut headers = SecretHeaders::new();
        headers.insert("ACCESS-KEY", credential.api_key().as_str());
        headers.insert("ACCESS-NONCE", nonce);
        headers.insert("ACCESS-SIGNATURE", signature);
        Ok(headers)
    }

    async fn get_public(&self, resource: &str) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(COINCHECK_STUB_PATH),
            resource,
            Vec::new(),
            SecretHeaders::new(),
        );
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    async fn get_signed(&self, resource: &str) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(COINCHECK_STUB_PATH),
            resource,
            Vec::new(),
            SecretHeaders::new(),
        );
        let headers = self.sign_headers(&request)?;
        let request = request.with_headers(headers);
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Requests the public ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn ticker(&self) -> Result<CoincheckTicker, CryptoApiClientError> {
        let body = self.get_public("ticker").await?;
        Ok(TickerMessage::from_json(body)?.to_domain_model()?)
    }

    /// Requests the public order book.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn order_book(&self) -> Result<CoincheckOrderBook, CryptoApiClientError> {
        let body = self.get_public("order_books").await?;
        Ok(OrderBookMessage::from_json(body)?.to_domain_model()?)
    }

    /// Requests account balances. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn balance(&self) -> Result<Vec<CoincheckBalance>, CryptoApiClientError> {
        let body = self.get_signed("accounts/balance").await?;
        BalanceMessage::from_json(body)?.to_domain_model()
    }

    /// Requests open (unsettled) orders. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn unsettled_orders(
        &self,
    ) -> Result<Vec<CoincheckUnsettledOrder>, CryptoApiClientError> {
        let body = self.get_signed("exchange/orders/opens").await?;
        Ok(UnsettledOrdersMessage::from_json(body)?
            .to_domain_model()?
            .orders)
    }
}
