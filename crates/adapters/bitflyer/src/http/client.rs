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

//! Provides the HTTP client integration for the [bitFlyer](https://bitflyer.com)
//! Lightning REST API.
//!
//! Every method follows the same template: build the typed request value,
//! sign it when the endpoint is private, construct an
//! [`EndpointRequest`], delegate to the session pipeline's
//! `send_endpoint_request`, and decompose the response body through the
//! endpoint's message type.

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
    messages::{
        BalancesMessage, BoardHealthMessage, BoardMessage, ChildOrdersMessage, MarketsMessage,
        SendChildOrderMessage, TickerMessage,
    },
    models::{
        BitflyerBalance, BitflyerBoard, BitflyerBoardHealth, BitflyerChildOrder,
        BitflyerChildOrderAcceptance, BitflyerMarket, BitflyerTicker,
    },
    query::{
        BitflyerCancelChildOrderParams, BitflyerGetChildOrdersParams, BitflyerProductParams,
        BitflyerSendChildOrderParams,
    },
};
use crate::common::{
    consts::{BITFLYER_HTTP_URL, BITFLYER_STUB_PATH},
    credential::Credential,
};

/// HTTP client for the bitFlyer Lightning REST API.
#[derive(Clone)]
pub struct BitflyerHttpClient {
    base_url: Url,
    client: Arc<HttpClient>,
    credential: Option<Credential>,
}

impl Debug for BitflyerHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.credential.as_ref().map(|_| "<redacted>");
        f.debug_struct(stringify!(BitflyerHttpClient))
            .field("base_url", &self.base_url)
            .field("credential", &credential)
            .finish_non_exhaustive()
    }
}

impl BitflyerHttpClient {
    /// Creates a new [`BitflyerHttpClient`].
    ///
    /// Without credentials only the public market-data endpoints are usable.
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
        let base_url = Url::parse(&base_url.unwrap_or(BITFLYER_HTTP_URL.to_string()))?;
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

    fn credential(&self) -> Result<&Credential, CryptoApiClientError> {
        self.credential
            .as_ref()
            .ok_or(CryptoApiClientError::MissingCredentials)
    }

    /// Builds the authentication headers for `request`.
    ///
    /// The signing message is derived from the finished request so the signed
    /// path, query, and body are byte-identical to what goes on the wire.
    fn sign_headers(
        &self,
        request: &EndpointRequest,
    ) -> Result<SecretHeaders, CryptoApiClientError> {
        let credential = self.credential()?;
        let timestamp = millis_timestamp();
        let body_json = request
            .body()
            .filter(|body| !body.is_empty())
            .and_then(|_| request.body_json());

        let signature = credential.sign(
            &timestamp,
            request.method().as_str(),
            &request.endpoint_path(),
            request.params(),
            body_json.as_deref(),
        );

        let mut headers = SecretHeaders::new();
        headers.insert("ACCESS-KEY", credential.api_key().as_str());
        headers.insert("ACCESS-TIMESTAMP", timestamp);
        headers.insert("ACCESS-SIGN", signature);
        // The exchange requires a JSON content type on signed requests, and
        // the signature must be computed before any header is added for us.
        headers.insert("Content-Type", "application/json");
        Ok(headers)
    }

    async fn get_public(
        &self,
        resource: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, CryptoApiClientError> {
        let request = EndpointRequestBuilder::get(
            self.base_url.clone(),
            Some(BITFLYER_STUB_PATH),
            resource,
            params,
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
            self.base_url.clone(),
            Some(BITFLYER_STUB_PATH),
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
            self.base_url.clone(),
            Some(BITFLYER_STUB_PATH),
            resource,
            Some(body),
            SecretHeaders::new(),
        );
        let headers = self.sign_headers(&request)?;
        let request = request.with_headers(headers);
        let response = self.client.send_endpoint_request(&request).await?;
        Ok(response.response_body_text)
    }

    /// Lists tradable markets.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn markets(&self) -> Result<Vec<BitflyerMarket>, CryptoApiClientError> {
        let body = self.get_public("markets", Vec::new()).await?;
        Ok(MarketsMessage::new(body).to_domain_model()?)
    }

    /// Requests the ticker for one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn ticker(
        &self,
        params: &BitflyerProductParams,
    ) -> Result<BitflyerTicker, CryptoApiClientError> {
        let body = self.get_public("getticker", params.to_params()).await?;
        Ok(TickerMessage::new(body).to_domain_model()?)
    }

    /// Requests the order book snapshot for one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn board(
        &self,
        params: &BitflyerProductParams,
    ) -> Result<BitflyerBoard, CryptoApiClientError> {
        let body = self.get_public("getboard", params.to_params()).await?;
        Ok(BoardMessage::new(body).to_domain_model()?)
    }

    /// Requests the order book availability state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response body cannot
    /// be decoded.
    pub async fn board_state(
        &self,
        params: &BitflyerProductParams,
    ) -> Result<BitflyerBoardHealth, CryptoApiClientError> {
        let body = self.get_public("getboardstate", params.to_params()).await?;
        Ok(BoardHealthMessage::new(body).to_domain_model()?)
    }

    /// Requests account balances. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn get_balance(&self) -> Result<Vec<BitflyerBalance>, CryptoApiClientError> {
        let body = self.get_signed("me/getbalance", Vec::new()).await?;
        Ok(BalancesMessage::new(body).to_domain_model()?)
    }

    /// Lists child orders. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn get_child_orders(
        &self,
        params: &BitflyerGetChildOrdersParams,
    ) -> Result<Vec<BitflyerChildOrder>, CryptoApiClientError> {
        let body = self
            .get_signed("me/getchildorders", params.to_params())
            .await?;
        Ok(ChildOrdersMessage::new(body).to_domain_model()?)
    }

    /// Places a child order. Signed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails or the body cannot be decoded.
    pub async fn send_child_order(
        &self,
        params: &BitflyerSendChildOrderParams,
    ) -> Result<BitflyerChildOrderAcceptance, CryptoApiClientError> {
        let body = self
            .post_signed("me/sendchildorder", params.to_body())
            .await?;
        Ok(SendChildOrderMessage::new(body).to_domain_model()?)
    }

    /// Cancels a child order. Signed. The exchange returns an empty body on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::MissingCredentials`] without API keys,
    /// or an error if the HTTP request fails.
    pub async fn cancel_child_order(
        &self,
        params: &BitflyerCancelChildOrderParams,
    ) -> Result<(), CryptoApiClientError> {
        self.post_signed("me/cancelchildorder", params.to_body())
            .await?;
        Ok(())
    }
}
