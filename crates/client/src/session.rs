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

//! The per-exchange session: HTTP client ownership, callback chain, and the
//! typed API accessor.

use std::{fmt::Debug, sync::Arc};

use cryptoapi_binance::http::client::BinanceHttpClient;
use cryptoapi_bitbank::http::client::BitbankHttpClient;
use cryptoapi_bitflyer::http::client::BitflyerHttpClient;
use cryptoapi_coincheck::http::client::CoincheckHttpClient;
use cryptoapi_core::secret::SecretString;
use cryptoapi_gmocoin::http::client::GmoCoinHttpClient;
use cryptoapi_network::{
    callback::RequestCallback, error::CryptoApiClientError, headers::SecretHeaders,
    http::client::HttpClient,
};
use cryptoapi_upbit::http::client::UpbitHttpClient;

use crate::{config::SessionConfig, exchange::Exchange};

/// Optional inputs for session construction.
#[derive(Default)]
pub struct SessionOptions {
    /// API key for private endpoints.
    pub api_key: Option<SecretString>,
    /// API secret for private endpoints.
    pub api_secret: Option<SecretString>,
    /// Callbacks to run around every attempt, in this order. Nothing is
    /// auto-attached; register the response validator explicitly.
    pub callbacks: Vec<Arc<dyn RequestCallback>>,
    /// HTTP client and retry settings; defaults apply when unset.
    pub config: Option<SessionConfig>,
    /// Externally owned HTTP client. The session never tears it down.
    pub http_client: Option<reqwest::Client>,
    /// Base URL override, for test servers and regional endpoints.
    pub base_url: Option<String>,
}

impl Debug for SessionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret)
            .field("callbacks", &self.callbacks.len())
            .field("config", &self.config.is_some())
            .field("http_client", &self.http_client.is_some())
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The concrete per-exchange API client held by a session.
#[derive(Debug, Clone)]
pub enum ExchangeApi {
    Binance(BinanceHttpClient),
    Bitbank(BitbankHttpClient),
    Bitflyer(BitflyerHttpClient),
    Coincheck(CoincheckHttpClient),
    Gmocoin(GmoCoinHttpClient),
    Upbit(UpbitHttpClient),
}

macro_rules! api_accessor {
    ($name:ident, $variant:ident, $client:ty) => {
        /// Returns the typed client when this session belongs to the
        /// corresponding exchange.
        #[must_use]
        pub fn $name(&self) -> Option<&$client> {
            match self {
                Self::$variant(client) => Some(client),
                _ => None,
            }
        }
    };
}

impl ExchangeApi {
    api_accessor!(as_binance, Binance, BinanceHttpClient);
    api_accessor!(as_bitbank, Bitbank, BitbankHttpClient);
    api_accessor!(as_bitflyer, Bitflyer, BitflyerHttpClient);
    api_accessor!(as_coincheck, Coincheck, CoincheckHttpClient);
    api_accessor!(as_gmocoin, Gmocoin, GmoCoinHttpClient);
    api_accessor!(as_upbit, Upbit, UpbitHttpClient);
}

/// A stateful handle bundling a per-exchange API client, a configured HTTP
/// client, and a callback chain.
///
/// Lifecycle: acquire → use → [`close`](Self::close). After close, any API
/// access fails with "Session is already closed". The session releases the
/// HTTP connection pool only when it built the client itself; externally
/// supplied clients stay alive.
#[derive(Debug)]
pub struct ExchangeSession {
    exchange: Exchange,
    config: SessionConfig,
    callbacks: Vec<Arc<dyn RequestCallback>>,
    api: ExchangeApi,
    owns_http_client: bool,
    closed: bool,
}

impl ExchangeSession {
    /// Creates a new session for `exchange`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Configuration`] if the HTTP client
    /// cannot be built, or [`CryptoApiClientError::InvalidRequest`] for an
    /// invalid base URL override.
    pub fn new(
        exchange: Exchange,
        options: SessionOptions,
    ) -> Result<Self, CryptoApiClientError> {
        let config = options.config.unwrap_or_default();
        let owns_http_client = options.http_client.is_none();
        let http_client = match options.http_client {
            Some(client) => client,
            None => config.build_http_client()?,
        };

        let mut default_headers = SecretHeaders::new();
        default_headers.insert("User-Agent", config.user_agent.clone());

        let pipeline = Arc::new(HttpClient::new(
            http_client,
            default_headers,
            options.callbacks.clone(),
            config.retry_config(),
        )?);

        // Secrets leave their wrappers only here, at the credential boundary.
        let api_key = options.api_key.as_ref().map(|key| key.expose().to_string());
        let api_secret = options
            .api_secret
            .as_ref()
            .map(|secret| secret.expose().to_string());
        let base_url = options.base_url;

        let api = match exchange {
            Exchange::Binance => ExchangeApi::Binance(BinanceHttpClient::new(
                pipeline, base_url, api_key, api_secret,
            )?),
            Exchange::Bitbank => ExchangeApi::Bitbank(BitbankHttpClient::new(
                pipeline,
                base_url.clone(),
                base_url,
                api_key,
                api_secret,
            )?),
            Exchange::Bitflyer => ExchangeApi::Bitflyer(BitflyerHttpClient::new(
                pipeline, base_url, api_key, api_secret,
            )?),
            Exchange::Coincheck => ExchangeApi::Coincheck(CoincheckHttpClient::new(
                pipeline, base_url, api_key, api_secret,
            )?),
            Exchange::Gmocoin => {
                ExchangeApi::Gmocoin(GmoCoinHttpClient::new(pipeline, base_url)?)
            }
            Exchange::Upbit => ExchangeApi::Upbit(UpbitHttpClient::new(pipeline, base_url)?),
        };

        tracing::debug!("Created {exchange} session");
        Ok(Self {
            exchange,
            config,
            callbacks: options.callbacks,
            api,
            owns_http_client,
            closed: false,
        })
    }

    /// The exchange this session talks to.
    #[must_use]
    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// The session configuration (read-only).
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The registered callbacks, in invocation order.
    #[must_use]
    pub fn callbacks(&self) -> &[Arc<dyn RequestCallback>] {
        &self.callbacks
    }

    /// Returns `true` once [`close`](Self::close) has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns `true` when the session built (and therefore releases) its own
    /// HTTP client.
    #[must_use]
    pub fn owns_http_client(&self) -> bool {
        self.owns_http_client
    }

    /// The typed per-exchange API client.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::SessionClosed`] after
    /// [`close`](Self::close).
    pub fn api(&self) -> Result<&ExchangeApi, CryptoApiClientError> {
        if self.closed {
            return Err(CryptoApiClientError::SessionClosed);
        }
        Ok(&self.api)
    }

    /// Closes the session.
    ///
    /// Subsequent [`api`](Self::api) calls fail. The owned connection pool is
    /// released once the last in-flight request completes; an externally
    /// supplied [`reqwest::Client`] is never torn down here.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        tracing::debug!("Closed {} session", self.exchange);
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
