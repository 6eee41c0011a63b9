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

//! Unified session layer over the per-exchange adapters.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cryptoapi_bitflyer::http::query::BitflyerProductParams;
//! use cryptoapi_client::{Exchange, SessionOptions, create_response_validator, create_session};
//!
//! # async fn example() -> Result<(), cryptoapi_client::CryptoApiClientError> {
//! let mut session = create_session(
//!     Exchange::Bitflyer,
//!     SessionOptions {
//!         callbacks: vec![create_response_validator(Exchange::Bitflyer)],
//!         ..SessionOptions::default()
//!     },
//! )?;
//!
//! let ticker = session
//!     .api()?
//!     .as_bitflyer()
//!     .expect("bitFlyer session")
//!     .ticker(&BitflyerProductParams::new("BTC_JPY"))
//!     .await?;
//!
//! session.close().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod exchange;
pub mod factory;
pub mod session;

pub use cryptoapi_core::secret::SecretString;
pub use cryptoapi_network::{
    callback::RequestCallback,
    error::{CryptoApiClientError, ExchangeApiError},
    headers::SecretHeaders,
    http::{
        request::{EndpointRequest, EndpointRequestBuilder},
        response::HttpResponseData,
    },
};

pub use crate::{
    config::SessionConfig,
    exchange::Exchange,
    factory::{create_response_validator, create_session},
    session::{ExchangeApi, ExchangeSession, SessionOptions},
};
