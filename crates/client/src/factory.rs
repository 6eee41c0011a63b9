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

//! Library entry points: session and response-validator factories.

use std::sync::Arc;

use cryptoapi_binance::http::validator::BinanceResponseValidator;
use cryptoapi_bitbank::http::validator::BitbankResponseValidator;
use cryptoapi_bitflyer::http::validator::BitflyerResponseValidator;
use cryptoapi_coincheck::http::validator::CoincheckResponseValidator;
use cryptoapi_gmocoin::http::validator::GmoCoinResponseValidator;
use cryptoapi_network::{callback::RequestCallback, error::CryptoApiClientError};
use cryptoapi_upbit::http::validator::UpbitResponseValidator;

use crate::{
    exchange::Exchange,
    session::{ExchangeSession, SessionOptions},
};

/// Creates a session for `exchange`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a base URL override
/// is invalid.
pub fn create_session(
    exchange: Exchange,
    options: SessionOptions,
) -> Result<ExchangeSession, CryptoApiClientError> {
    ExchangeSession::new(exchange, options)
}

/// Creates the default response validator for `exchange`.
///
/// Validators are ordinary callbacks; the library never attaches one
/// implicitly. Pass the result through
/// [`SessionOptions::callbacks`](crate::session::SessionOptions) to register
/// it.
#[must_use]
pub fn create_response_validator(exchange: Exchange) -> Arc<dyn RequestCallback> {
    match exchange {
        Exchange::Binance => Arc::new(BinanceResponseValidator::new()),
        Exchange::Bitbank => Arc::new(BitbankResponseValidator::new()),
        Exchange::Bitflyer => Arc::new(BitflyerResponseValidator::new()),
        Exchange::Coincheck => Arc::new(CoincheckResponseValidator::new()),
        Exchange::Gmocoin => Arc::new(GmoCoinResponseValidator::new()),
        Exchange::Upbit => Arc::new(UpbitResponseValidator::new()),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    fn test_create_session_for_every_exchange() {
        for exchange in Exchange::iter() {
            let session = create_session(exchange, SessionOptions::default()).unwrap();
            assert_eq!(session.exchange(), exchange);
        }
    }

    #[rstest]
    fn test_validator_exists_for_every_exchange() {
        for exchange in Exchange::iter() {
            let validator = create_response_validator(exchange);
            // Each exchange maps to its own validator type.
            assert!(!format!("{validator:?}").is_empty());
        }
    }

    #[rstest]
    fn test_session_registers_supplied_callbacks_in_order() {
        let validator = create_response_validator(Exchange::Bitflyer);
        let session = create_session(
            Exchange::Bitflyer,
            SessionOptions {
                callbacks: vec![validator],
                ..SessionOptions::default()
            },
        )
        .unwrap();
        assert_eq!(session.callbacks().len(), 1);
    }
}
