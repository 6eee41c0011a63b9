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

//! Response messages for Coincheck endpoints.
//!
//! Public endpoints return bare payloads. Private endpoints interleave a
//! top-level `"success"` boolean with the payload fields, so payload
//! isolation removes that single member at the string level and keeps the
//! rest of the body byte-identical.

use std::{collections::BTreeMap, fmt::Debug, marker::PhantomData, str::FromStr};

use bigdecimal::BigDecimal;
use cryptoapi_network::error::CryptoApiClientError;
use cryptoapi_serialization::{
    decimal::{DecimalParseError, parse_decimal_json},
    extract::remove_field,
    message::Message,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::http::models::{
    CoincheckBalance, CoincheckOrderBook, CoincheckTicker, CoincheckUnsettledOrders,
};

/// The Coincheck envelope metadata, present only on private endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoincheckMeta {
    pub success: bool,
}

/// A Coincheck response decomposed into optional metadata and payload.
pub struct CoincheckMessage<T> {
    raw: String,
    meta: Option<CoincheckMeta>,
    payload: String,
    _marker: PhantomData<T>,
}

impl<T> Debug for CoincheckMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoincheckMessage")
            .field("meta", &self.meta)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl<T> CoincheckMessage<T> {
    /// Decomposes a raw response body.
    ///
    /// When the body carries a boolean `success` member it becomes the
    /// metadata and is removed from the payload; otherwise the whole body is
    /// payload and the metadata is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the `success` member exists but cannot be
    /// removed from malformed JSON.
    pub fn from_json(raw: String) -> Result<Self, CryptoApiClientError> {
        let success = serde_json::from_str::<serde_json::Value>(&raw)
            .ok()
            .as_ref()
            .and_then(|value| value.get("success"))
            .and_then(serde_json::Value::as_bool);

        let (meta, payload) = match success {
            Some(success) => (
                Some(CoincheckMeta { success }),
                remove_field(&raw, "success")?,
            ),
            None => (None, raw.clone()),
        };

        Ok(Self {
            raw,
            meta,
            payload,
            _marker: PhantomData,
        })
    }

    /// The envelope metadata, when the response carried one.
    #[must_use]
    pub fn metadata(&self) -> Option<&CoincheckMeta> {
        self.meta.as_ref()
    }
}

impl<T: DeserializeOwned> Message for CoincheckMessage<T> {
    type Domain = T;

    fn raw_json(&self) -> &str {
        &self.raw
    }

    fn metadata_json(&self) -> Option<String> {
        self.meta
            .as_ref()
            .map(|meta| serde_json::to_string(meta).expect("metadata is serializable JSON"))
    }

    fn payload_str(&self) -> &str {
        &self.payload
    }

    fn to_domain_model(&self) -> Result<T, DecimalParseError> {
        parse_decimal_json(&self.payload)
    }
}

pub type TickerMessage = CoincheckMessage<CoincheckTicker>;
pub type OrderBookMessage = CoincheckMessage<CoincheckOrderBook>;
pub type UnsettledOrdersMessage = CoincheckMessage<CoincheckUnsettledOrders>;

/// The balance payload is a flat `{currency: amount, currency_reserved: …}`
/// mapping, so its domain conversion assembles one [`CoincheckBalance`] per
/// currency rather than deserializing a struct.
pub struct BalanceMessage {
    inner: CoincheckMessage<BTreeMap<String, String>>,
}

impl Debug for BalanceMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceMessage").finish_non_exhaustive()
    }
}

impl BalanceMessage {
    /// Decomposes a raw balance response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope cannot be decomposed.
    pub fn from_json(raw: String) -> Result<Self, CryptoApiClientError> {
        Ok(Self {
            inner: CoincheckMessage::from_json(raw)?,
        })
    }

    /// The envelope metadata, when the response carried one.
    #[must_use]
    pub fn metadata(&self) -> Option<&CoincheckMeta> {
        self.inner.metadata()
    }

    /// Converts the flat payload into balances sorted by currency.
    ///
    /// Keys without an underscore name a currency; `<currency>_reserved`
    /// supplies the reserved amount and the remaining `<currency>_*` keys
    /// (lending, debt, …) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecimalParseError`] if the payload does not decode.
    pub fn to_domain_model(&self) -> Result<Vec<CoincheckBalance>, CryptoApiClientError> {
        let amounts: BTreeMap<String, String> = parse_decimal_json(self.inner.payload_str())
            .map_err(|e| CryptoApiClientError::Json(e.to_string()))?;

        let mut balances = Vec::new();
        for (key, value) in &amounts {
            if key.contains('_') {
                continue;
            }
            let available = BigDecimal::from_str(value)
                .map_err(|e| CryptoApiClientError::Json(format!("balance '{key}': {e}")))?;
            let reserved = match amounts.get(&format!("{key}_reserved")) {
                Some(reserved) => BigDecimal::from_str(reserved)
                    .map_err(|e| CryptoApiClientError::Json(format!("balance '{key}': {e}")))?,
                None => BigDecimal::from(0),
            };
            balances.push(CoincheckBalance {
                currency: key.clone(),
                available,
                reserved,
            });
        }
        Ok(balances)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
