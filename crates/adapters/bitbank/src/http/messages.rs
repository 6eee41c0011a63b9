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

//! Response messages for bitbank endpoints.
//!
//! Every bitbank response is wrapped in `{"success": <int>, "data": …}`.
//! The message splits that envelope at the string level: the metadata is the
//! `success` flag, the payload is the raw `data` substring with every numeric
//! literal untouched.

use std::{fmt::Debug, marker::PhantomData};

use cryptoapi_network::error::CryptoApiClientError;
use cryptoapi_serialization::{
    decimal::{DecimalParseError, parse_decimal_json},
    extract::extract_field_value,
    message::Message,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::http::models::{BitbankAssets, BitbankOrder, BitbankSpotStatuses, BitbankTicker};

/// The bitbank envelope metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitbankMeta {
    /// `1` on success, `0` on failure.
    pub success: i64,
}

/// A bitbank response decomposed into envelope metadata and payload.
pub struct BitbankMessage<T> {
    raw: String,
    meta: BitbankMeta,
    payload: String,
    _marker: PhantomData<T>,
}

impl<T> Debug for BitbankMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitbankMessage")
            .field("meta", &self.meta)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl<T> BitbankMessage<T> {
    /// Decomposes a raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope carries no `success` flag or no
    /// `data` member.
    pub fn from_json(raw: String) -> Result<Self, CryptoApiClientError> {
        let meta: BitbankMeta = serde_json::from_str(&raw)?;
        let payload = extract_field_value(&raw, "data")?.to_string();
        Ok(Self {
            raw,
            meta,
            payload,
            _marker: PhantomData,
        })
    }

    /// The envelope metadata.
    #[must_use]
    pub fn metadata(&self) -> &BitbankMeta {
        &self.meta
    }
}

impl<T: DeserializeOwned> Message for BitbankMessage<T> {
    type Domain = T;

    fn raw_json(&self) -> &str {
        &self.raw
    }

    fn metadata_json(&self) -> Option<String> {
        Some(serde_json::to_string(&self.meta).expect("metadata is serializable JSON"))
    }

    fn payload_str(&self) -> &str {
        &self.payload
    }

    fn to_domain_model(&self) -> Result<T, DecimalParseError> {
        parse_decimal_json(&self.payload)
    }
}

pub type TickerMessage = BitbankMessage<BitbankTicker>;
pub type AssetsMessage = BitbankMessage<BitbankAssets>;
pub type SpotStatusMessage = BitbankMessage<BitbankSpotStatuses>;
pub type CreateOrderMessage = BitbankMessage<BitbankOrder>;

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
