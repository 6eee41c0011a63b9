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

//! The metadata/payload decomposition every response wrapper follows.

use std::{fmt::Debug, marker::PhantomData};

use serde::de::DeserializeOwned;

use crate::decimal::{DecimalParseError, parse_decimal_json};

/// A typed wrapper over a raw response body.
///
/// A message separates the envelope metadata (success flags, status codes)
/// from the pure payload and can emit the corresponding domain value.
///
/// Implementations must uphold two invariants:
///
/// - `payload_str` never contains the metadata fields.
/// - The metadata and the payload together cover every top-level field of the
///   original body.
pub trait Message {
    /// The domain model this message parses into.
    type Domain;

    /// The original response body, untouched.
    fn raw_json(&self) -> &str;

    /// Compact JSON rendering of the envelope metadata, `None` when the
    /// envelope has no metadata fields.
    fn metadata_json(&self) -> Option<String>;

    /// The pure payload substring of the body.
    fn payload_str(&self) -> &str;

    /// Parses the payload into the domain model.
    ///
    /// # Errors
    ///
    /// Returns [`DecimalParseError`] if the payload does not decode into
    /// [`Self::Domain`].
    fn to_domain_model(&self) -> Result<Self::Domain, DecimalParseError>;
}

/// A message for responses without an envelope: the whole body is payload.
pub struct PlainMessage<T> {
    raw: String,
    _marker: PhantomData<T>,
}

impl<T> PlainMessage<T> {
    /// Creates a new [`PlainMessage`] wrapping the raw response body.
    #[must_use]
    pub fn new(raw: String) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<T> Debug for PlainMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlainMessage").field("raw", &self.raw).finish()
    }
}

impl<T: DeserializeOwned> Message for PlainMessage<T> {
    type Domain = T;

    fn raw_json(&self) -> &str {
        &self.raw
    }

    fn metadata_json(&self) -> Option<String> {
        None
    }

    fn payload_str(&self) -> &str {
        &self.raw
    }

    fn to_domain_model(&self) -> Result<T, DecimalParseError> {
        parse_decimal_json(&self.raw)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
