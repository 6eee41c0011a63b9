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

//! Decimal-preserving JSON parsing.
//!
//! `serde_json` is compiled with the `arbitrary_precision` feature, so every
//! numeric token retains its original lexeme through parsing. The
//! [`serde_decimal`] field codec turns that lexeme (or a string-encoded
//! decimal) into a [`BigDecimal`] without an intermediate float. Validation
//! against the target schema is serde's compiled `Deserialize` impl, so unlike
//! a runtime validation framework there is no per-type validator cache to
//! build or clear.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error raised when a response body fails to decode into its domain model.
#[derive(Debug, Error)]
#[error("JSON decode error: {0}")]
pub struct DecimalParseError(#[from] serde_json::Error);

/// Parses `json_str` into `T`, preserving the textual form of every numeric
/// literal encountered along the way.
///
/// Decimal fields of `T` must use the [`serde_decimal`] (or
/// [`serde_decimal_option`]) codec so the decimal is constructed from the
/// lexeme rather than a binary float.
///
/// # Errors
///
/// Returns [`DecimalParseError`] if `json_str` is not valid JSON or does not
/// match the shape of `T`.
pub fn parse_decimal_json<T: DeserializeOwned>(json_str: &str) -> Result<T, DecimalParseError> {
    Ok(serde_json::from_str(json_str)?)
}

fn decimal_from_value(value: &serde_json::Value) -> Result<BigDecimal, String> {
    match value {
        serde_json::Value::Number(number) => {
            // With `arbitrary_precision` the Display form is the original lexeme.
            BigDecimal::from_str(&number.to_string()).map_err(|e| e.to_string())
        }
        serde_json::Value::String(text) => {
            BigDecimal::from_str(text).map_err(|e| e.to_string())
        }
        other => Err(format!("expected a JSON number or decimal string, got {other}")),
    }
}

/// Field codec for decimal values.
///
/// Accepts both JSON number literals and string-encoded decimals, which is the
/// mix the exchanges actually transmit. Serializes back as a decimal string.
pub mod serde_decimal {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        super::decimal_from_value(&value).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}

/// Field codec for optional decimal values; `null` and absent both map to `None`.
pub mod serde_decimal_option {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        super::decimal_from_value(&value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(decimal) => serializer.serialize_str(&decimal.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
