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

//! The closed set of supported exchanges.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A supported cryptocurrency exchange.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Exchange {
    Binance,
    Bitbank,
    Bitflyer,
    Coincheck,
    Gmocoin,
    Upbit,
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
    #[case(Exchange::Binance, "BINANCE")]
    #[case(Exchange::Bitflyer, "BITFLYER")]
    #[case(Exchange::Gmocoin, "GMOCOIN")]
    fn test_display(#[case] exchange: Exchange, #[case] expected: &str) {
        assert_eq!(exchange.to_string(), expected);
    }

    #[rstest]
    fn test_parse_case_insensitive() {
        let exchange: Exchange = "bitbank".parse().unwrap();
        assert_eq!(exchange, Exchange::Bitbank);
        assert!("KRAKEN".parse::<Exchange>().is_err());
    }

    #[rstest]
    fn test_all_exchanges_enumerable() {
        assert_eq!(Exchange::iter().count(), 6);
    }
}
