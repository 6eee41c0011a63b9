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

//! Response messages for Binance endpoints.
//!
//! Binance responses carry no envelope, so every message is a
//! [`PlainMessage`] over its domain model.

use cryptoapi_serialization::message::PlainMessage;

use crate::http::models::{BinanceAccount, BinanceDepth, BinanceTicker24hr};

pub type Ticker24hrMessage = PlainMessage<BinanceTicker24hr>;
pub type DepthMessage = PlainMessage<BinanceDepth>;
pub type AccountMessage = PlainMessage<BinanceAccount>;

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
