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

//! Response messages for bitFlyer endpoints.
//!
//! bitFlyer responses carry no envelope: the whole body is payload, so every
//! message is a [`PlainMessage`] over its domain model.

use cryptoapi_serialization::message::PlainMessage;

use crate::http::models::{
    BitflyerBalance, BitflyerBoard, BitflyerBoardHealth, BitflyerChildOrder,
    BitflyerChildOrderAcceptance, BitflyerMarket, BitflyerTicker,
};

pub type MarketsMessage = PlainMessage<Vec<BitflyerMarket>>;
pub type TickerMessage = PlainMessage<BitflyerTicker>;
pub type BoardMessage = PlainMessage<BitflyerBoard>;
pub type BoardHealthMessage = PlainMessage<BitflyerBoardHealth>;
pub type BalancesMessage = PlainMessage<Vec<BitflyerBalance>>;
pub type ChildOrdersMessage = PlainMessage<Vec<BitflyerChildOrder>>;
pub type SendChildOrderMessage = PlainMessage<BitflyerChildOrderAcceptance>;

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
