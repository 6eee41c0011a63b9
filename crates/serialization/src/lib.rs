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

//! Precision-preserving JSON codecs for exchange API responses.
//!
//! Exchange APIs transmit prices and sizes as JSON numbers with up to 30
//! significant digits. Routing such literals through an `f64` silently
//! truncates them, so everything in this crate works from the original number
//! lexeme instead:
//!
//! - [`decimal`] parses response bodies into typed models whose decimal fields
//!   are constructed directly from the literal text.
//! - [`extract`] isolates payload substrings from envelope metadata at the
//!   string level, never through a deserialize/re-serialize round trip.
//! - [`message`] defines the metadata/payload decomposition every response
//!   wrapper follows.

pub mod datetime;
pub mod decimal;
pub mod extract;
pub mod message;
