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

//! Wall-clock helpers for request timestamps and nonces.

use chrono::Utc;

/// Returns the current Unix time in whole seconds.
#[must_use]
pub fn unix_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Returns the current Unix time in milliseconds.
#[must_use]
pub fn unix_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Returns a millisecond-precision timestamp string.
///
/// Exchanges which authenticate with a timestamp or nonce header all accept
/// the millisecond Unix time, so this is the canonical nonce source.
#[must_use]
pub fn millis_timestamp() -> String {
    unix_millis().to_string()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
