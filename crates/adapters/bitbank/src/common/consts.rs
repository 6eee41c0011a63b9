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

/// Exchange name as used in error descriptions.
pub const BITBANK: &str = "bitbank";

/// Public market-data base URL (no version stub).
pub const BITBANK_PUBLIC_HTTP_URL: &str = "https://public.bitbank.cc";

/// Private REST base URL.
pub const BITBANK_PRIVATE_HTTP_URL: &str = "https://api.bitbank.cc";

/// API version stub for private resources.
pub const BITBANK_STUB_PATH: &str = "v1";

/// Default signature validity window in milliseconds.
pub const BITBANK_DEFAULT_TIME_WINDOW_MS: u64 = 5000;
