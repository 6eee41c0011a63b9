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
pub const BINANCE: &str = "Binance";

/// Default Binance REST base URL.
pub const BINANCE_HTTP_URL: &str = "https://api.binance.com";

/// API version stub prepended to every resource path.
pub const BINANCE_STUB_PATH: &str = "api/v3";

/// Header carrying the API key on signed requests.
pub const BINANCE_API_KEY_HEADER: &str = "X-MBX-APIKEY";
