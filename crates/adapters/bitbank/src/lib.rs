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

//! [bitbank](https://bitbank.cc) exchange integration.
//!
//! Public market data is served from `public.bitbank.cc` without a version
//! stub; private endpoints live under `api.bitbank.cc/v1` and authenticate
//! with the window-bounded `request_time + time_window` HMAC scheme. Every
//! response wraps its payload in a `{"success": …, "data": …}` envelope.

pub mod common;
pub mod http;
