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

//! Property-based tests for rate-limit key construction.
//!
//! - `parse_key` inverts `build_key` for any prefix/label/window combination
//! - the discovery glob matches every key built under the same prefix
//! - window numbering follows `⌊timestamp / window_seconds⌋` exactly

use cryptoapi_network::ratelimit::key::RateLimitKeyBuilder;
use proptest::prelude::*;

fn glob_matches(glob: &str, key: &str) -> bool {
    let glob_parts: Vec<&str> = glob.split(':').collect();
    let key_parts: Vec<&str> = key.split(':').collect();
    glob_parts.len() == key_parts.len()
        && glob_parts
            .iter()
            .zip(&key_parts)
            .all(|(glob_part, key_part)| *glob_part == "*" || glob_part == key_part)
}

proptest! {
    #[test]
    fn parse_inverts_build(
        prefix in "[A-Z][A-Z_]{0,15}",
        label in "[A-Z][A-Z0-9_-]{0,15}",
        window_seconds in 1u64..=86_400,
        timestamp in 0u64..=4_102_444_800, // through year 2100
    ) {
        let key = RateLimitKeyBuilder::build_key(&prefix, &label, window_seconds, timestamp);
        let parsed = RateLimitKeyBuilder::parse_key(&key).expect("built keys must parse");

        prop_assert_eq!(parsed.prefix, prefix);
        prop_assert_eq!(parsed.label, label);
        prop_assert_eq!(parsed.window, timestamp / window_seconds);
    }

    #[test]
    fn search_pattern_matches_any_built_key(
        prefix in "[A-Z][A-Z_]{0,15}",
        label in "[A-Z][A-Z0-9_]{0,15}",
        window_seconds in 1u64..=86_400,
        timestamp in 0u64..=4_102_444_800,
    ) {
        let key = RateLimitKeyBuilder::build_key(&prefix, &label, window_seconds, timestamp);
        let glob = RateLimitKeyBuilder::build_search_pattern(&prefix, None, None);
        prop_assert!(glob_matches(&glob, &key), "glob {} should match key {}", glob, key);

        let labeled = RateLimitKeyBuilder::build_search_pattern(&prefix, Some(&label), None);
        prop_assert!(glob_matches(&labeled, &key));
    }

    #[test]
    fn timestamps_in_same_window_share_a_key(
        prefix in "[A-Z][A-Z_]{0,7}",
        label in "[A-Z]{1,8}",
        window_seconds in 2u64..=3_600,
        window in 0u64..=1_000_000,
        offset_a in 0u64..=3_599,
        offset_b in 0u64..=3_599,
    ) {
        prop_assume!(offset_a < window_seconds && offset_b < window_seconds);
        let base = window * window_seconds;

        let key_a = RateLimitKeyBuilder::build_key(&prefix, &label, window_seconds, base + offset_a);
        let key_b = RateLimitKeyBuilder::build_key(&prefix, &label, window_seconds, base + offset_b);
        prop_assert_eq!(&key_a, &key_b);

        let next_window =
            RateLimitKeyBuilder::build_key(&prefix, &label, window_seconds, base + window_seconds);
        prop_assert_ne!(&key_a, &next_window);
    }
}
