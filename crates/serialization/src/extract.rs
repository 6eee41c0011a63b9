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

//! String-level extraction of JSON substrings.
//!
//! Payload isolation must operate on the raw response text: a decode and
//! re-encode through a float-aware JSON library would rewrite numeric
//! literals and lose precision. The functions here locate balanced
//! `{…}`/`[…]` spans by depth counting (string literals and escapes are
//! honoured) and return slices of the original text untouched.

use thiserror::Error;

/// Error raised when a JSON substring cannot be located.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No opening delimiter was found in the searched region.
    #[error("Opening '{delimiter}' not found")]
    OpeningNotFound { delimiter: char },
    /// The opening delimiter was never balanced by a closing one.
    #[error("Closing delimiter for '{delimiter}' not found")]
    Unclosed { delimiter: char },
    /// The named field does not exist in the text.
    #[error("Field '{name}' not found")]
    FieldNotFound { name: String },
}

/// Extracts the first balanced object (`{…}`) at or after `start`.
///
/// # Errors
///
/// Returns [`ExtractError`] if no object opens at or after `start`, or the
/// braces are unbalanced.
pub fn extract_object(text: &str, start: usize) -> Result<&str, ExtractError> {
    extract_balanced(text, start, '{', '}')
}

/// Extracts the first balanced array (`[…]`) at or after `start`.
///
/// # Errors
///
/// Returns [`ExtractError`] if no array opens at or after `start`, or the
/// brackets are unbalanced.
pub fn extract_array(text: &str, start: usize) -> Result<&str, ExtractError> {
    extract_balanced(text, start, '[', ']')
}

/// Extracts the `"name": {…}` substring, field key included.
///
/// # Errors
///
/// Returns [`ExtractError`] if the field is absent, its value is not an
/// object, or the braces are unbalanced.
pub fn extract_field_with_object<'a>(text: &'a str, name: &str) -> Result<&'a str, ExtractError> {
    let (key_start, value_start) = locate_field(text, name)?;
    let first = text[value_start..].chars().next();
    if first != Some('{') {
        return Err(ExtractError::OpeningNotFound { delimiter: '{' });
    }
    let object = extract_object(text, value_start)?;
    let end = value_start + object.len();
    Ok(&text[key_start..end])
}

/// Extracts the raw `{…}` or `[…]` value of the named field.
///
/// # Errors
///
/// Returns [`ExtractError`] if the field is absent or its value is not a
/// balanced object or array.
pub fn extract_field_value<'a>(text: &'a str, name: &str) -> Result<&'a str, ExtractError> {
    let (_, value_start) = locate_field(text, name)?;
    match text[value_start..].chars().next() {
        Some('{') => extract_object(text, value_start),
        Some('[') => extract_array(text, value_start),
        _ => Err(ExtractError::OpeningNotFound { delimiter: '{' }),
    }
}

/// Returns `text` with the named top-level scalar member removed, along with
/// the one comma that separated it from its neighbours.
///
/// Used for envelopes that interleave a `success` flag with payload fields.
///
/// # Errors
///
/// Returns [`ExtractError::FieldNotFound`] if the field is absent.
pub fn remove_field(text: &str, name: &str) -> Result<String, ExtractError> {
    let (key_start, value_start) = locate_field(text, name)?;
    let bytes = text.as_bytes();

    // Scalar values end at the next top-level ',' or '}'.
    let mut value_end = value_start;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[value_start..].char_indices() {
        let index = value_start + offset;
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            ',' | '}' if !in_string => {
                value_end = index;
                break;
            }
            _ => {}
        }
    }
    if value_end == value_start {
        return Err(ExtractError::Unclosed { delimiter: '{' });
    }

    let mut removal_start = key_start;
    let mut removal_end = value_end;
    if bytes[value_end] == b',' {
        // Take the trailing comma plus any whitespace after it.
        removal_end += 1;
        while removal_end < bytes.len() && bytes[removal_end].is_ascii_whitespace() {
            removal_end += 1;
        }
    } else {
        // Last member: take the preceding comma instead.
        while removal_start > 0 && bytes[removal_start - 1].is_ascii_whitespace() {
            removal_start -= 1;
        }
        if removal_start > 0 && bytes[removal_start - 1] == b',' {
            removal_start -= 1;
        }
    }

    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..removal_start]);
    result.push_str(&text[removal_end..]);
    Ok(result)
}

/// Locates `"name"` followed by a colon; returns the key start index and the
/// index of the first character of the value.
fn locate_field(text: &str, name: &str) -> Result<(usize, usize), ExtractError> {
    let needle = format!("\"{name}\"");
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(&needle) {
        let key_start = search_from + found;
        let mut cursor = key_start + needle.len();
        let rest = text[cursor..].trim_start();
        cursor += text[cursor..].len() - rest.len();
        if rest.starts_with(':') {
            cursor += 1;
            let value = text[cursor..].trim_start();
            let value_start = cursor + (text[cursor..].len() - value.len());
            return Ok((key_start, value_start));
        }
        search_from = key_start + needle.len();
    }
    Err(ExtractError::FieldNotFound {
        name: name.to_string(),
    })
}

fn extract_balanced(
    text: &str,
    start: usize,
    open: char,
    close: char,
) -> Result<&str, ExtractError> {
    let open_index = text[start..]
        .find(open)
        .map(|offset| start + offset)
        .ok_or(ExtractError::OpeningNotFound { delimiter: open })?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[open_index..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    let end = open_index + offset + close.len_utf8();
                    return Ok(&text[open_index..end]);
                }
            }
            _ => {}
        }
    }
    Err(ExtractError::Unclosed { delimiter: open })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
