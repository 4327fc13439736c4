// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! UTF-16 code unit helpers.
//!
//! Every offset exposed by this crate is a UTF-16 code unit offset, matching
//! the text APIs of the platforms hosting the composer. Internally strings are
//! kept as UTF-8 `String`s and converted at the edges.

use std::ops::Range;

use widestring::Utf16String;

/// Number of UTF-16 code units needed to encode `text`.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Byte offset in `text` of the given UTF-16 offset.
///
/// Offsets past the end clamp to `text.len()`, offsets inside a surrogate
/// pair round down to the start of that character.
pub fn byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units + ch.len_utf16() > utf16_offset {
            return byte;
        }
        units += ch.len_utf16();
    }
    text.len()
}

/// A string viewed as UTF-16 code units.
pub(crate) struct CodeUnits {
    units: Utf16String,
}

impl CodeUnits {
    pub fn new(text: &str) -> Self {
        Self {
            units: Utf16String::from_str(text),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn as_slice(&self) -> &[u16] {
        self.units.as_slice()
    }

    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset <= self.len() && self.units.is_char_boundary(offset)
    }

    /// The closest char boundary at or before `offset`, clamped to the length.
    pub fn floor_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.len());
        while !self.units.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Copy out the code units in `range`. The range is clamped and both ends
    /// are rounded down to char boundaries, so this never panics.
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.floor_boundary(range.start);
        let end = self.floor_boundary(range.end).max(start);
        self.units
            .get(start..end)
            .map(|units| units.to_string())
            .unwrap_or_default()
    }
}

/// Copy out the UTF-16 `range` of `text`, clamped to char boundaries.
pub(crate) fn slice_utf16(text: &str, range: Range<usize>) -> String {
    CodeUnits::new(text).slice(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_len_counts_surrogate_pairs_twice() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("a😀b"), 4);
        assert_eq!(utf16_len(""), 0);
    }

    #[test]
    fn byte_offset_maps_ascii_one_to_one() {
        assert_eq!(byte_offset("hello", 0), 0);
        assert_eq!(byte_offset("hello", 3), 3);
        assert_eq!(byte_offset("hello", 5), 5);
    }

    #[test]
    fn byte_offset_clamps_past_the_end() {
        assert_eq!(byte_offset("hi", 10), 2);
    }

    #[test]
    fn byte_offset_handles_multibyte_characters() {
        // 'é' is 2 bytes / 1 unit, '😀' is 4 bytes / 2 units
        let text = "é😀x";
        assert_eq!(byte_offset(text, 1), 2);
        assert_eq!(byte_offset(text, 3), 6);
        // Inside the surrogate pair rounds down
        assert_eq!(byte_offset(text, 2), 2);
    }

    #[test]
    fn slice_rounds_to_char_boundaries() {
        let units = CodeUnits::new("a😀b");
        assert_eq!(units.slice(0..1), "a");
        assert_eq!(units.slice(1..3), "😀");
        assert_eq!(units.slice(2..4), "😀b");
        assert_eq!(units.slice(3..10), "b");
    }

    #[test]
    fn floor_boundary_steps_out_of_surrogate_pair() {
        let units = CodeUnits::new("a😀b");
        assert_eq!(units.floor_boundary(2), 1);
        assert_eq!(units.floor_boundary(3), 3);
        assert_eq!(units.floor_boundary(99), 4);
    }
}
