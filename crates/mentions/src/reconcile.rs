// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Plain-text edit -> new encoded value.
//!
//! The edit is located by diffing the old and new plain text, then mapped
//! back onto the parts of the previous state. Parts outside the edit keep
//! their encoded form. A mention touched by the edit is demoted: it
//! contributes its display text, with the edit applied, instead of its
//! token.

use std::ops::Range;

use crate::code_units::{slice_utf16, CodeUnits};
use crate::{MentionState, Part};

/// The minimal replacement turning one plain text into another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    /// Replaced range in the old text, in UTF-16 code units.
    pub replaced: Range<usize>,
    pub inserted: String,
}

impl TextChange {
    /// Bound the change by the common prefix and suffix of `old` and `new`.
    ///
    /// The suffix never overlaps the prefix, and neither bound splits a
    /// surrogate pair.
    pub fn between(old: &str, new: &str) -> Self {
        let old_units = CodeUnits::new(old);
        let new_units = CodeUnits::new(new);
        let (a, b) = (old_units.as_slice(), new_units.as_slice());

        let mut prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
        while !(old_units.is_char_boundary(prefix)
            && new_units.is_char_boundary(prefix))
        {
            prefix -= 1;
        }

        let max_suffix = a.len().min(b.len()) - prefix;
        let mut suffix = a
            .iter()
            .rev()
            .zip(b.iter().rev())
            .take(max_suffix)
            .take_while(|(x, y)| x == y)
            .count();
        while !(old_units.is_char_boundary(a.len() - suffix)
            && new_units.is_char_boundary(b.len() - suffix))
        {
            suffix -= 1;
        }

        Self {
            replaced: prefix..a.len() - suffix,
            inserted: new_units.slice(prefix..b.len() - suffix),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.replaced.is_empty()
    }

    /// Whether applying this change alters the text of `part`.
    ///
    /// Any overlap counts. A pure insertion only counts when it lands strictly
    /// inside the part; inserting at a part boundary leaves both neighbours
    /// intact.
    pub fn touches(&self, part: &Part) -> bool {
        let range = &part.plain_range;
        if self.is_insertion() {
            range.start < self.replaced.start && self.replaced.start < range.end
        } else {
            range.start < self.replaced.end && self.replaced.start < range.end
        }
    }
}

/// Compute the encoded value for `new_plain_text`, an edited copy of
/// `previous.plain_text()`.
///
/// The caller re-parses the result to get the next state.
pub fn reconcile(previous: &MentionState, new_plain_text: &str) -> String {
    if previous.plain_text() == new_plain_text {
        return previous.encoded_value().to_owned();
    }

    let change = TextChange::between(previous.plain_text(), new_plain_text);
    let mut value = String::with_capacity(
        previous.encoded_value().len() + change.inserted.len(),
    );
    let mut inserted = false;
    let mut demoted = 0;

    for part in previous.parts() {
        if change.touches(part) {
            let start = part.plain_range.start;
            let len = part.plain_len();
            let head_end = change.replaced.start.saturating_sub(start).min(len);
            value.push_str(&slice_utf16(&part.text, 0..head_end));
            if !inserted {
                value.push_str(&change.inserted);
                inserted = true;
            }
            let tail_start = change.replaced.end.saturating_sub(start).min(len);
            value.push_str(&slice_utf16(&part.text, tail_start..len));
            if part.is_mention() {
                demoted += 1;
            }
        } else if part.plain_range.end <= change.replaced.start {
            value.push_str(&part.encoded_text);
        } else {
            if !inserted {
                value.push_str(&change.inserted);
                inserted = true;
            }
            value.push_str(&part.encoded_text);
        }
    }
    if !inserted {
        value.push_str(&change.inserted);
    }

    log::debug!(
        target: "mentions::reconcile",
        "Replaced {:?} with {} code units, demoted {} mention(s)",
        change.replaced,
        change.inserted.encode_utf16().count(),
        demoted
    );
    value
}
