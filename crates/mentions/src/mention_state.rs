// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The parsed form of an encoded value.
//!
//! A [`MentionState`] is a flat list of [`Part`]s. Each part knows its text
//! in both coordinate spaces: the *encoded* value that is persisted and the
//! *plain* text that the user edits. Parts are contiguous and jointly cover
//! both strings, so any plain offset can be mapped to the part owning it.
//!
//! All offsets are UTF-16 code units.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use crate::code_units::utf16_len;

/// The entity a mention refers to, as extracted from its encoded token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MentionData {
    pub trigger: String,
    pub id: String,
    pub name: String,
    /// Auxiliary `key:value` metadata, e.g. `color`.
    pub attributes: BTreeMap<String, String>,
}

impl MentionData {
    pub fn color(&self) -> Option<&str> {
        self.attributes.get("color").map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PartKind {
    /// Text that is identical in both spaces.
    Plain,
    /// A mention token produced by the trigger registered as `trigger_name`.
    Mention {
        trigger_name: String,
        data: MentionData,
    },
    /// Text highlighted by the pattern registered as `pattern_name`.
    /// Identical in both spaces.
    Pattern { pattern_name: String },
}

/// One contiguous span of the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Display text, as shown to the user.
    pub text: String,
    /// The serialized form of this part inside the encoded value.
    pub encoded_text: String,
    pub plain_range: Range<usize>,
    pub encoded_range: Range<usize>,
    pub kind: PartKind,
}

impl Part {
    pub fn is_mention(&self) -> bool {
        matches!(self.kind, PartKind::Mention { .. })
    }

    pub fn mention(&self) -> Option<&MentionData> {
        match &self.kind {
            PartKind::Mention { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn plain_len(&self) -> usize {
        self.plain_range.end - self.plain_range.start
    }
}

/// Immutable snapshot derived from an encoded value and a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MentionState {
    encoded_value: String,
    plain_text: String,
    parts: Vec<Part>,
}

impl MentionState {
    pub(crate) fn from_parts(encoded_value: String, parts: Vec<Part>) -> Self {
        let plain_text = parts.iter().map(|p| p.text.as_str()).collect();
        Self {
            encoded_value,
            plain_text,
            parts,
        }
    }

    pub fn encoded_value(&self) -> &str {
        &self.encoded_value
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Length of the plain text in UTF-16 code units.
    pub fn plain_len(&self) -> usize {
        self.parts.last().map_or(0, |p| p.plain_range.end)
    }

    /// Length of the encoded value in UTF-16 code units.
    pub fn encoded_len(&self) -> usize {
        self.parts.last().map_or(0, |p| p.encoded_range.end)
    }

    /// Index of the part a caret at `offset` belongs to.
    ///
    /// A caret sits *after* the character it follows, so it belongs to the
    /// part with `start < offset <= end`. Offset 0 belongs to no part.
    pub fn part_index_at(&self, offset: usize) -> Option<usize> {
        let index = self
            .parts
            .partition_point(|p| p.plain_range.end < offset);
        let part = self.parts.get(index)?;
        (part.plain_range.start < offset).then_some(index)
    }

    pub fn part_at(&self, offset: usize) -> Option<&Part> {
        self.part_index_at(offset).map(|index| &self.parts[index])
    }

    /// All mentions in order of appearance.
    pub fn mentions(&self) -> impl Iterator<Item = &MentionData> {
        self.parts.iter().filter_map(Part::mention)
    }
}

/// Accumulates parts while tracking the running offsets in both spaces.
#[derive(Default)]
pub(crate) struct PartsBuilder {
    parts: Vec<Part>,
    plain_offset: usize,
    encoded_offset: usize,
}

impl PartsBuilder {
    pub fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Keep plain runs maximal
        if let Some(last) = self.parts.last_mut() {
            if last.kind == PartKind::Plain {
                let len = utf16_len(text);
                last.text.push_str(text);
                last.encoded_text.push_str(text);
                last.plain_range.end += len;
                last.encoded_range.end += len;
                self.plain_offset += len;
                self.encoded_offset += len;
                return;
            }
        }
        self.push(text.to_owned(), text.to_owned(), PartKind::Plain);
    }

    pub fn push(&mut self, text: String, encoded_text: String, kind: PartKind) {
        let plain_end = self.plain_offset + utf16_len(&text);
        let encoded_end = self.encoded_offset + utf16_len(&encoded_text);
        self.parts.push(Part {
            text,
            encoded_text,
            plain_range: self.plain_offset..plain_end,
            encoded_range: self.encoded_offset..encoded_end,
            kind,
        });
        self.plain_offset = plain_end;
        self.encoded_offset = encoded_end;
    }

    pub fn finish(self, encoded_value: String) -> MentionState {
        MentionState::from_parts(encoded_value, self.parts)
    }
}
