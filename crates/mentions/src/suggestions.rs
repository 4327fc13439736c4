// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Autocomplete support: which trigger the caret is in, what keyword has
//! been typed after it, and committing a picked suggestion as a mention.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::code_units::{byte_offset, utf16_len, CodeUnits};
use crate::config::{ConfigRegistry, TriggerConfig};
use crate::{MentionData, MentionState, Part, Position};

/// Keyword state of one trigger. Both fields are `None` when the caret is
/// not inside that trigger's active region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerKeywordState {
    pub keyword: Option<String>,
    /// Plain offset of the trigger character.
    pub trigger_start: Option<usize>,
}

impl TriggerKeywordState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.keyword.is_some()
    }
}

/// Keyword states for every configured trigger, in priority order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TriggerKeywords {
    entries: Vec<(String, TriggerKeywordState)>,
}

impl TriggerKeywords {
    pub fn get(&self, trigger_name: &str) -> Option<&TriggerKeywordState> {
        self.entries
            .iter()
            .find(|(name, _)| name == trigger_name)
            .map(|(_, state)| state)
    }

    /// The first active trigger. Several can be active at once when trigger
    /// regions overlap; the earlier registered one takes precedence.
    pub fn active(&self) -> Option<(&str, &TriggerKeywordState)> {
        self.iter().find(|(_, state)| state.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TriggerKeywordState)> {
        self.entries
            .iter()
            .map(|(name, state)| (name.as_str(), state))
    }
}

/// A candidate picked from the suggestion list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl Suggestion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The result of committing a suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitUpdate {
    /// The new encoded value. Re-parse it to get the next state.
    pub value: String,
    /// Collapsed selection just after the inserted mention.
    pub selection: Position,
}

/// Work out, for every trigger, whether the caret is in its active region
/// and what keyword has been typed.
pub fn resolve_keywords(
    state: &MentionState,
    selection: Position,
    registry: &ConfigRegistry,
) -> TriggerKeywords {
    let entries = registry
        .triggers()
        .map(|(name, config)| {
            let keyword = resolve_trigger(state, selection, config)
                .unwrap_or_else(TriggerKeywordState::inactive);
            (name.to_owned(), keyword)
        })
        .collect();
    TriggerKeywords { entries }
}

fn resolve_trigger(
    state: &MentionState,
    selection: Position,
    config: &TriggerConfig,
) -> Option<TriggerKeywordState> {
    if !selection.is_collapsed() {
        return None;
    }
    let caret = selection.start;
    let part = state.part_at(caret)?;
    if part.is_mention() {
        return None;
    }

    let local_caret = caret - part.plain_range.start;
    let head = CodeUnits::new(&part.text).slice(0..local_caret);
    // The trigger must start a word: "mail@host" is not a mention, but an
    // earlier trigger may still be active when spaces are allowed
    let (trigger_at, _) = head.rmatch_indices(config.trigger()).find(|(at, _)| {
        head[..*at]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    })?;
    let keyword = &head[trigger_at + config.trigger().len()..];

    if !config.allows_space_in_query() && keyword.contains(char::is_whitespace) {
        return None;
    }
    if !config.is_valid_keyword(keyword) {
        return None;
    }

    Some(TriggerKeywordState {
        keyword: Some(keyword.to_owned()),
        trigger_start: Some(
            part.plain_range.start + utf16_len(&head[..trigger_at]),
        ),
    })
}

/// Replace the typed trigger and keyword with an encoded mention for
/// `suggestion`.
///
/// Only the span from the trigger to the end of the keyword is replaced.
/// The suggestion's values are sanitized for the trigger's template first,
/// and the caret lands right after the mention as it will be displayed.
///
/// Returns `None` if `trigger_name` is unknown, `keyword_state` is inactive,
/// the span is no longer plain text in `state`, or the suggestion's name or
/// id is empty once sanitized.
pub fn commit_suggestion(
    state: &MentionState,
    registry: &ConfigRegistry,
    trigger_name: &str,
    keyword_state: &TriggerKeywordState,
    suggestion: &Suggestion,
) -> Option<CommitUpdate> {
    let config = registry.trigger(trigger_name)?;
    let keyword = keyword_state.keyword.as_deref()?;
    let start = keyword_state.trigger_start?;
    let end = start + utf16_len(config.trigger()) + utf16_len(keyword);

    let part = state.part_at(end)?;
    if part.is_mention() || !span_is_inside(part, start, end) {
        return None;
    }

    // Plain and pattern parts read the same in both spaces
    let shift = part.encoded_range.start;
    let encoded_start = shift + (start - part.plain_range.start);
    let encoded_end = shift + (end - part.plain_range.start);
    let encoded = state.encoded_value();
    let byte_start = byte_offset(encoded, encoded_start);
    let byte_end = byte_offset(encoded, encoded_end);

    let data = config.template().sanitize(&MentionData {
        trigger: config.trigger().to_owned(),
        id: suggestion.id.clone(),
        name: suggestion.name.clone(),
        attributes: suggestion.attributes.clone(),
    });
    if data.name.is_empty() || data.id.is_empty() {
        log::debug!(
            target: "mentions::suggestions",
            "Suggestion {:?} has no usable name or id",
            suggestion.id
        );
        return None;
    }
    let mut token = config.encode(&data);
    let mut caret = start + utf16_len(&config.display_text(&data));
    if config.inserts_space_after_mention() {
        token.push(' ');
        caret += 1;
    }

    let mut value = String::with_capacity(encoded.len() + token.len());
    value.push_str(&encoded[..byte_start]);
    value.push_str(&token);
    value.push_str(&encoded[byte_end..]);

    log::debug!(
        target: "mentions::suggestions",
        "Committed {:?} for trigger {:?} over {}..{}",
        suggestion.id,
        trigger_name,
        start,
        end
    );
    Some(CommitUpdate {
        value,
        selection: Position::caret(caret),
    })
}

fn span_is_inside(part: &Part, start: usize, end: usize) -> bool {
    part.plain_range.start <= start && end <= part.plain_range.end
}
