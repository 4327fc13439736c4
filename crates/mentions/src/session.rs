// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! An editing session over one encoded value.
//!
//! The host text input reports text and selection changes one at a time;
//! the session turns each into an updated encoded value and keeps the parsed
//! state in step. The encoded value stays the source of truth: every change
//! is applied by re-parsing it.

use crate::config::ConfigRegistry;
use crate::{
    commit_suggestion, parse_value, reconcile, resolve_keywords, CommitUpdate,
    MentionState, Position, Suggestion, TriggerKeywords,
};

#[derive(Clone, Debug)]
pub struct MentionsSession {
    registry: ConfigRegistry,
    state: MentionState,
    selection: Position,
}

impl MentionsSession {
    pub fn new(registry: ConfigRegistry, value: &str) -> Self {
        let state = parse_value(value, &registry);
        Self {
            registry,
            state,
            selection: Position::default(),
        }
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    pub fn value(&self) -> &str {
        self.state.encoded_value()
    }

    pub fn state(&self) -> &MentionState {
        &self.state
    }

    pub fn selection(&self) -> Position {
        self.selection
    }

    /// Replace the value from outside, e.g. when the host clears the input
    /// after sending.
    pub fn set_value(&mut self, value: &str) {
        if value != self.value() {
            self.state = parse_value(value, &self.registry);
            self.selection = self.selection.clamped(self.state.plain_len());
        }
    }

    /// Apply the input's new plain text and return the new encoded value.
    pub fn handle_text_change(&mut self, text: &str) -> String {
        let value = reconcile(&self.state, text);
        self.state = parse_value(&value, &self.registry);
        self.selection = self.selection.clamped(self.state.plain_len());
        log::trace!(
            target: "mentions::session",
            "Text changed, {} mention(s) remain",
            self.state.mentions().count()
        );
        value
    }

    pub fn handle_selection_change(&mut self, selection: Position) {
        self.selection = selection.clamped(self.state.plain_len());
    }

    /// Keyword state of every trigger at the current selection.
    pub fn triggers(&self) -> TriggerKeywords {
        resolve_keywords(&self.state, self.selection, &self.registry)
    }

    /// Commit `suggestion` for the trigger named `trigger_name` if it is
    /// active, moving the caret after the new mention.
    pub fn select_suggestion(
        &mut self,
        trigger_name: &str,
        suggestion: &Suggestion,
    ) -> Option<CommitUpdate> {
        let triggers = self.triggers();
        let keyword_state = triggers.get(trigger_name)?;
        let update = commit_suggestion(
            &self.state,
            &self.registry,
            trigger_name,
            keyword_state,
            suggestion,
        )?;
        self.state = parse_value(&update.value, &self.registry);
        self.selection = update.selection.clamped(self.state.plain_len());
        Some(update)
    }
}
