// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Inline mentions for plain-text inputs.
//!
//! A composer holds an *encoded value*, where each mention is stored as a
//! token such as `@[Alice](id:1)`, while the user sees and edits the *plain
//! text*, where the same mention reads `@Alice`. This crate keeps the two in
//! step:
//!
//! - [`parse_value`] splits an encoded value into [`Part`]s using the
//!   triggers and patterns of a [`ConfigRegistry`].
//! - [`reconcile`] maps an edit of the plain text back onto the encoded
//!   value, demoting any mention the edit touched to plain text.
//! - [`resolve_keywords`] reports, per trigger, the keyword being typed at
//!   the caret, and [`commit_suggestion`] replaces it with a mention token.
//! - [`MentionsSession`] ties these together for a single input.
//!
//! All offsets are in UTF-16 code units, matching what text inputs on the
//! web and on mobile report.

mod code_units;
pub mod config;
mod mention_state;
mod parser;
mod position;
mod reconcile;
mod session;
mod suggestions;

#[cfg(test)]
mod tests;

pub use crate::code_units::{byte_offset, utf16_len};
pub use crate::config::{
    ConfigEntry, ConfigError, ConfigRegistry, EncodingTemplate, MentionConfig,
    PatternConfig, RegistryBuilder, StyleRule, TextStyle, TriggerConfig,
};
pub use crate::mention_state::{MentionData, MentionState, Part, PartKind};
pub use crate::parser::parse_value;
pub use crate::position::Position;
pub use crate::reconcile::{reconcile, TextChange};
pub use crate::session::MentionsSession;
pub use crate::suggestions::{
    commit_suggestion, resolve_keywords, CommitUpdate, Suggestion,
    TriggerKeywordState, TriggerKeywords,
};
