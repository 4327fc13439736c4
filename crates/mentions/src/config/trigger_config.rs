// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::template::{
    decode_captures, EncodingTemplate, Template, DEFAULT_DISPLAY_TEMPLATE,
    DEFAULT_ENCODING_TEMPLATE,
};
use super::{ConfigError, StyleRule};
use crate::MentionData;

static KEYWORD_WITHOUT_SPACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\[\]]*$").expect("keyword regex is valid")
});

static KEYWORD_WITH_SPACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\r\n\[\]]*$").expect("keyword regex is valid")
});

/// A character that opens suggestion mode, and how the mentions it creates
/// are written into the encoded value.
#[derive(Clone, Debug)]
pub struct TriggerConfig {
    trigger: String,
    template: EncodingTemplate,
    display: Template,
    /// Overrides the regex derived from `template`.
    matching_pattern: Option<Regex>,
    /// Overrides the default keyword regex. Stored anchored.
    suggestion_pattern: Option<Regex>,
    allow_space_in_query: bool,
    insert_space_after_mention: bool,
    style: Option<StyleRule>,
}

impl TriggerConfig {
    /// A trigger using the default `{trigger}[{name}](id:{id}{data})`
    /// encoding.
    pub fn new(trigger: &str) -> Result<Self, ConfigError> {
        let mut chars = trigger.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_whitespace() => {}
            _ => {
                return Err(ConfigError::InvalidTrigger {
                    trigger: trigger.to_owned(),
                })
            }
        }
        Ok(Self {
            trigger: trigger.to_owned(),
            template: EncodingTemplate::new(DEFAULT_ENCODING_TEMPLATE, trigger)?,
            display: Template::parse(DEFAULT_DISPLAY_TEMPLATE)?,
            matching_pattern: None,
            suggestion_pattern: None,
            allow_space_in_query: false,
            insert_space_after_mention: false,
            style: None,
        })
    }

    pub fn with_template(mut self, template: &str) -> Result<Self, ConfigError> {
        self.template = EncodingTemplate::new(template, &self.trigger)?;
        Ok(self)
    }

    pub fn with_display_template(
        mut self,
        template: &str,
    ) -> Result<Self, ConfigError> {
        self.display = Template::parse(template)?;
        Ok(self)
    }

    /// Recognize encoded mentions with a custom regex. It must have `name`
    /// and `id` capture groups and may have a `data` group holding
    /// ` key:value` pairs.
    pub fn with_matching_pattern(
        mut self,
        pattern: &str,
    ) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)?;
        for group in ["name", "id"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ConfigError::MissingCaptureGroup {
                    pattern: pattern.to_owned(),
                    group: group.to_owned(),
                });
            }
        }
        self.matching_pattern = Some(regex);
        Ok(self)
    }

    /// The regex a typed keyword must match in full to keep the trigger
    /// active.
    pub fn with_suggestion_pattern(
        mut self,
        pattern: &str,
    ) -> Result<Self, ConfigError> {
        self.suggestion_pattern = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(self)
    }

    pub fn allow_space_in_query(mut self, allow: bool) -> Self {
        self.allow_space_in_query = allow;
        self
    }

    pub fn insert_space_after_mention(mut self, insert: bool) -> Self {
        self.insert_space_after_mention = insert;
        self
    }

    pub fn with_style(mut self, style: impl Into<StyleRule>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn template(&self) -> &EncodingTemplate {
        &self.template
    }

    pub fn allows_space_in_query(&self) -> bool {
        self.allow_space_in_query
    }

    pub fn inserts_space_after_mention(&self) -> bool {
        self.insert_space_after_mention
    }

    pub fn style(&self) -> Option<&StyleRule> {
        self.style.as_ref()
    }

    /// The regex recognizing this trigger's tokens in encoded text.
    pub fn matching_pattern(&self) -> &Regex {
        self.matching_pattern
            .as_ref()
            .unwrap_or_else(|| self.template.regex())
    }

    pub fn is_valid_keyword(&self, keyword: &str) -> bool {
        let regex: &Regex = match &self.suggestion_pattern {
            Some(regex) => regex,
            None if self.allow_space_in_query => &KEYWORD_WITH_SPACES,
            None => &KEYWORD_WITHOUT_SPACES,
        };
        regex.is_match(keyword)
    }

    pub fn display_text(&self, data: &MentionData) -> String {
        self.display.render(data)
    }

    pub fn encode(&self, data: &MentionData) -> String {
        self.template.encode(data)
    }

    pub(crate) fn decode(&self, caps: &Captures<'_>) -> Option<MentionData> {
        decode_captures(caps, &self.trigger)
    }
}
