// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The ordered list of triggers and patterns the parser scans with.
//!
//! Order is priority: triggers come first in registration order, then
//! patterns in registration order. When two configs match at the same
//! offset the earlier one wins.

use std::collections::HashSet;

use regex::Regex;

use super::config_file::RegistrySettings;
use super::{
    ConfigError, PatternConfig, StyleRule, TextStyle, TriggerConfig,
};
use crate::{Part, PartKind};

#[derive(Clone, Debug)]
pub enum MentionConfig {
    Trigger(TriggerConfig),
    Pattern(PatternConfig),
}

impl MentionConfig {
    /// The regex recognizing this config's parts in encoded text.
    pub fn regex(&self) -> &Regex {
        match self {
            Self::Trigger(config) => config.matching_pattern(),
            Self::Pattern(config) => config.pattern(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConfigEntry {
    pub name: String,
    pub config: MentionConfig,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigRegistry {
    entries: Vec<ConfigEntry>,
}

impl ConfigRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Load a registry from a JSON document of the form
    /// `{"triggers": [...], "patterns": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: RegistrySettings = serde_json::from_str(json)?;
        Self::try_from(settings)
    }

    /// All configs in priority order.
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn triggers(&self) -> impl Iterator<Item = (&str, &TriggerConfig)> {
        self.entries.iter().filter_map(|entry| match &entry.config {
            MentionConfig::Trigger(config) => Some((entry.name.as_str(), config)),
            MentionConfig::Pattern(_) => None,
        })
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, &PatternConfig)> {
        self.entries.iter().filter_map(|entry| match &entry.config {
            MentionConfig::Pattern(config) => Some((entry.name.as_str(), config)),
            MentionConfig::Trigger(_) => None,
        })
    }

    pub fn trigger(&self, name: &str) -> Option<&TriggerConfig> {
        self.triggers()
            .find(|(trigger_name, _)| *trigger_name == name)
            .map(|(_, config)| config)
    }

    pub fn pattern(&self, name: &str) -> Option<&PatternConfig> {
        self.patterns()
            .find(|(pattern_name, _)| *pattern_name == name)
            .map(|(_, config)| config)
    }

    /// The style a renderer should give `part`, or `None` for plain text.
    ///
    /// Mentions fall back to [`TextStyle::trigger_default`] when their
    /// trigger has no style.
    pub fn style_for(&self, part: &Part) -> Option<TextStyle> {
        match &part.kind {
            PartKind::Plain => None,
            PartKind::Mention { trigger_name, data } => {
                let default_rule = StyleRule::from(TextStyle::trigger_default());
                let rule = self
                    .trigger(trigger_name)?
                    .style()
                    .unwrap_or(&default_rule);
                Some(rule.resolve(Some(data)))
            }
            PartKind::Pattern { pattern_name } => self
                .pattern(pattern_name)?
                .style()
                .map(|rule| rule.resolve(None)),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    triggers: Vec<ConfigEntry>,
    patterns: Vec<ConfigEntry>,
}

impl RegistryBuilder {
    pub fn trigger(mut self, name: &str, config: TriggerConfig) -> Self {
        self.triggers.push(ConfigEntry {
            name: name.to_owned(),
            config: MentionConfig::Trigger(config),
        });
        self
    }

    pub fn pattern(mut self, name: &str, config: PatternConfig) -> Self {
        self.patterns.push(ConfigEntry {
            name: name.to_owned(),
            config: MentionConfig::Pattern(config),
        });
        self
    }

    pub fn build(self) -> Result<ConfigRegistry, ConfigError> {
        let mut entries = self.triggers;
        entries.extend(self.patterns);

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(ConfigRegistry { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_value;

    fn registry() -> ConfigRegistry {
        ConfigRegistry::builder()
            .pattern("hashtag", PatternConfig::new(r"#\w+").unwrap())
            .trigger("mention", TriggerConfig::new("@").unwrap())
            .trigger("channel", TriggerConfig::new("#").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn triggers_come_before_patterns() {
        let registry = registry();
        let names: Vec<_> = registry
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["mention", "channel", "hashtag"]);
    }

    #[test]
    fn lookup_by_name() {
        let registry = registry();
        assert_eq!(registry.trigger("channel").unwrap().trigger(), "#");
        assert!(registry.trigger("hashtag").is_none());
        assert!(registry.pattern("hashtag").is_some());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ConfigRegistry::builder()
            .trigger("x", TriggerConfig::new("@").unwrap())
            .pattern("x", PatternConfig::new("y").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { .. }));
    }

    #[test]
    fn style_for_uses_default_trigger_style_and_mention_color() {
        let registry = registry();
        let state =
            parse_value("hi @[Al](id:1 color:#123456) #tag", &registry);
        let parts = state.parts();
        assert_eq!(registry.style_for(&parts[0]), None);
        let style = registry.style_for(&parts[1]).unwrap();
        assert_eq!(style.color.as_deref(), Some("#123456"));
        assert_eq!(style.font_weight.as_deref(), Some("bold"));
        // Pattern without a style
        assert_eq!(registry.style_for(&parts[3]), None);
    }

    #[test]
    fn style_for_pattern_with_static_style() {
        let style = TextStyle {
            color: Some("grey".to_owned()),
            ..Default::default()
        };
        let registry = ConfigRegistry::builder()
            .pattern(
                "hashtag",
                PatternConfig::new(r"#\w+")
                    .unwrap()
                    .with_style(StyleRule::Static(style.clone())),
            )
            .build()
            .unwrap();
        let state = parse_value("#rust", &registry);
        assert_eq!(registry.style_for(&state.parts()[0]), Some(style));
    }
}
