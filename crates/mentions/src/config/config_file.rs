// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Serialized form of a registry, for hosts that configure the composer
//! with JSON. Lists keep registration order.

use serde::Deserialize;

use super::{
    ConfigError, ConfigRegistry, PatternConfig, StyleRule, TextStyle,
    TriggerConfig,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySettings {
    pub triggers: Vec<TriggerSettings>,
    pub patterns: Vec<PatternSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSettings {
    pub name: String,
    pub trigger: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub display_template: Option<String>,
    #[serde(default)]
    pub matching_pattern: Option<String>,
    #[serde(default)]
    pub suggestion_pattern: Option<String>,
    #[serde(default)]
    pub allow_space_in_query: bool,
    #[serde(default)]
    pub insert_space_after_mention: bool,
    #[serde(default)]
    pub text_style: Option<TextStyle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSettings {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub text_style: Option<TextStyle>,
}

impl TryFrom<TriggerSettings> for TriggerConfig {
    type Error = ConfigError;

    fn try_from(settings: TriggerSettings) -> Result<Self, Self::Error> {
        let mut config = TriggerConfig::new(&settings.trigger)?
            .allow_space_in_query(settings.allow_space_in_query)
            .insert_space_after_mention(settings.insert_space_after_mention);
        if let Some(template) = &settings.template {
            config = config.with_template(template)?;
        }
        if let Some(template) = &settings.display_template {
            config = config.with_display_template(template)?;
        }
        if let Some(pattern) = &settings.matching_pattern {
            config = config.with_matching_pattern(pattern)?;
        }
        if let Some(pattern) = &settings.suggestion_pattern {
            config = config.with_suggestion_pattern(pattern)?;
        }
        if let Some(style) = settings.text_style {
            config = config.with_style(StyleRule::Static(style));
        }
        Ok(config)
    }
}

impl TryFrom<PatternSettings> for PatternConfig {
    type Error = ConfigError;

    fn try_from(settings: PatternSettings) -> Result<Self, Self::Error> {
        let config = PatternConfig::new(&settings.pattern)?;
        Ok(match settings.text_style {
            Some(style) => config.with_style(StyleRule::Static(style)),
            None => config,
        })
    }
}

impl TryFrom<RegistrySettings> for ConfigRegistry {
    type Error = ConfigError;

    fn try_from(settings: RegistrySettings) -> Result<Self, Self::Error> {
        let mut builder = ConfigRegistry::builder();
        for trigger in settings.triggers {
            let name = trigger.name.clone();
            builder = builder.trigger(&name, trigger.try_into()?);
        }
        for pattern in settings.patterns {
            let name = pattern.name.clone();
            builder = builder.pattern(&name, pattern.try_into()?);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn loads_triggers_and_patterns_in_order() {
        let registry = ConfigRegistry::from_json(indoc! {r##"
            {
                "triggers": [
                    {
                        "name": "mention",
                        "trigger": "@",
                        "allowSpaceInQuery": true,
                        "textStyle": { "color": "purple" }
                    },
                    {
                        "name": "channel",
                        "trigger": "#",
                        "template": "<{trigger}{id}|{name}>"
                    }
                ],
                "patterns": [
                    { "name": "url", "pattern": "https?://\\S+" }
                ]
            }
        "##})
        .unwrap();

        let names: Vec<_> =
            registry.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["mention", "channel", "url"]);

        let mention = registry.trigger("mention").unwrap();
        assert!(mention.allows_space_in_query());
        assert!(mention.style().is_some());
        assert_eq!(
            registry.trigger("channel").unwrap().template().source(),
            "<{trigger}{id}|{name}>"
        );
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let registry = ConfigRegistry::from_json("{}").unwrap();
        assert!(registry.entries().is_empty());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            ConfigRegistry::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = ConfigRegistry::from_json(
            r#"{"patterns": [{"name": "bad", "pattern": "("}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Regex(_)));
    }
}
