// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use regex::Regex;

use super::{ConfigError, StyleRule};

/// Passive highlighting for text the user types directly, e.g. hashtags or
/// links. Pattern parts read the same in both coordinate spaces.
#[derive(Clone, Debug)]
pub struct PatternConfig {
    pattern: Regex,
    style: Option<StyleRule>,
}

impl PatternConfig {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<StyleRule>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn style(&self) -> Option<&StyleRule> {
        self.style.as_ref()
    }
}
